//! Explore command: a line-oriented loop driving the selection controller.

use anyhow::Result;
use clap::Args;
use std::io::{self, BufRead, IsTerminal, Write};

use super::relevant::render_hits;
use super::session::{FilterArgs, FlowSchemeArgs, GlobalArgs, Session};
use super::summarize::{nothing_to_summarize, summarize_with_spinner};
use crate::domain::Config;
use crate::filter::Dimension;
use crate::flow::{ColumnScheme, ColumnType, NodeKey};
use crate::gateway::{Assistant, SummaryAnswer};
use crate::render::{render_facets, render_flow_table, render_results};
use crate::selection::Explorer;
use crate::summary::ComposeOutcome;

const HELP: &str = "\
Commands:
  toggle <dimension> <value>   add or remove a filter value
  clear <dimension>            drop every value of one dimension
  clear-all                    drop every filter
  focus <column> <name>        clear all filters, then select one flow node
  show                         list matching documents
  facets                       list values per dimension
  flow                         print the flow graph of matching documents
  prompt                       print the summary request without sending it
  summary                      summarize matching documents
  relevant <question>          rank matching documents against a question
  help                         show this help
  quit                         leave
Dimensions: company, drug, indication, month, year, category, subcategory
";

#[derive(Args)]
pub struct ExploreArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub scheme: FlowSchemeArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
}

pub fn run(global: &GlobalArgs, args: ExploreArgs) -> Result<()> {
    let mut session = Session::open(global, args.scheme.overrides()?)?;
    let scheme = session.scheme()?;
    args.filters.apply(&mut session.explorer);

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut shell = ExploreShell::new(session.config, session.explorer, scheme);
    if interactive {
        writeln!(out, "Type 'help' for commands.")?;
    }
    shell.status(&mut out)?;
    prompt(&mut out, interactive)?;

    for line in stdin.lock().lines() {
        if shell.execute(&line?, &mut out)? == Step::Quit {
            break;
        }
        prompt(&mut out, interactive)?;
    }
    Ok(())
}

fn prompt<W: Write>(out: &mut W, interactive: bool) -> io::Result<()> {
    if interactive {
        write!(out, "regdocs> ")?;
        out.flush()?;
    }
    Ok(())
}

/// Holds the session state between commands. Failed commands print an
/// error line and leave the selection untouched.
pub struct ExploreShell {
    config: Config,
    explorer: Explorer,
    scheme: ColumnScheme,
    assistant: Option<Assistant>,
}

impl ExploreShell {
    pub fn new(config: Config, explorer: Explorer, scheme: ColumnScheme) -> Self {
        Self { config, explorer, scheme, assistant: None }
    }

    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Step> {
        let line = line.trim();
        let (command, rest) = split_word(line);

        match command.to_ascii_lowercase().as_str() {
            "" => {}
            "quit" | "exit" | "q" => return Ok(Step::Quit),
            "help" | "?" => write!(out, "{HELP}")?,
            "toggle" => {
                let (dimension, value) = split_word(rest);
                match Dimension::parse(dimension) {
                    Ok(_) if value.is_empty() => writeln!(out, "error: toggle needs a value")?,
                    Ok(dimension) => {
                        let selected = self.explorer.toggle(dimension, value);
                        let verb = if selected { "selected" } else { "deselected" };
                        writeln!(out, "{} {} '{}'", verb, dimension, value)?;
                        self.status(out)?;
                    }
                    Err(err) => writeln!(out, "error: {}", err)?,
                }
            }
            "clear" => match Dimension::parse(rest) {
                Ok(dimension) => {
                    self.explorer.clear(dimension);
                    self.status(out)?;
                }
                Err(err) => writeln!(out, "error: {}", err)?,
            },
            "clear-all" | "reset" => {
                self.explorer.clear_all();
                self.status(out)?;
            }
            "focus" => {
                let (column, name) = split_word(rest);
                match ColumnType::parse(column) {
                    Ok(_) if name.is_empty() => writeln!(out, "error: focus needs a node name")?,
                    Ok(column) => {
                        if self.explorer.focus(&NodeKey::new(column, name)) {
                            self.status(out)?;
                        } else {
                            writeln!(out, "error: {} nodes cannot be used as a filter", column)?;
                        }
                    }
                    Err(err) => writeln!(out, "error: {}", err)?,
                }
            }
            "show" | "search" => {
                let visible = self.explorer.visible();
                write!(out, "{}", render_results(&visible, &self.config.docs_base))?;
            }
            "facets" => write!(out, "{}", render_facets(&self.explorer.store().facets()))?,
            "flow" => {
                let graph = self.explorer.flow(self.scheme.clone());
                write!(out, "{}", render_flow_table(&graph))?;
            }
            "prompt" => match self.explorer.compose_summary() {
                ComposeOutcome::Ready(payload) => write!(out, "{}", payload.render())?,
                outcome => writeln!(out, "{}", nothing_to_summarize(&outcome))?,
            },
            "summary" | "summarize" => self.summarize(out)?,
            "relevant" => {
                if rest.is_empty() {
                    writeln!(out, "error: relevant needs a question")?;
                } else {
                    self.relevant(rest, out)?;
                }
            }
            other => writeln!(out, "error: unknown command '{}' (try 'help')", other)?,
        }
        Ok(Step::Continue)
    }

    pub fn status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let active: Vec<String> = self
            .explorer
            .selection()
            .active()
            .map(|(dimension, values)| {
                format!("{}={}", dimension, values.iter().cloned().collect::<Vec<_>>().join("|"))
            })
            .collect();
        let filters = if active.is_empty() { "no filters".to_string() } else { active.join(", ") };
        writeln!(
            out,
            "{} of {} documents match ({})",
            self.explorer.visible_count(),
            self.explorer.store().len(),
            filters
        )
    }

    /// Build the gateway client on first use.
    fn ensure_assistant(&mut self) -> Result<(), String> {
        if self.assistant.is_none() {
            self.assistant = Some(Assistant::from_config(&self.config).map_err(|e| e.to_string())?);
        }
        Ok(())
    }

    fn summarize<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let outcome = self.explorer.compose_summary();
        if outcome.payload().is_none() {
            return writeln!(out, "{}", nothing_to_summarize(&outcome));
        }
        if let Err(err) = self.ensure_assistant() {
            return writeln!(out, "error: summary failed: {}", err);
        }
        let Some(assistant) = self.assistant.as_ref() else {
            return Ok(());
        };
        match summarize_with_spinner(assistant, &outcome) {
            Ok(SummaryAnswer::Summary { text, .. }) => writeln!(out, "{}", text.trim_end()),
            Ok(SummaryAnswer::NothingToSummarize) => writeln!(out, "{}", nothing_to_summarize(&outcome)),
            Err(err) => writeln!(out, "error: summary failed: {}", err),
        }
    }

    fn relevant<W: Write>(&mut self, query: &str, out: &mut W) -> io::Result<()> {
        if let Err(err) = self.ensure_assistant() {
            return writeln!(out, "error: relevance search failed: {}", err);
        }
        let Some(assistant) = self.assistant.as_ref() else {
            return Ok(());
        };
        let visible = self.explorer.visible();
        match assistant.find_relevant(&visible, query) {
            Ok(hits) => write!(out, "{}", render_hits(&hits, &self.config.docs_base)),
            Err(err) => {
                tracing::warn!("Relevance search failed: {}", err);
                writeln!(out, "error: relevance search failed: {}", err)
            }
        }
    }
}

/// First whitespace-separated word and the trimmed remainder.
fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim();
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    }
}
