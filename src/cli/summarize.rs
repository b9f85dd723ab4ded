//! Summarize command implementation

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::session::{FilterArgs, GlobalArgs, Session};
use crate::config::CliOverrides;
use crate::gateway::{Assistant, GatewayError, SummaryAnswer};
use crate::summary::ComposeOutcome;
use crate::utils::format_with_commas;

#[derive(Args)]
pub struct SummarizeArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Print the prompt that would be sent instead of calling the endpoint
    #[arg(long)]
    pub dry_run: bool,

    /// Chat model to request
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,
}

pub fn run(global: &GlobalArgs, args: SummarizeArgs) -> Result<()> {
    let overrides = CliOverrides { model: args.model.clone(), ..CliOverrides::default() };
    let mut session = Session::open(global, overrides)?;
    args.filters.apply(&mut session.explorer);

    let outcome = session.explorer.compose_summary();
    let ComposeOutcome::Ready(payload) = &outcome else {
        println!("{}", nothing_to_summarize(&outcome));
        return Ok(());
    };

    if args.dry_run {
        println!("# System prompt\n");
        println!("{}\n", session.config.summary.system_prompt);
        println!(
            "# Documents ({} summarized, {} without summary, ~{} tokens)\n",
            payload.entries.len(),
            payload.skipped,
            format_with_commas(payload.token_estimate())
        );
        print!("{}", payload.render());
        return Ok(());
    }

    let assistant = Assistant::from_config(&session.config).context("Failed to set up the LLM gateway client")?;
    match summarize_with_spinner(&assistant, &outcome).context("Summary request failed")? {
        SummaryAnswer::Summary { text, .. } => println!("{}", text.trim_end()),
        SummaryAnswer::NothingToSummarize => println!("{}", nothing_to_summarize(&outcome)),
    }
    Ok(())
}

/// Run the summary call behind a spinner on stderr.
pub fn summarize_with_spinner(
    assistant: &Assistant,
    outcome: &ComposeOutcome,
) -> Result<SummaryAnswer, GatewayError> {
    let documents = outcome.payload().map(|p| p.entries.len()).unwrap_or(0);
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Summarizing {} documents", documents));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let answer = assistant.summarize(outcome);
    spinner.finish_and_clear();
    if let Err(err) = &answer {
        tracing::warn!("Summary request failed: {}", err);
    }
    answer
}

pub fn nothing_to_summarize(outcome: &ComposeOutcome) -> String {
    match outcome {
        ComposeOutcome::NothingToSummarize { considered: 0 } => {
            "Nothing to summarize: no documents match the current filters.".to_string()
        }
        ComposeOutcome::NothingToSummarize { considered } => format!(
            "Nothing to summarize: none of the {} matching documents has a summary.",
            considered
        ),
        ComposeOutcome::Ready(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_to_summarize_mentions_the_count() {
        assert_eq!(
            nothing_to_summarize(&ComposeOutcome::NothingToSummarize { considered: 3 }),
            "Nothing to summarize: none of the 3 matching documents has a summary."
        );
        assert!(nothing_to_summarize(&ComposeOutcome::NothingToSummarize { considered: 0 })
            .contains("no documents match"));
    }
}
