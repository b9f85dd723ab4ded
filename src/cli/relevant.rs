//! Relevant command implementation

use anyhow::{Context, Result};
use clap::Args;

use super::session::{FilterArgs, GlobalArgs, Session};
use crate::config::CliOverrides;
use crate::gateway::{Assistant, RelevantHit};

#[derive(Args)]
pub struct RelevantArgs {
    /// Free-text question, e.g. "sterility assurance failures"
    #[arg(value_name = "QUERY")]
    pub query: String,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Minimum topic score for a document to count as relevant
    #[arg(long, value_name = "SCORE")]
    pub threshold: Option<f64>,

    /// Print hits as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(global: &GlobalArgs, args: RelevantArgs) -> Result<()> {
    let overrides = CliOverrides { relevance_threshold: args.threshold, ..CliOverrides::default() };
    let mut session = Session::open(global, overrides)?;
    args.filters.apply(&mut session.explorer);

    let assistant = Assistant::from_config(&session.config).context("Failed to set up the LLM gateway client")?;
    let visible = session.explorer.visible();
    let hits = assistant.find_relevant(&visible, &args.query).context("Relevance search failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
    } else {
        print!("{}", render_hits(&hits, &session.config.docs_base));
    }
    Ok(())
}

pub fn render_hits(hits: &[RelevantHit<'_>], docs_base: &str) -> String {
    if hits.is_empty() {
        return "No relevant documents found.\n".to_string();
    }
    let mut out = format!("Relevant documents : {}\n", hits.len());
    for hit in hits {
        out.push_str(&format!(
            "{:.3}  {}  [{}]  {}\n",
            hit.score,
            hit.identifier,
            hit.topic,
            crate::render::document_link(docs_base, hit.document)
        ));
    }
    out
}
