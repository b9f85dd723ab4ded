//! Search command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::session::{FilterArgs, GlobalArgs, Session};
use crate::config::CliOverrides;
use crate::render::{render_jsonl, render_results, write_report};

#[derive(Args)]
pub struct SearchArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Print matching records as a JSON array
    #[arg(long, conflicts_with = "jsonl")]
    pub json: bool,

    /// Print matching records as JSON lines
    #[arg(long)]
    pub jsonl: bool,

    /// Base path for document links (defaults to 'docs')
    #[arg(long, value_name = "PATH")]
    pub docs_base: Option<String>,

    /// Also write a JSON report of the selection to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Leave the generation timestamp out of the report
    #[arg(long)]
    pub no_timestamp: bool,
}

pub fn run(global: &GlobalArgs, args: SearchArgs) -> Result<()> {
    let overrides = CliOverrides { docs_base: args.docs_base.clone(), ..CliOverrides::default() };
    let mut session = Session::open(global, overrides)?;
    args.filters.apply(&mut session.explorer);

    let explorer = &session.explorer;
    let visible = explorer.visible();
    tracing::info!("{} of {} documents match", visible.len(), explorer.store().len());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
    } else if args.jsonl {
        print!("{}", render_jsonl(&visible, &session.config.docs_base));
    } else {
        print!("{}", render_results(&visible, &session.config.docs_base));
    }

    if let Some(path) = &args.report {
        let config = serde_json::to_value(&session.config)?;
        write_report(path, explorer, &config, !args.no_timestamp)
            .with_context(|| format!("Failed writing report {}", path.display()))?;
        eprintln!("Report written to {}", path.display());
    }
    Ok(())
}
