//! Flow command implementation

use anyhow::Result;
use clap::Args;

use super::session::{FilterArgs, FlowSchemeArgs, GlobalArgs, Session};
use crate::render::{render_flow_table, sankey_json, NO_FLOW_DATA};

#[derive(Args)]
pub struct FlowArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub scheme: FlowSchemeArgs,

    /// Print an edge table instead of d3-sankey JSON
    #[arg(long)]
    pub table: bool,

    /// Compact single-line JSON
    #[arg(long, conflicts_with = "table")]
    pub compact: bool,
}

pub fn run(global: &GlobalArgs, args: FlowArgs) -> Result<()> {
    let mut session = Session::open(global, args.scheme.overrides()?)?;
    let scheme = session.scheme()?;
    args.filters.apply(&mut session.explorer);

    let graph = session.explorer.flow(scheme);
    tracing::info!(
        "Flow graph over {} documents: {} nodes, {} links",
        session.explorer.visible_count(),
        graph.nodes().len(),
        graph.edges().len()
    );

    if args.table {
        print!("{}", render_flow_table(&graph));
        return Ok(());
    }

    if graph.is_empty() {
        eprintln!("{NO_FLOW_DATA}");
    }
    let value = sankey_json(&graph);
    if args.compact {
        println!("{}", serde_json::to_string(&value)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}
