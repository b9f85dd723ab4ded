//! regdocs: explore FDA regulatory letters from the command line
//!
//! Filters a static document set, prints matching letters, exports the flow
//! graph as d3-sankey JSON and asks an LLM endpoint for summaries.

use anyhow::Result;

fn main() -> Result<()> {
    regdocs_explorer::cli::run()
}
