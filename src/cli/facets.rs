//! Facets command implementation

use anyhow::Result;
use clap::Args;

use super::session::{GlobalArgs, Session};
use crate::config::CliOverrides;
use crate::render::{facets_json, render_facets};

#[derive(Args)]
pub struct FacetsArgs {
    /// Print facets as a JSON object keyed by dimension
    #[arg(long)]
    pub json: bool,
}

pub fn run(global: &GlobalArgs, args: FacetsArgs) -> Result<()> {
    let session = Session::open(global, CliOverrides::default())?;
    let facets = session.explorer.store().facets();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&facets_json(&facets))?);
    } else {
        print!("{}", render_facets(&facets));
    }
    Ok(())
}
