//! Command-line interface for regdocs
//!
//! Provides `facets`, `search`, `flow`, `summarize`, `relevant` and `explore`
//! subcommands over one JSON data file, plus shell completions.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod explore;
mod facets;
mod flow;
mod relevant;
mod search;
mod session;
mod summarize;
mod utils;

pub use session::GlobalArgs;

/// Filter, summarize and chart flows through a corpus of FDA regulatory letters
#[derive(Parser)]
#[command(name = "regdocs")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// List the distinct values of every filter dimension
    Facets(facets::FacetsArgs),

    /// List documents matching the given filters
    Search(search::SearchArgs),

    /// Build the flow (Sankey) graph of matching documents
    Flow(flow::FlowArgs),

    /// Summarize matching documents with the configured LLM endpoint
    Summarize(summarize::SummarizeArgs),

    /// Rank matching documents against a free-text question
    Relevant(relevant::RelevantArgs),

    /// Interactive filter session reading commands from stdin
    Explore(explore::ExploreArgs),

    /// Print a shell completion script
    Completions(CompletionsArgs),
}

#[derive(Args)]
struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    shell: Shell,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.global.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let global = &cli.global;
    match cli.command {
        Commands::Facets(args) => facets::run(global, args),
        Commands::Search(args) => search::run(global, args),
        Commands::Flow(args) => flow::run(global, args),
        Commands::Summarize(args) => summarize::run(global, args),
        Commands::Relevant(args) => relevant::run(global, args),
        Commands::Explore(args) => explore::run(global, args),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            clap_complete::generate(args.shell, &mut command, "regdocs", &mut std::io::stdout());
            Ok(())
        }
    }
}
