//! Config resolution, data loading and the filter flags shared by subcommands.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use super::utils::{parse_columns, parse_scheme};
use crate::config::{apply_env, load_config, merge_cli_with_config, CliOverrides};
use crate::domain::Config;
use crate::filter::Dimension;
use crate::flow::{ColumnScheme, SchemeName};
use crate::selection::Explorer;
use crate::store::DocumentStore;

/// Options every subcommand accepts.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file (regdocs.toml or regdocs.yml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// JSON data file with the document records
    #[arg(short, long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,
}

/// Per-dimension filter flags. Each may be repeated; values within one
/// dimension are ORed, dimensions are ANDed.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Keep documents from this company
    #[arg(long = "company", value_name = "NAME")]
    pub companies: Vec<String>,

    /// Keep documents about this drug
    #[arg(long = "drug", value_name = "NAME")]
    pub drugs: Vec<String>,

    /// Keep documents for this indication
    #[arg(long = "indication", value_name = "NAME")]
    pub indications: Vec<String>,

    /// Keep documents issued in this month
    #[arg(long = "month", value_name = "MONTH")]
    pub months: Vec<String>,

    /// Keep documents issued in this year
    #[arg(long = "year", value_name = "YEAR")]
    pub years: Vec<String>,

    /// Keep documents with an issue in this category
    #[arg(long = "category", value_name = "NAME")]
    pub categories: Vec<String>,

    /// Keep documents with an issue in this subcategory
    #[arg(long = "subcategory", value_name = "NAME")]
    pub subcategories: Vec<String>,
}

impl FilterArgs {
    pub fn selections(&self) -> [(Dimension, &[String]); 7] {
        [
            (Dimension::Company, self.companies.as_slice()),
            (Dimension::Drug, self.drugs.as_slice()),
            (Dimension::Indication, self.indications.as_slice()),
            (Dimension::Month, self.months.as_slice()),
            (Dimension::Year, self.years.as_slice()),
            (Dimension::Category, self.categories.as_slice()),
            (Dimension::Subcategory, self.subcategories.as_slice()),
        ]
    }

    pub fn apply(&self, explorer: &mut Explorer) {
        for (dimension, values) in self.selections() {
            let values: Vec<&str> = values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()).collect();
            if !values.is_empty() {
                explorer.select(dimension, values);
            }
        }
    }
}

/// Column scheme flags for commands that build a flow graph.
#[derive(Args, Debug, Clone, Default)]
pub struct FlowSchemeArgs {
    /// Built-in column scheme: issues or products
    #[arg(long, value_name = "NAME", value_parser = parse_scheme)]
    pub scheme: Option<SchemeName>,

    /// Explicit column order (comma-separated, e.g. 'company,indication,year')
    #[arg(long, value_name = "COLUMNS")]
    pub columns: Option<String>,

    /// Weight added per row for each edge
    #[arg(long, value_name = "WEIGHT")]
    pub increment: Option<f64>,
}

impl FlowSchemeArgs {
    pub fn overrides(&self) -> Result<CliOverrides> {
        Ok(CliOverrides {
            scheme: self.scheme,
            columns: parse_columns(&self.columns)?,
            increment: self.increment,
            ..CliOverrides::default()
        })
    }
}

/// Resolved config plus the loaded document set.
pub struct Session {
    pub config: Config,
    pub explorer: Explorer,
}

impl Session {
    /// Resolve config (CLI > env > file > defaults) and load the data file.
    /// A failed load here is the one fatal error.
    pub fn open(global: &GlobalArgs, mut overrides: CliOverrides) -> Result<Self> {
        let config = resolve_config(global, &mut overrides)?;
        let store = DocumentStore::load(&config.data_path)
            .with_context(|| format!("Failed to load document data from {}", config.data_path.display()))?;
        Ok(Self { config, explorer: Explorer::new(store) })
    }

    pub fn scheme(&self) -> Result<ColumnScheme> {
        Ok(self.config.flow.to_scheme()?)
    }
}

pub fn resolve_config(global: &GlobalArgs, overrides: &mut CliOverrides) -> Result<Config> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let data_dir = global.data.as_deref().and_then(Path::parent).filter(|p| !p.as_os_str().is_empty());

    let mut search_dirs: Vec<&Path> = Vec::new();
    if let Some(dir) = data_dir {
        search_dirs.push(dir);
    }
    search_dirs.push(&cwd);

    let file_config = load_config(&search_dirs, global.config.as_deref())?;
    let env_config = apply_env(file_config)?;

    if overrides.data_path.is_none() {
        overrides.data_path = global.data.clone();
    }
    let merged = merge_cli_with_config(env_config, std::mem::take(overrides));
    tracing::debug!("Resolved config: {:?}", merged);
    Ok(merged)
}
