//! Layering of environment variables and CLI flags over the file config.

use anyhow::{Context, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;
use std::path::PathBuf;

use crate::domain::Config;
use crate::flow::{ColumnType, SchemeName};

pub const ENV_PREFIX: &str = "REGDOCS_";

/// Values given on the command line. `None` leaves the configured value alone.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub data_path: Option<PathBuf>,
    pub docs_base: Option<String>,
    pub scheme: Option<SchemeName>,
    pub columns: Option<Vec<ColumnType>>,
    pub increment: Option<f64>,
    pub model: Option<String>,
    pub relevance_threshold: Option<f64>,
}

/// Overlay `REGDOCS_*` variables; nested keys use `__`
/// (`REGDOCS_GATEWAY__MODEL` sets `gateway.model`).
pub fn apply_env(config: Config) -> Result<Config> {
    apply_env_with_prefix(config, ENV_PREFIX)
}

fn apply_env_with_prefix(config: Config, prefix: &str) -> Result<Config> {
    Figment::from(Serialized::defaults(config))
        .merge(Env::prefixed(prefix).split("__"))
        .extract()
        .with_context(|| format!("Invalid {prefix}* environment configuration"))
}

pub fn merge_cli_with_config(mut config: Config, cli: CliOverrides) -> Config {
    if let Some(path) = cli.data_path {
        config.data_path = path;
    }
    if let Some(base) = cli.docs_base {
        config.docs_base = base;
    }
    if let Some(scheme) = cli.scheme {
        config.flow.scheme = scheme;
        // A named scheme on the command line beats columns from the file.
        config.flow.columns = None;
    }
    if let Some(columns) = cli.columns {
        config.flow.columns = Some(columns);
    }
    if let Some(increment) = cli.increment {
        config.flow.increment = increment;
    }
    if let Some(model) = cli.model {
        config.gateway.model = model;
    }
    if let Some(threshold) = cli.relevance_threshold {
        config.gateway.relevance_threshold = threshold;
    }
    config
}
