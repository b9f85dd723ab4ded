//! Runtime configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::flow::{ColumnScheme, ColumnType, FlowError, SchemeName, DEFAULT_INCREMENT};

pub const DEFAULT_RELEVANCE_THRESHOLD: f64 = 0.5;

const DEFAULT_SYSTEM_PROMPT: &str = "You are an FDA regulatory analyst. Summarize the common \
themes, recurring compliance issues and notable outcomes across the documents below. \
Group findings by issue category and cite document identifiers where relevant. \
Answer in Markdown.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON array of document records
    pub data_path: PathBuf,
    /// Base path that result links point into
    pub docs_base: String,
    pub flow: FlowConfig,
    pub gateway: GatewayConfig,
    pub summary: SummaryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data.json"),
            docs_base: "docs".to_string(),
            flow: FlowConfig::default(),
            gateway: GatewayConfig::default(),
            summary: SummaryConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub scheme: SchemeName,
    /// Explicit column order; overrides `scheme` when set
    pub columns: Option<Vec<ColumnType>>,
    pub increment: f64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self { scheme: SchemeName::Issues, columns: None, increment: DEFAULT_INCREMENT }
    }
}

impl FlowConfig {
    pub fn to_scheme(&self) -> Result<ColumnScheme, FlowError> {
        match &self.columns {
            Some(columns) => ColumnScheme::new(columns.clone(), self.increment),
            None => ColumnScheme::named(self.scheme, self.increment),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// OpenAI-compatible chat completions endpoint
    pub chat_url: String,
    /// `{docs, topics}` similarity endpoint; relevance search is off when unset
    pub similarity_url: Option<String>,
    pub model: String,
    /// Environment variable holding the bearer token
    pub token_env: String,
    pub timeout_secs: u64,
    /// A document is relevant when any topic score exceeds this
    pub relevance_threshold: f64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            chat_url: "https://api.openai.com/v1/chat/completions".to_string(),
            similarity_url: None,
            model: "gpt-4o-mini".to_string(),
            token_env: "REGDOCS_API_TOKEN".to_string(),
            timeout_secs: 60,
            relevance_threshold: DEFAULT_RELEVANCE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub system_prompt: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self { system_prompt: DEFAULT_SYSTEM_PROMPT.to_string() }
    }
}
