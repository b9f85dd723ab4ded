//! Core domain types shared across modules

pub mod config;
pub mod record;

pub use config::{Config, FlowConfig, GatewayConfig, SummaryConfig, DEFAULT_RELEVANCE_THRESHOLD};
pub use record::{
    label_or_sentinel, month_index, DocumentRecord, IssueCategory, MONTH_ORDER, NOT_APPLICABLE,
    NOT_SPECIFIED,
};
