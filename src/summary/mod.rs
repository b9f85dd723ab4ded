//! Summary request composition

pub mod composer;

pub use composer::{compose, flatten_issues, ComposeOutcome, SummaryEntry, SummaryPayload};
