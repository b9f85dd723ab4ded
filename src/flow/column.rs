//! Column types and the ordered schemes built from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{FlowError, Result};

/// One categorical dimension used as a layout tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ColumnType {
    Category,
    Subcategory,
    Indication,
    Drug,
    Year,
    Company,
    Month,
    Outcome,
}

impl ColumnType {
    pub const ALL: [ColumnType; 8] = [
        Self::Category,
        Self::Subcategory,
        Self::Indication,
        Self::Drug,
        Self::Year,
        Self::Company,
        Self::Month,
        Self::Outcome,
    ];

    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "category" | "issue" => Ok(Self::Category),
            "subcategory" => Ok(Self::Subcategory),
            "indication" => Ok(Self::Indication),
            "drug" => Ok(Self::Drug),
            "year" => Ok(Self::Year),
            "company" => Ok(Self::Company),
            "month" => Ok(Self::Month),
            "outcome" => Ok(Self::Outcome),
            other => Err(FlowError::UnknownColumn(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Subcategory => "subcategory",
            Self::Indication => "indication",
            Self::Drug => "drug",
            Self::Year => "year",
            Self::Company => "company",
            Self::Month => "month",
            Self::Outcome => "outcome",
        }
    }

    /// Fill color used by the diagram front end.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Company => "#1f77b4",
            Self::Indication => "#2ca02c",
            Self::Drug => "#ff7f0e",
            Self::Year => "#d62728",
            Self::Category => "#9467bd",
            Self::Subcategory => "#8c564b",
            Self::Month => "#e377c2",
            Self::Outcome => "#7f7f7f",
        }
    }

    /// Columns whose values come from a record's issue annotations.
    pub fn is_issue_column(&self) -> bool {
        matches!(self, Self::Category | Self::Subcategory)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ColumnType {
    type Error = FlowError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

/// Named built-in schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeName {
    /// category -> subcategory -> indication -> year -> company
    #[default]
    Issues,
    /// company -> indication -> drug -> year
    Products,
}

impl SchemeName {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "issues" | "issue" => Ok(Self::Issues),
            "products" | "product" => Ok(Self::Products),
            other => Err(FlowError::UnknownScheme(other.to_string())),
        }
    }

    pub fn columns(&self) -> &'static [ColumnType] {
        match self {
            Self::Issues => &[
                ColumnType::Category,
                ColumnType::Subcategory,
                ColumnType::Indication,
                ColumnType::Year,
                ColumnType::Company,
            ],
            Self::Products => &[
                ColumnType::Company,
                ColumnType::Indication,
                ColumnType::Drug,
                ColumnType::Year,
            ],
        }
    }
}

impl FromStr for SchemeName {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

pub const DEFAULT_INCREMENT: f64 = 1.0;

/// Fixed left-to-right column order plus the weight each contribution adds.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnScheme {
    columns: Vec<ColumnType>,
    increment: f64,
}

impl ColumnScheme {
    pub fn new(columns: Vec<ColumnType>, increment: f64) -> Result<Self> {
        if columns.len() < 2 {
            return Err(FlowError::TooFewColumns(columns.len()));
        }
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].contains(column) {
                return Err(FlowError::DuplicateColumn(*column));
            }
        }
        if !increment.is_finite() || increment <= 0.0 {
            return Err(FlowError::InvalidIncrement(increment));
        }
        Ok(Self { columns, increment })
    }

    pub fn named(name: SchemeName, increment: f64) -> Result<Self> {
        Self::new(name.columns().to_vec(), increment)
    }

    pub fn issues() -> Self {
        Self { columns: SchemeName::Issues.columns().to_vec(), increment: DEFAULT_INCREMENT }
    }

    pub fn products() -> Self {
        Self { columns: SchemeName::Products.columns().to_vec(), increment: DEFAULT_INCREMENT }
    }

    pub fn columns(&self) -> &[ColumnType] {
        &self.columns
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    pub fn position(&self, column: ColumnType) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }

    /// True when records fan out into one row per (category, subcategory) pair.
    pub fn routes_through_issues(&self) -> bool {
        self.columns.iter().any(ColumnType::is_issue_column)
    }

    pub fn are_adjacent(&self, source: ColumnType, target: ColumnType) -> bool {
        match (self.position(source), self.position(target)) {
            (Some(s), Some(t)) => t == s + 1,
            _ => false,
        }
    }
}

impl Default for ColumnScheme {
    fn default() -> Self {
        Self::issues()
    }
}
