//! Per-dimension selections and the predicate evaluated against each record.
//!
//! A dimension with nothing selected never constrains. Single-valued
//! dimensions pass when the record's label is selected; category and
//! subcategory pass when any of the record's issue entries is selected.
//! Active dimensions are combined with AND.
//!
//! Issue labels are normalized the same way as flow nodes, so every node of
//! a flow graph selects the records it was built from. A category entry with
//! no subcategories still matches its category here, although it adds no
//! chain to an issue-routed flow graph.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::DocumentRecord;
use crate::flow::ColumnType;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown filter dimension '{0}' (expected company, drug, indication, month, year, category or subcategory)")]
pub struct UnknownDimension(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Company,
    Drug,
    Indication,
    Month,
    Year,
    Category,
    Subcategory,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Self::Company,
        Self::Drug,
        Self::Indication,
        Self::Month,
        Self::Year,
        Self::Category,
        Self::Subcategory,
    ];

    pub fn parse(value: &str) -> Result<Self, UnknownDimension> {
        match value.trim().to_ascii_lowercase().as_str() {
            "company" | "companies" => Ok(Self::Company),
            "drug" | "drugs" => Ok(Self::Drug),
            "indication" | "indications" => Ok(Self::Indication),
            "month" | "months" => Ok(Self::Month),
            "year" | "years" => Ok(Self::Year),
            "category" | "categories" | "issue" | "issues" => Ok(Self::Category),
            "subcategory" | "subcategories" => Ok(Self::Subcategory),
            other => Err(UnknownDimension(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Drug => "drug",
            Self::Indication => "indication",
            Self::Month => "month",
            Self::Year => "year",
            Self::Category => "category",
            Self::Subcategory => "subcategory",
        }
    }

    /// Filter dimension a flow column selects on, if any.
    pub fn for_column(column: ColumnType) -> Option<Self> {
        match column {
            ColumnType::Company => Some(Self::Company),
            ColumnType::Drug => Some(Self::Drug),
            ColumnType::Indication => Some(Self::Indication),
            ColumnType::Month => Some(Self::Month),
            ColumnType::Year => Some(Self::Year),
            ColumnType::Category => Some(Self::Category),
            ColumnType::Subcategory => Some(Self::Subcategory),
            ColumnType::Outcome => None,
        }
    }

    /// The record's labels for this dimension. Single-valued dimensions
    /// always yield exactly one label.
    pub fn values<'a>(&self, doc: &'a DocumentRecord) -> Vec<std::borrow::Cow<'a, str>> {
        use std::borrow::Cow;
        match self {
            Self::Company => vec![Cow::Borrowed(doc.company_label())],
            Self::Drug => vec![Cow::Borrowed(doc.drug_label())],
            Self::Indication => vec![Cow::Borrowed(doc.indication_label())],
            Self::Month => vec![Cow::Borrowed(doc.month_label())],
            Self::Year => vec![Cow::Owned(doc.year_label())],
            Self::Category => doc.categories().map(Cow::Borrowed).collect(),
            Self::Subcategory => doc.subcategories().map(Cow::Borrowed).collect(),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = UnknownDimension;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Selected values per dimension. Missing or empty sets mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    selected: BTreeMap<Dimension, BTreeSet<String>>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<I, S>(mut self, dimension: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.insert(dimension, value);
        }
        self
    }

    /// Returns `true` when the value was not selected before.
    pub fn insert(&mut self, dimension: Dimension, value: impl Into<String>) -> bool {
        self.selected.entry(dimension).or_default().insert(value.into())
    }

    /// Returns `true` when the value was selected.
    pub fn remove(&mut self, dimension: Dimension, value: &str) -> bool {
        let Some(values) = self.selected.get_mut(&dimension) else {
            return false;
        };
        let removed = values.remove(value);
        if values.is_empty() {
            self.selected.remove(&dimension);
        }
        removed
    }

    pub fn contains(&self, dimension: Dimension, value: &str) -> bool {
        self.selected.get(&dimension).is_some_and(|values| values.contains(value))
    }

    pub fn values(&self, dimension: Dimension) -> impl Iterator<Item = &str> {
        self.selected.get(&dimension).into_iter().flatten().map(String::as_str)
    }

    pub fn clear(&mut self, dimension: Dimension) {
        self.selected.remove(&dimension);
    }

    pub fn clear_all(&mut self) {
        self.selected.clear();
    }

    /// True when no dimension constrains anything.
    pub fn is_unconstrained(&self) -> bool {
        self.selected.values().all(BTreeSet::is_empty)
    }

    /// Dimensions with at least one selected value, in stable order.
    pub fn active(&self) -> impl Iterator<Item = (Dimension, &BTreeSet<String>)> {
        self.selected.iter().filter(|(_, v)| !v.is_empty()).map(|(d, v)| (*d, v))
    }

    pub fn matches(&self, doc: &DocumentRecord) -> bool {
        self.active().all(|(dimension, selected)| {
            dimension.values(doc).iter().any(|value| selected.contains(&**value))
        })
    }

    /// Order-preserving subsequence of `docs` that passes every dimension.
    pub fn apply<'a>(&self, docs: &'a [DocumentRecord]) -> Vec<&'a DocumentRecord> {
        docs.iter().filter(|doc| self.matches(doc)).collect()
    }
}
