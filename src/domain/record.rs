//! Document records as they appear in the static data file.

use serde::{Deserialize, Deserializer, Serialize};

/// Label substituted for a missing company, drug, indication, month or outcome.
pub const NOT_SPECIFIED: &str = "Not Specified";

/// Subcategory meaning "no actionable subcategory".
///
/// Kept on the record, hidden from facet listings.
pub const NOT_APPLICABLE: &str = "Not applicable";

pub const MONTH_ORDER: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One regulatory letter (warning letter, complete response letter, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drug_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indication: Option<String>,
    #[serde(deserialize_with = "year_from_number_or_string")]
    pub year: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub month: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub outcome: String,
    #[serde(alias = "fileName", default, deserialize_with = "null_as_default")]
    pub pdf_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub issue_categories: Vec<IssueCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCategory {
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subcategories: Vec<String>,
}

impl IssueCategory {
    pub fn new(category: impl Into<String>, subcategories: &[&str]) -> Self {
        Self {
            category: category.into(),
            subcategories: subcategories.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl DocumentRecord {
    pub fn company_label(&self) -> &str {
        label_or_sentinel(Some(&self.company_name))
    }

    pub fn drug_label(&self) -> &str {
        label_or_sentinel(self.drug_name.as_deref())
    }

    pub fn indication_label(&self) -> &str {
        label_or_sentinel(self.indication.as_deref())
    }

    pub fn month_label(&self) -> &str {
        label_or_sentinel(Some(&self.month))
    }

    pub fn outcome_label(&self) -> &str {
        label_or_sentinel(Some(&self.outcome))
    }

    pub fn year_label(&self) -> String {
        self.year.to_string()
    }

    /// Drug name when present and non-blank.
    pub fn drug(&self) -> Option<&str> {
        self.drug_name.as_deref().map(str::trim).filter(|d| !d.is_empty())
    }

    /// Free-text summary when present and non-blank.
    pub fn summary_text(&self) -> Option<&str> {
        self.summary.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// `"<Month> <year>"`, or just the year when the month is missing.
    pub fn period(&self) -> String {
        let month = self.month.trim();
        if month.is_empty() {
            self.year_label()
        } else {
            format!("{} {}", month, self.year)
        }
    }

    /// Category labels of every issue entry, in record order. Labels are
    /// trimmed and blank ones read as [`NOT_SPECIFIED`], matching flow nodes.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.issue_categories.iter().map(|c| label_or_sentinel(Some(&c.category)))
    }

    /// Subcategory labels across every issue entry, in record order.
    pub fn subcategories(&self) -> impl Iterator<Item = &str> {
        self.issue_categories
            .iter()
            .flat_map(|c| c.subcategories.iter().map(|s| label_or_sentinel(Some(s))))
    }
}

/// Trimmed value, or [`NOT_SPECIFIED`] when missing or blank.
pub fn label_or_sentinel(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => NOT_SPECIFIED,
    }
}

/// Calendar position of a month name (0 = January), case-insensitive.
pub fn month_index(month: &str) -> Option<usize> {
    let month = month.trim();
    MONTH_ORDER.iter().position(|m| m.eq_ignore_ascii_case(month))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn year_from_number_or_string<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawYear {
        Number(i64),
        Float(f64),
        Text(String),
    }

    match RawYear::deserialize(deserializer)? {
        RawYear::Number(n) => i32::try_from(n).map_err(serde::de::Error::custom),
        RawYear::Float(f) if f.fract() == 0.0 => Ok(f as i32),
        RawYear::Float(f) => Err(serde::de::Error::custom(format!("invalid year {f}"))),
        RawYear::Text(s) => s
            .trim()
            .parse::<i32>()
            .map_err(|_| serde::de::Error::custom(format!("invalid year '{s}'"))),
    }
}
