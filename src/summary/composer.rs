//! Shapes a filtered document set into the text block sent for summarization.

use serde::Serialize;

use crate::domain::{DocumentRecord, IssueCategory};
use crate::utils::{estimate_tokens, stable_hash};

/// One summarizable document, flattened for the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryEntry {
    pub company: String,
    pub drug: Option<String>,
    pub indication: String,
    pub outcome: String,
    pub period: String,
    pub identifier: String,
    pub issues: String,
    pub summary: String,
}

impl SummaryEntry {
    fn from_record(doc: &DocumentRecord, summary: &str) -> Self {
        Self {
            company: doc.company_label().to_string(),
            drug: doc.drug().map(str::to_string),
            indication: doc.indication_label().to_string(),
            outcome: doc.outcome_label().to_string(),
            period: doc.period(),
            identifier: doc.pdf_name.clone(),
            issues: flatten_issues(&doc.issue_categories),
            summary: summary.to_string(),
        }
    }

    fn render(&self, out: &mut String) {
        out.push_str(&format!("Company: {}\n", self.company));
        if let Some(drug) = &self.drug {
            out.push_str(&format!("Drug: {}\n", drug));
        }
        out.push_str(&format!("Indication: {}\n", self.indication));
        out.push_str(&format!("Outcome: {}\n", self.outcome));
        out.push_str(&format!("Date: {}\n", self.period));
        out.push_str(&format!("Document: {}\n", self.identifier));
        if !self.issues.is_empty() {
            out.push_str(&format!("Issues: {}\n", self.issues));
        }
        out.push_str(&format!("Summary: {}\n", self.summary));
    }
}

/// Everything the summarization call needs, minus transport details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryPayload {
    pub entries: Vec<SummaryEntry>,
    /// Documents in the filtered set that had no summary text
    pub skipped: usize,
}

impl SummaryPayload {
    /// The user-message body: one block per document, separated by `---`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push_str("\n---\n\n");
            }
            out.push_str(&format!("Document {}\n", i + 1));
            entry.render(&mut out);
        }
        out
    }

    /// Short digest of the identifiers and summaries, for logs and reports.
    pub fn fingerprint(&self) -> String {
        let parts: Vec<&str> = self
            .entries
            .iter()
            .flat_map(|e| [e.identifier.as_str(), e.summary.as_str()])
            .collect();
        stable_hash(&parts)
    }

    pub fn token_estimate(&self) -> usize {
        estimate_tokens(&self.render())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeOutcome {
    Ready(SummaryPayload),
    /// No document in the set has a summary; no request should be issued.
    NothingToSummarize { considered: usize },
}

impl ComposeOutcome {
    pub fn payload(&self) -> Option<&SummaryPayload> {
        match self {
            Self::Ready(payload) => Some(payload),
            Self::NothingToSummarize { .. } => None,
        }
    }
}

/// Keep documents with summary text, in input order.
pub fn compose<'a, I>(docs: I) -> ComposeOutcome
where
    I: IntoIterator<Item = &'a DocumentRecord>,
{
    let mut entries = Vec::new();
    let mut considered = 0usize;
    for doc in docs {
        considered += 1;
        if let Some(summary) = doc.summary_text() {
            entries.push(SummaryEntry::from_record(doc, summary));
        }
    }

    if entries.is_empty() {
        return ComposeOutcome::NothingToSummarize { considered };
    }
    let skipped = considered - entries.len();
    ComposeOutcome::Ready(SummaryPayload { entries, skipped })
}

/// `"Manufacturing (CGMP, Records); Labeling (Claims)"`. Categories without
/// subcategories render as the bare category name.
pub fn flatten_issues(issues: &[IssueCategory]) -> String {
    issues
        .iter()
        .filter(|issue| !issue.category.trim().is_empty())
        .map(|issue| {
            if issue.subcategories.is_empty() {
                issue.category.clone()
            } else {
                format!("{} ({})", issue.category, issue.subcategories.join(", "))
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}
