//! JSONL rendering of matching documents

use crate::domain::DocumentRecord;
use serde_json::Value;
use std::collections::BTreeMap;

/// One JSON object per line. Missing fields appear with their sentinel
/// labels so downstream consumers see the same values the filters do.
pub fn render_jsonl(docs: &[&DocumentRecord], docs_base: &str) -> String {
    let mut lines = Vec::with_capacity(docs.len());
    for doc in docs {
        // BTreeMap keeps keys in alphabetical order.
        let mut entry: BTreeMap<&str, Value> = BTreeMap::new();
        entry.insert("company", Value::String(doc.company_label().to_string()));
        entry.insert("drug", Value::String(doc.drug_label().to_string()));
        entry.insert("id", Value::String(doc.pdf_name.clone()));
        entry.insert("indication", Value::String(doc.indication_label().to_string()));
        entry.insert(
            "issues",
            Value::Array(
                doc.issue_categories
                    .iter()
                    .filter_map(|issue| serde_json::to_value(issue).ok())
                    .collect(),
            ),
        );
        entry.insert("link", Value::String(super::results::document_link(docs_base, doc)));
        entry.insert("month", Value::String(doc.month_label().to_string()));
        entry.insert("outcome", Value::String(doc.outcome_label().to_string()));
        entry.insert(
            "summary",
            doc.summary_text().map(|s| Value::String(s.to_string())).unwrap_or(Value::Null),
        );
        entry.insert("year", Value::Number(doc.year.into()));

        if let Ok(line) = serde_json::to_string(&entry) {
            lines.push(line);
        }
    }
    if lines.is_empty() {
        String::new()
    } else {
        format!("{}\n", lines.join("\n"))
    }
}
