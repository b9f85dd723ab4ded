//! Report JSON generation.

use anyhow::Result;
use chrono::Utc;
use serde_json::{json, Map, Value};
use std::path::Path;

use crate::selection::Explorer;
use crate::summary::ComposeOutcome;

pub const REPORT_SCHEMA_VERSION: &str = "1";

/// Machine-readable record of one filtered view: the active selection, the
/// counts and a fingerprint of the summary payload it would send.
pub fn build_report(explorer: &Explorer, config: &Value, include_timestamp: bool) -> Value {
    let mut selection = Map::new();
    for (dimension, values) in explorer.selection().active() {
        selection.insert(
            dimension.as_str().to_string(),
            Value::Array(values.iter().cloned().map(Value::String).collect()),
        );
    }

    let summary = match explorer.compose_summary() {
        ComposeOutcome::Ready(payload) => json!({
            "documents": payload.entries.len(),
            "skipped": payload.skipped,
            "fingerprint": payload.fingerprint(),
            "tokens": payload.token_estimate(),
        }),
        ComposeOutcome::NothingToSummarize { considered } => json!({
            "documents": 0,
            "skipped": considered,
        }),
    };

    let mut report = Map::new();
    report.insert("schema_version".to_string(), Value::String(REPORT_SCHEMA_VERSION.to_string()));
    if include_timestamp {
        report.insert(
            "generated_at".to_string(),
            Value::String(Utc::now().format("%Y-%m-%dT%H:%M:%S+00:00").to_string()),
        );
    }
    if let Some(source) = explorer.store().source() {
        report.insert("data".to_string(), Value::String(source.display().to_string()));
    }
    report.insert("total".to_string(), json!(explorer.store().len()));
    report.insert("matched".to_string(), json!(explorer.visible_count()));
    report.insert("selection".to_string(), Value::Object(selection));
    report.insert(
        "documents".to_string(),
        Value::Array(
            explorer.visible().iter().map(|d| Value::String(d.pdf_name.clone())).collect(),
        ),
    );
    report.insert("summary".to_string(), summary);
    report.insert("config".to_string(), config.clone());
    Value::Object(report)
}

pub fn write_report(
    report_path: &Path,
    explorer: &Explorer,
    config: &Value,
    include_timestamp: bool,
) -> Result<()> {
    let report = build_report(explorer, config, include_timestamp);
    if let Some(parent) = report_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(report_path, serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DocumentRecord;
    use crate::filter::Dimension;
    use crate::store::DocumentStore;
    use std::fs;
    use tempfile::TempDir;

    fn explorer() -> Explorer {
        let doc = |name: &str, company: &str, summary: Option<&str>| DocumentRecord {
            company_name: company.to_string(),
            drug_name: None,
            indication: None,
            year: 2022,
            month: "June".to_string(),
            outcome: "CRL".to_string(),
            pdf_name: name.to_string(),
            summary: summary.map(str::to_string),
            issue_categories: vec![],
        };
        Explorer::new(DocumentStore::from_records(vec![
            doc("a.pdf", "Acme", Some("Late filing.")),
            doc("b.pdf", "Beta", None),
        ]))
    }

    #[test]
    fn report_reflects_selection_and_counts() {
        let mut explorer = explorer();
        explorer.toggle(Dimension::Company, "Acme");
        let report = build_report(&explorer, &json!({"docs_base": "docs"}), false);

        assert_eq!(report["total"], json!(2));
        assert_eq!(report["matched"], json!(1));
        assert_eq!(report["selection"]["company"], json!(["Acme"]));
        assert_eq!(report["documents"], json!(["a.pdf"]));
        assert_eq!(report["summary"]["documents"], json!(1));
        assert_eq!(report["summary"]["fingerprint"].as_str().map(str::len), Some(16));
    }

    #[test]
    fn report_omits_timestamp_when_disabled() {
        let tmp = TempDir::new().expect("tmp");
        let report_path = tmp.path().join("out").join("report.json");
        let mut explorer = explorer();
        explorer.toggle(Dimension::Company, "Beta");

        write_report(&report_path, &explorer, &json!({}), false).expect("write report");

        let content = fs::read_to_string(report_path).expect("read report");
        let parsed: Value = serde_json::from_str(&content).expect("json");
        assert!(parsed.get("generated_at").is_none());
        assert_eq!(parsed["summary"], json!({"documents": 0, "skipped": 1}));
    }
}
