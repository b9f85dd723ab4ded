//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const LETTERS: &str = r#"[
  {"companyName": "Acme", "drugName": "Axo", "indication": "Oncology", "year": 2020,
   "month": "March", "outcome": "Warning Letter", "pdfName": "a.pdf",
   "summary": "Batch records were incomplete.",
   "issueCategories": [{"category": "Manufacturing", "subcategories": ["CGMP"]}]},
  {"companyName": "Acme", "indication": "Cardiology", "year": 2021,
   "month": "July", "outcome": "Warning Letter", "fileName": "b.pdf",
   "issueCategories": [{"category": "Manufacturing", "subcategories": ["CGMP"]}]}
]"#;

const NO_SUMMARIES: &str = r#"[
  {"companyName": "Beta", "indication": "Oncology", "year": 2019, "month": "May",
   "outcome": "CRL", "pdfName": "c.pdf", "summary": "   "}
]"#;

fn regdocs(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("regdocs"));
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("REGDOCS_DATA_PATH")
        .env_remove("REGDOCS_DOCS_BASE")
        .env("REGDOCS_API_TOKEN", "");
    cmd
}

fn write_data(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("data.json");
    fs::write(&path, content).expect("write data");
    path
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("run");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("regdocs"));
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("regdocs"));
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("regdocs"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("FDA regulatory letters"))
        .stdout(predicate::str::contains("facets"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("flow"))
        .stdout(predicate::str::contains("summarize"))
        .stdout(predicate::str::contains("relevant"))
        .stdout(predicate::str::contains("explore"));
}

#[test]
fn test_search_lists_all_documents_without_filters() {
    let tmp = TempDir::new().expect("tmp");
    let data = write_data(&tmp, LETTERS);

    regdocs(&tmp)
        .arg("search")
        .arg("--data")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Documents Found : 2"))
        .stdout(predicate::str::contains("Axo | Acme | Oncology"))
        .stdout(predicate::str::contains("Not Specified | Acme | Cardiology"))
        .stdout(predicate::str::contains("July 2021 | Warning Letter"))
        .stdout(predicate::str::contains("docs/b.pdf"));
}

#[test]
fn test_search_category_then_indication_narrows() {
    let tmp = TempDir::new().expect("tmp");
    let data = write_data(&tmp, LETTERS);

    regdocs(&tmp)
        .args(["search", "--category", "Manufacturing", "--data"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Documents Found : 2"));

    regdocs(&tmp)
        .args(["search", "--category", "Manufacturing", "--indication", "Oncology", "--data"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Documents Found : 1"))
        .stdout(predicate::str::contains("a.pdf"))
        .stdout(predicate::str::contains("b.pdf").not());
}

#[test]
fn test_search_without_matches_prints_placeholder() {
    let tmp = TempDir::new().expect("tmp");
    let data = write_data(&tmp, LETTERS);

    regdocs(&tmp)
        .args(["search", "--year", "1999", "--data"])
        .arg(&data)
        .assert()
        .success()
        .stdout("No matching documents found.\n");
}

#[test]
fn test_search_json_and_report() {
    let tmp = TempDir::new().expect("tmp");
    let data = write_data(&tmp, LETTERS);
    let report = tmp.path().join("out").join("report.json");

    let parsed = stdout_json(
        regdocs(&tmp)
            .args(["search", "--json", "--company", "Acme", "--no-timestamp", "--report"])
            .arg(&report)
            .arg("--data")
            .arg(&data),
    );
    assert_eq!(parsed.as_array().map(Vec::len), Some(2));
    assert_eq!(parsed[1]["pdfName"], "b.pdf");

    let report: Value =
        serde_json::from_str(&fs::read_to_string(report).expect("report")).expect("report json");
    assert_eq!(report["matched"], 2);
    assert_eq!(report["selection"]["company"][0], "Acme");
    assert!(report.get("generated_at").is_none());
}

#[test]
fn test_flow_json_has_index_links() {
    let tmp = TempDir::new().expect("tmp");
    let data = write_data(&tmp, LETTERS);

    let graph = stdout_json(regdocs(&tmp).arg("flow").arg("--data").arg(&data));
    let nodes = graph["nodes"].as_array().expect("nodes");
    let links = graph["links"].as_array().expect("links");

    // category, subcategory, two indications, two years, one company
    assert_eq!(nodes.len(), 7);
    assert_eq!(nodes[0]["name"], "Manufacturing");
    assert_eq!(nodes[0]["type"], "category");
    assert_eq!(links[0]["source"], 0);
    assert_eq!(links[0]["target"], 1);
    assert_eq!(links[0]["value"], 2.0);
}

#[test]
fn test_flow_products_scheme_with_increment() {
    let tmp = TempDir::new().expect("tmp");
    let data = write_data(&tmp, LETTERS);

    let graph = stdout_json(
        regdocs(&tmp)
            .args(["flow", "--scheme", "products", "--increment", "0.5", "--data"])
            .arg(&data),
    );
    let names: Vec<&str> =
        graph["nodes"].as_array().expect("nodes").iter().filter_map(|n| n["name"].as_str()).collect();
    assert!(names.contains(&"Not Specified"));
    assert_eq!(graph["links"][0]["value"], 0.5);
    assert_eq!(graph["columns"][0], "company");
}

#[test]
fn test_flow_rejects_unknown_column() {
    let tmp = TempDir::new().expect("tmp");
    let data = write_data(&tmp, LETTERS);

    regdocs(&tmp)
        .args(["flow", "--columns", "company,planet", "--data"])
        .arg(&data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown column type 'planet'"));
}

#[test]
fn test_empty_data_prints_placeholders() {
    let tmp = TempDir::new().expect("tmp");
    let data = write_data(&tmp, "[]");

    regdocs(&tmp)
        .args(["flow", "--table", "--data"])
        .arg(&data)
        .assert()
        .success()
        .stdout("No data available for flow diagram\n");

    regdocs(&tmp)
        .args(["search", "--data"])
        .arg(&data)
        .assert()
        .success()
        .stdout("No matching documents found.\n");
}

#[test]
fn test_missing_data_file_is_fatal() {
    let tmp = TempDir::new().expect("tmp");

    regdocs(&tmp)
        .args(["search", "--data", "nowhere.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load document data"));
}

#[test]
fn test_summarize_dry_run_prints_prompt() {
    let tmp = TempDir::new().expect("tmp");
    let data = write_data(&tmp, LETTERS);

    regdocs(&tmp)
        .args(["summarize", "--dry-run", "--data"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("# System prompt"))
        .stdout(predicate::str::contains("1 summarized, 1 without summary"))
        .stdout(predicate::str::contains("Issues: Manufacturing (CGMP)"))
        .stdout(predicate::str::contains("Summary: Batch records were incomplete."));
}

#[test]
fn test_summarize_nothing_to_summarize_needs_no_endpoint() {
    let tmp = TempDir::new().expect("tmp");
    let data = write_data(&tmp, NO_SUMMARIES);

    // No token and an unreachable endpoint: succeeding proves no request was made.
    regdocs(&tmp)
        .env("REGDOCS_GATEWAY__CHAT_URL", "http://127.0.0.1:9/unreachable")
        .args(["summarize", "--data"])
        .arg(&data)
        .assert()
        .success()
        .stdout("Nothing to summarize: none of the 1 matching documents has a summary.\n");
}

#[test]
fn test_summarize_without_token_fails_cleanly() {
    let tmp = TempDir::new().expect("tmp");
    let data = write_data(&tmp, LETTERS);

    regdocs(&tmp)
        .args(["summarize", "--data"])
        .arg(&data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("REGDOCS_API_TOKEN"));
}

#[test]
fn test_facets_json() {
    let tmp = TempDir::new().expect("tmp");
    let data = write_data(&tmp, LETTERS);

    let facets = stdout_json(regdocs(&tmp).args(["facets", "--json", "--data"]).arg(&data));
    assert_eq!(facets["month"], serde_json::json!(["March", "July"]));
    assert_eq!(facets["year"], serde_json::json!(["2020", "2021"]));
    assert_eq!(facets["drug"], serde_json::json!(["Axo", "Not Specified"]));
}

#[test]
fn test_config_file_and_env_overlay() {
    let tmp = TempDir::new().expect("tmp");
    write_data(&tmp, LETTERS);
    fs::write(tmp.path().join("regdocs.toml"), "[regdocs]\ndocs_base = 'letters'\n").expect("config");

    // data_path defaults to data.json in the working directory
    regdocs(&tmp)
        .arg("search")
        .assert()
        .success()
        .stdout(predicate::str::contains("letters/a.pdf"));

    regdocs(&tmp)
        .env("REGDOCS_DOCS_BASE", "archive")
        .arg("search")
        .assert()
        .success()
        .stdout(predicate::str::contains("archive/a.pdf"));

    regdocs(&tmp)
        .env("REGDOCS_DOCS_BASE", "archive")
        .args(["search", "--docs-base", "cli"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cli/a.pdf"));
}

#[test]
fn test_explore_session_from_stdin() {
    let tmp = TempDir::new().expect("tmp");
    let data = write_data(&tmp, LETTERS);

    regdocs(&tmp)
        .args(["explore", "--data"])
        .arg(&data)
        .write_stdin("toggle indication Cardiology\nshow\nfocus year 2020\nclear-all\nbogus\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 of 2 documents match (no filters)"))
        .stdout(predicate::str::contains("1 of 2 documents match (indication=Cardiology)"))
        .stdout(predicate::str::contains("docs/b.pdf"))
        .stdout(predicate::str::contains("1 of 2 documents match (year=2020)"))
        .stdout(predicate::str::contains("error: unknown command 'bogus'"));
}

#[test]
fn test_completions_bash() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("regdocs"));
    cmd.args(["completions", "bash"]);
    cmd.assert().success().stdout(predicate::str::contains("regdocs"));
}
