//! Plain-text listing of matching documents.

use crate::domain::DocumentRecord;

pub const NO_MATCHES: &str = "No matching documents found.";

/// Link target for a document under the configured base directory.
pub fn document_link(docs_base: &str, doc: &DocumentRecord) -> String {
    let base = docs_base.trim_end_matches('/');
    if base.is_empty() {
        doc.pdf_name.clone()
    } else {
        format!("{}/{}", base, doc.pdf_name)
    }
}

pub fn render_results(docs: &[&DocumentRecord], docs_base: &str) -> String {
    if docs.is_empty() {
        return format!("{NO_MATCHES}\n");
    }

    let mut out = format!("Documents Found : {}\n", docs.len());
    for doc in docs {
        out.push('\n');
        out.push_str(&format!("{}\n", doc.pdf_name));
        out.push_str(&format!(
            "  {} | {} | {}\n",
            doc.drug_label(),
            doc.company_label(),
            doc.indication_label()
        ));
        out.push_str(&format!("  {} | {}\n", doc.period(), doc.outcome_label()));
        out.push_str(&format!("  {}\n", document_link(docs_base, doc)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn doc(name: &str, drug: Option<&str>) -> DocumentRecord {
        DocumentRecord {
            company_name: "Acme".to_string(),
            drug_name: drug.map(str::to_string),
            indication: None,
            year: 2020,
            month: "March".to_string(),
            outcome: "Warning Letter".to_string(),
            pdf_name: name.to_string(),
            summary: None,
            issue_categories: vec![],
        }
    }

    #[test]
    fn lists_each_document_with_its_link() {
        let a = doc("a.pdf", Some("Axo"));
        let b = doc("b.pdf", None);
        let rendered = render_results(&[&a, &b], "docs/");
        assert_eq!(
            rendered,
            "Documents Found : 2\n\
             \n\
             a.pdf\n  Axo | Acme | Not Specified\n  March 2020 | Warning Letter\n  docs/a.pdf\n\
             \n\
             b.pdf\n  Not Specified | Acme | Not Specified\n  March 2020 | Warning Letter\n  docs/b.pdf\n"
        );
    }

    #[test]
    fn empty_listing_prints_placeholder() {
        assert_eq!(render_results(&[], "docs"), "No matching documents found.\n");
    }

    #[test]
    fn empty_base_links_bare_name() {
        assert_eq!(document_link("", &doc("x.pdf", None)), "x.pdf");
    }
}
