//! Folds document records into a [`FlowGraph`].
//!
//! Every record expands into rows. Schemes that route through the issue
//! columns produce one row per (category, subcategory) pair, so a record with
//! two categories of three subcategories each contributes six full chains.
//! Other schemes produce one row per record. Each row yields one label per
//! column, and every adjacent pair of labels adds one increment to its edge.

use tracing::debug;

use super::column::{ColumnScheme, ColumnType};
use super::graph::{FlowAccumulator, FlowGraph, NodeKey};
use crate::domain::{label_or_sentinel, DocumentRecord};

/// One chain source: a record, plus the issue pair it was expanded from.
#[derive(Debug, Clone, Copy)]
struct Row<'a> {
    doc: &'a DocumentRecord,
    issue: Option<(&'a str, &'a str)>,
}

impl<'a> Row<'a> {
    fn label(&self, column: ColumnType) -> String {
        let value = match column {
            ColumnType::Category => self.issue.map(|(category, _)| category),
            ColumnType::Subcategory => self.issue.map(|(_, subcategory)| subcategory),
            ColumnType::Indication => self.doc.indication.as_deref(),
            ColumnType::Drug => self.doc.drug_name.as_deref(),
            ColumnType::Company => Some(self.doc.company_name.as_str()),
            ColumnType::Month => Some(self.doc.month.as_str()),
            ColumnType::Outcome => Some(self.doc.outcome.as_str()),
            ColumnType::Year => return self.doc.year_label(),
        };
        label_or_sentinel(value).to_string()
    }
}

fn expand_rows<'a>(doc: &'a DocumentRecord, scheme: &ColumnScheme) -> Vec<Row<'a>> {
    if !scheme.routes_through_issues() {
        return vec![Row { doc, issue: None }];
    }
    doc.issue_categories
        .iter()
        .flat_map(|issue| {
            issue.subcategories.iter().map(move |sub| Row {
                doc,
                issue: Some((issue.category.as_str(), sub.as_str())),
            })
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct FlowGraphBuilder {
    scheme: ColumnScheme,
}

impl FlowGraphBuilder {
    pub fn new(scheme: ColumnScheme) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> &ColumnScheme {
        &self.scheme
    }

    /// Build a fresh graph from `docs`. Nothing is carried over between builds.
    pub fn build<'a, I>(&self, docs: I) -> FlowGraph
    where
        I: IntoIterator<Item = &'a DocumentRecord>,
    {
        let columns = self.scheme.columns();
        let mut acc = FlowAccumulator::new(&self.scheme);
        let mut documents = 0usize;
        let mut rows = 0usize;
        let mut rejected = 0usize;

        for doc in docs {
            documents += 1;
            for row in expand_rows(doc, &self.scheme) {
                rows += 1;
                let chain: Vec<NodeKey> =
                    columns.iter().map(|column| NodeKey::new(*column, row.label(*column))).collect();
                for pair in chain.windows(2) {
                    if let Err(err) = acc.add_link(pair[0].clone(), pair[1].clone()) {
                        rejected += 1;
                        debug!("Skipping flow edge for {}: {}", doc.pdf_name, err);
                    }
                }
            }
        }

        let graph = acc.finish();
        debug!(
            "Built flow graph from {} documents ({} rows): {} nodes, {} edges, {} rejected links",
            documents,
            rows,
            graph.nodes().len(),
            graph.edges().len(),
            rejected
        );
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IssueCategory, NOT_SPECIFIED};

    fn doc(
        company: &str,
        indication: Option<&str>,
        year: i32,
        issues: Vec<IssueCategory>,
    ) -> DocumentRecord {
        DocumentRecord {
            company_name: company.to_string(),
            drug_name: None,
            indication: indication.map(str::to_string),
            year,
            month: "March".to_string(),
            outcome: "Warning Letter".to_string(),
            pdf_name: format!("{company}-{year}.pdf"),
            summary: None,
            issue_categories: issues,
        }
    }

    fn acme_pair() -> Vec<DocumentRecord> {
        vec![
            doc("Acme", Some("Oncology"), 2020, vec![IssueCategory::new("Manufacturing", &["CGMP"])]),
            doc(
                "Acme",
                Some("Cardiology"),
                2021,
                vec![IssueCategory::new("Manufacturing", &["CGMP"])],
            ),
        ]
    }

    fn key(column: ColumnType, name: &str) -> NodeKey {
        NodeKey::new(column, name)
    }

    #[test]
    fn acme_scenario_builds_expected_nodes_and_weights() {
        let graph = FlowGraphBuilder::new(ColumnScheme::issues()).build(&acme_pair());

        let names: Vec<String> = graph.nodes().iter().map(|n| n.key.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "category:Manufacturing",
                "subcategory:CGMP",
                "indication:Cardiology",
                "indication:Oncology",
                "year:2020",
                "year:2021",
                "company:Acme",
            ]
        );

        let cgmp = key(ColumnType::Subcategory, "CGMP");
        assert_eq!(graph.edge_weight(&key(ColumnType::Category, "Manufacturing"), &cgmp), Some(2.0));
        assert_eq!(graph.edge_weight(&cgmp, &key(ColumnType::Indication, "Oncology")), Some(1.0));
        assert_eq!(graph.edge_weight(&cgmp, &key(ColumnType::Indication, "Cardiology")), Some(1.0));
    }

    #[test]
    fn increment_scales_every_weight() {
        let scheme = ColumnScheme::named(crate::flow::SchemeName::Issues, 0.5).unwrap();
        let graph = FlowGraphBuilder::new(scheme).build(&acme_pair());
        let cgmp = key(ColumnType::Subcategory, "CGMP");
        assert_eq!(graph.edge_weight(&key(ColumnType::Category, "Manufacturing"), &cgmp), Some(1.0));
        assert_eq!(graph.edge_weight(&cgmp, &key(ColumnType::Indication, "Oncology")), Some(0.5));
    }

    #[test]
    fn category_subcategory_pairs_fan_out() {
        let docs = vec![doc(
            "Beta",
            Some("Oncology"),
            2022,
            vec![
                IssueCategory::new("Manufacturing", &["CGMP", "Sterility", "Records"]),
                IssueCategory::new("Labeling", &["Claims", "Boxed warning"]),
            ],
        )];
        let graph = FlowGraphBuilder::new(ColumnScheme::issues()).build(&docs);

        // Five rows, so every downstream column pair carries five increments.
        for depth in 0..4 {
            assert_eq!(graph.column_flow(depth), 5.0, "column pair {depth}");
        }
        assert_eq!(
            graph.edge_weight(
                &key(ColumnType::Year, "2022"),
                &key(ColumnType::Company, "Beta")
            ),
            Some(5.0)
        );
    }

    #[test]
    fn records_without_issue_rows_contribute_nothing() {
        let docs = vec![
            doc("Gamma", Some("Oncology"), 2020, vec![]),
            doc("Delta", Some("Oncology"), 2020, vec![IssueCategory::new("Labeling", &[])]),
        ];
        let graph = FlowGraphBuilder::new(ColumnScheme::issues()).build(&docs);
        assert!(graph.is_empty());
        assert!(graph.nodes().is_empty());
    }

    #[test]
    fn issue_free_schemes_still_see_every_record() {
        let docs = vec![doc("Gamma", None, 2020, vec![])];
        let graph = FlowGraphBuilder::new(ColumnScheme::products()).build(&docs);
        assert_eq!(graph.edges().len(), 3);
        assert!(graph.contains_node(&key(ColumnType::Indication, NOT_SPECIFIED)));
        assert!(graph.contains_node(&key(ColumnType::Drug, NOT_SPECIFIED)));
        assert_eq!(graph.column_flow(0), 1.0);
    }

    #[test]
    fn missing_fields_become_sentinels_instead_of_breaking_chains() {
        let docs = vec![doc("", None, 2020, vec![IssueCategory::new("", &["CGMP"])])];
        let graph = FlowGraphBuilder::new(ColumnScheme::issues()).build(&docs);
        assert_eq!(graph.edges().len(), 4);
        assert!(graph.contains_node(&key(ColumnType::Category, NOT_SPECIFIED)));
        assert!(graph.contains_node(&key(ColumnType::Indication, NOT_SPECIFIED)));
        assert!(graph.contains_node(&key(ColumnType::Company, NOT_SPECIFIED)));
    }

    #[test]
    fn edges_only_join_adjacent_columns() {
        let mut docs = acme_pair();
        docs.push(doc(
            "Beta",
            None,
            2019,
            vec![
                IssueCategory::new("Labeling", &["Claims"]),
                IssueCategory::new("Manufacturing", &["CGMP", "Records"]),
            ],
        ));
        let scheme = ColumnScheme::issues();
        let graph = FlowGraphBuilder::new(scheme.clone()).build(&docs);
        for edge in graph.edges() {
            assert!(
                scheme.are_adjacent(edge.source.column, edge.target.column),
                "{} -> {}",
                edge.source,
                edge.target
            );
            assert!(edge.weight > 0.0);
            assert!(graph.contains_node(&edge.source));
            assert!(graph.contains_node(&edge.target));
        }
    }

    #[test]
    fn rebuilding_is_deterministic() {
        let mut docs = acme_pair();
        docs.push(doc("Beta", Some("Oncology"), 2019, vec![IssueCategory::new("Labeling", &["Claims"])]));
        let builder = FlowGraphBuilder::new(ColumnScheme::issues());
        let first = builder.build(&docs);
        let second = builder.build(&docs);
        assert_eq!(first, second);

        docs.reverse();
        let reversed = builder.build(&docs);
        assert_eq!(first, reversed);
    }

    #[test]
    fn build_does_not_mutate_input() {
        let docs = acme_pair();
        let before = docs.clone();
        let _ = FlowGraphBuilder::new(ColumnScheme::issues()).build(&docs);
        assert_eq!(docs, before);
    }
}
