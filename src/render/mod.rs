//! Output rendering (result listings, flow exports, JSONL, reports)

pub mod facets;
pub mod flow;
pub mod jsonl;
pub mod report;
pub mod results;

pub use facets::{facets_json, render_facets};
pub use flow::{render_flow_table, sankey_json, NO_FLOW_DATA};
pub use jsonl::render_jsonl;
pub use report::{build_report, write_report};
pub use results::{document_link, render_results, NO_MATCHES};
