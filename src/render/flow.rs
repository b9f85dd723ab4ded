//! Flow graph export: d3-sankey JSON and a plain-text edge table.

use serde_json::{json, Value};
use std::collections::HashMap;

use crate::flow::{FlowGraph, NodeKey};
use crate::utils::{max_width, pad_to_width};

pub const NO_FLOW_DATA: &str = "No data available for flow diagram";

/// `{nodes: [{name, type, color, value}], links: [{source, target, value}]}`
/// with links referring to nodes by index, as d3-sankey expects.
pub fn sankey_json(graph: &FlowGraph) -> Value {
    let index: HashMap<&NodeKey, usize> =
        graph.nodes().iter().enumerate().map(|(i, n)| (&n.key, i)).collect();

    let nodes: Vec<Value> = graph
        .nodes()
        .iter()
        .map(|node| {
            json!({
                "name": node.key.name,
                "type": node.key.column.as_str(),
                "color": node.key.column.color(),
                "depth": node.depth,
                "value": node.value,
            })
        })
        .collect();

    let links: Vec<Value> = graph
        .edges()
        .iter()
        .filter_map(|edge| {
            let source = index.get(&edge.source)?;
            let target = index.get(&edge.target)?;
            Some(json!({ "source": source, "target": target, "value": edge.weight }))
        })
        .collect();

    json!({
        "columns": graph.columns().iter().map(|c| c.as_str()).collect::<Vec<_>>(),
        "nodes": nodes,
        "links": links,
    })
}

/// One line per edge, grouped by column pair.
pub fn render_flow_table(graph: &FlowGraph) -> String {
    if graph.is_empty() {
        return format!("{NO_FLOW_DATA}\n");
    }

    let sources: Vec<String> = graph.edges().iter().map(|e| e.source.to_string()).collect();
    let targets: Vec<String> = graph.edges().iter().map(|e| e.target.to_string()).collect();
    let source_width = max_width(sources.iter().map(String::as_str));
    let target_width = max_width(targets.iter().map(String::as_str));

    let header: Vec<&str> = graph.columns().iter().map(|c| c.as_str()).collect();
    let mut out = format!("Flow: {}\n", header.join(" -> "));
    out.push_str(&format!(
        "{} nodes, {} links\n",
        graph.nodes().len(),
        graph.edges().len()
    ));

    let mut current = None;
    for ((edge, source), target) in graph.edges().iter().zip(&sources).zip(&targets) {
        if current != Some(edge.source.column) {
            current = Some(edge.source.column);
            out.push('\n');
        }
        out.push_str(&format!(
            "{}  ->  {}  {}\n",
            pad_to_width(source, source_width),
            pad_to_width(target, target_width),
            edge.weight
        ));
    }
    out
}
