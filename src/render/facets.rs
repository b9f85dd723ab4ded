//! Facet listings for filter pickers.

use serde_json::{Map, Value};

use crate::store::Facets;
use crate::utils::{max_width, pad_to_width};

pub fn render_facets(facets: &Facets) -> String {
    let labels: Vec<String> = facets
        .iter()
        .map(|(dimension, values)| format!("{} ({})", dimension, values.len()))
        .collect();
    let width = max_width(labels.iter().map(String::as_str));

    let mut out = String::new();
    for ((_, values), label) in facets.iter().zip(&labels) {
        let shown = if values.is_empty() { "-".to_string() } else { values.join(", ") };
        out.push_str(&format!("{} : {}\n", pad_to_width(label, width), shown));
    }
    out
}

pub fn facets_json(facets: &Facets) -> Value {
    let mut map = Map::new();
    for (dimension, values) in facets.iter() {
        map.insert(
            dimension.as_str().to_string(),
            Value::Array(values.iter().cloned().map(Value::String).collect()),
        );
    }
    Value::Object(map)
}
