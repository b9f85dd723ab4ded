//! Column-typed nodes and weighted edges produced by the builder.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::column::{ColumnScheme, ColumnType};
use super::error::{FlowError, Result};

/// Composite node identity. The same name in two columns is two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeKey {
    pub column: ColumnType,
    pub name: String,
}

impl NodeKey {
    pub fn new(column: ColumnType, name: impl Into<String>) -> Self {
        Self { column, name: name.into() }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.column, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowNode {
    pub key: NodeKey,
    /// Position of the node's column in the scheme (0 = leftmost).
    pub depth: usize,
    /// Larger of total inflow and total outflow.
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowEdge {
    pub source: NodeKey,
    pub target: NodeKey,
    pub weight: f64,
}

/// Result of one build. Nodes are grouped by column in scheme order and
/// sorted by name inside a column; edges are sorted by source then target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowGraph {
    columns: Vec<ColumnType>,
    increment: f64,
    nodes: Vec<FlowNode>,
    edges: Vec<FlowEdge>,
}

impl FlowGraph {
    pub fn columns(&self) -> &[ColumnType] {
        &self.columns
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    pub fn nodes(&self) -> &[FlowNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains_node(&self, key: &NodeKey) -> bool {
        self.index_of(key).is_some()
    }

    pub fn index_of(&self, key: &NodeKey) -> Option<usize> {
        self.nodes.iter().position(|n| &n.key == key)
    }

    pub fn edge_weight(&self, source: &NodeKey, target: &NodeKey) -> Option<f64> {
        self.edges
            .iter()
            .find(|e| &e.source == source && &e.target == target)
            .map(|e| e.weight)
    }

    /// Total weight flowing from column `depth` into column `depth + 1`.
    pub fn column_flow(&self, depth: usize) -> f64 {
        let Some(column) = self.columns.get(depth) else {
            return 0.0;
        };
        self.edges.iter().filter(|e| e.source.column == *column).map(|e| e.weight).sum()
    }
}

/// Per-build registry: one deduplicating name set per column plus the
/// additive edge map.
pub(crate) struct FlowAccumulator<'s> {
    scheme: &'s ColumnScheme,
    registry: Vec<BTreeSet<String>>,
    edges: BTreeMap<(NodeKey, NodeKey), f64>,
}

impl<'s> FlowAccumulator<'s> {
    pub(crate) fn new(scheme: &'s ColumnScheme) -> Self {
        Self {
            scheme,
            registry: vec![BTreeSet::new(); scheme.columns().len()],
            edges: BTreeMap::new(),
        }
    }

    fn register(&mut self, key: &NodeKey) {
        if let Some(depth) = self.scheme.position(key.column) {
            self.registry[depth].insert(key.name.clone());
        }
    }

    /// Get-or-create both endpoints and the edge, then add one increment.
    pub(crate) fn add_link(&mut self, source: NodeKey, target: NodeKey) -> Result<f64> {
        if source == target {
            return Err(FlowError::SelfLoop { column: source.column, name: source.name });
        }
        if source.name.trim().is_empty() {
            return Err(FlowError::EmptyNodeName(source.column));
        }
        if target.name.trim().is_empty() {
            return Err(FlowError::EmptyNodeName(target.column));
        }
        if !self.scheme.are_adjacent(source.column, target.column) {
            return Err(FlowError::NonAdjacent {
                source_column: source.column,
                target_column: target.column,
            });
        }

        self.register(&source);
        self.register(&target);

        let weight = self.edges.entry((source, target)).or_insert(0.0);
        *weight += self.scheme.increment();
        Ok(*weight)
    }

    pub(crate) fn finish(self) -> FlowGraph {
        let mut inflow: BTreeMap<&NodeKey, f64> = BTreeMap::new();
        let mut outflow: BTreeMap<&NodeKey, f64> = BTreeMap::new();
        for ((source, target), weight) in &self.edges {
            *outflow.entry(source).or_insert(0.0) += weight;
            *inflow.entry(target).or_insert(0.0) += weight;
        }

        let mut nodes = Vec::new();
        for (depth, names) in self.registry.iter().enumerate() {
            let column = self.scheme.columns()[depth];
            for name in names {
                let key = NodeKey::new(column, name.clone());
                let value = inflow
                    .get(&key)
                    .copied()
                    .unwrap_or(0.0)
                    .max(outflow.get(&key).copied().unwrap_or(0.0));
                nodes.push(FlowNode { key, depth, value });
            }
        }

        let scheme = self.scheme;
        let mut edges: Vec<FlowEdge> = self
            .edges
            .iter()
            .map(|((source, target), weight)| FlowEdge {
                source: source.clone(),
                target: target.clone(),
                weight: *weight,
            })
            .collect();
        edges.sort_by(|a, b| {
            scheme
                .position(a.source.column)
                .cmp(&scheme.position(b.source.column))
                .then_with(|| a.source.name.cmp(&b.source.name))
                .then_with(|| a.target.name.cmp(&b.target.name))
        });

        FlowGraph {
            columns: scheme.columns().to_vec(),
            increment: scheme.increment(),
            nodes,
            edges,
        }
    }
}
