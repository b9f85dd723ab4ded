//! Categorical flow (Sankey) graph construction

pub mod builder;
pub mod column;
pub mod error;
pub mod graph;

pub use builder::FlowGraphBuilder;
pub use column::{ColumnScheme, ColumnType, SchemeName, DEFAULT_INCREMENT};
pub use error::FlowError;
pub use graph::{FlowEdge, FlowGraph, FlowNode, NodeKey};
