use thiserror::Error;

use super::ColumnType;

pub type Result<T> = std::result::Result<T, FlowError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    #[error("Unknown column type '{0}'")]
    UnknownColumn(String),

    #[error("Unknown flow scheme '{0}' (expected issues or products)")]
    UnknownScheme(String),

    #[error("A flow scheme needs at least two columns, got {0}")]
    TooFewColumns(usize),

    #[error("Column '{0}' appears more than once in the flow scheme")]
    DuplicateColumn(ColumnType),

    #[error("Edge increment must be a positive finite number, got {0}")]
    InvalidIncrement(f64),

    #[error("Refusing edge with an empty {0} node name")]
    EmptyNodeName(ColumnType),

    #[error("Refusing self-loop on {column}:{name}")]
    SelfLoop { column: ColumnType, name: String },

    #[error("Columns {source_column} -> {target_column} are not adjacent in the flow scheme")]
    NonAdjacent { source_column: ColumnType, target_column: ColumnType },
}
