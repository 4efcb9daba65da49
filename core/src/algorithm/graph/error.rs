//! Error taxonomy for augmentation and flow computation
//!
//! Usage errors (double augmentation, rollback of a clean graph, unknown
//! vertices) and data errors (negative capacities) are all fatal to the call
//! that detects them. Nothing is retried. An unreachable sink is not an
//! error: it is the normal termination of the flow search.

use crate::algorithm::traits::AlgorithmError;

/// Flow algorithm errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FlowError {
    #[error("Vertex not found in graph: {0}")]
    VertexNotFound(String),

    #[error("Negative capacity {capacity} on edge {edge}")]
    NegativeCapacity { edge: String, capacity: f64 },

    #[error("Capacity {capacity} on edge {edge} is not a finite number")]
    InvalidCapacity { edge: String, capacity: f64 },

    #[error("Source and sink must be distinct vertices")]
    SourceEqualsSink,

    #[error("No source vertex has been set")]
    MissingSource,

    #[error("No sink vertex has been set")]
    MissingSink,

    #[error("Graph already augmented")]
    AlreadyAugmented,

    #[error("Graph is not augmented")]
    NotAugmented,

    #[error("Graph already balanced")]
    AlreadyBalanced,

    #[error("Graph is not balanced")]
    NotBalanced,

    #[error("Vertex factory produced a vertex already in the graph: {0}")]
    VertexRejected(String),

    #[error("Graph refused synthetic edge: {0}")]
    EdgeRejected(String),

    #[error(transparent)]
    Parameter(#[from] AlgorithmError),
}

impl FlowError {
    pub(crate) fn vertex_not_found<V: std::fmt::Debug>(vertex: &V) -> Self {
        FlowError::VertexNotFound(format!("{:?}", vertex))
    }

    /// Negative capacities and non-finite ones get distinct variants
    pub(crate) fn capacity<E: std::fmt::Debug>(edge: &E, capacity: f64) -> Option<Self> {
        let edge = format!("{:?}", edge);
        if !capacity.is_finite() {
            Some(FlowError::InvalidCapacity { edge, capacity })
        } else if capacity < 0.0 {
            Some(FlowError::NegativeCapacity { edge, capacity })
        } else {
            None
        }
    }

    pub(crate) fn vertex_rejected<V: std::fmt::Debug>(vertex: &V) -> Self {
        FlowError::VertexRejected(format!("{:?}", vertex))
    }

    pub(crate) fn edge_rejected<E: std::fmt::Debug>(edge: &E) -> Self {
        FlowError::EdgeRejected(format!("{:?}", edge))
    }

    /// True for programmer errors, false for bad caller data
    pub fn is_usage_error(&self) -> bool {
        !matches!(
            self,
            FlowError::NegativeCapacity { .. } | FlowError::InvalidCapacity { .. }
        )
    }
}
