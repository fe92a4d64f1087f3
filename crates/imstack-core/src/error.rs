// crates/imstack-core/src/error.rs
use crate::{NodeId, Orientation};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("node {id}: fixed {axis} size {size} is smaller than its padding and border ({insets})")]
    InsetsExceedFixedSize {
        id: NodeId,
        axis: Orientation,
        size: f32,
        insets: f32,
    },

    #[error("node {id}: stretched along the {axis} axis with invalid unit size {unit}")]
    InvalidUnitSize {
        id: NodeId,
        axis: Orientation,
        unit: f32,
    },

    #[error("duplicate id {id} under group {parent}")]
    DuplicateId { parent: NodeId, id: NodeId },

    #[error("end_layout_group called with only the root group on the stack")]
    StackUnderflow,

    #[error("{open} layout group(s) still open when layout was requested")]
    UnbalancedGroups { open: usize },

    #[error("group stack no longer matches the tree being built")]
    StackMismatch,

    #[error("layout engine is unusable after an earlier error: {0}")]
    Poisoned(Box<LayoutError>),
}

impl LayoutError {
    /// Errors caused by node constraints that can never be satisfied.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            LayoutError::InsetsExceedFixedSize { .. }
                | LayoutError::InvalidUnitSize { .. }
                | LayoutError::DuplicateId { .. }
        )
    }

    /// Errors caused by calling the build API out of order.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            LayoutError::StackUnderflow | LayoutError::UnbalancedGroups { .. } | LayoutError::StackMismatch
        )
    }

    /// The node the error is about, if any.
    pub fn node_id(&self) -> Option<NodeId> {
        match self {
            LayoutError::InsetsExceedFixedSize { id, .. }
            | LayoutError::InvalidUnitSize { id, .. }
            | LayoutError::DuplicateId { id, .. } => Some(*id),
            LayoutError::Poisoned(inner) => inner.node_id(),
            _ => None,
        }
    }

    /// The error that first poisoned the engine.
    pub fn root_cause(&self) -> &LayoutError {
        match self {
            LayoutError::Poisoned(inner) => inner.root_cause(),
            other => other,
        }
    }
}
