//! Core error taxonomy

use thiserror::Error;

use crate::core::material::MaterialId;

/// Errors surfaced by the store, cost engine, and mutation API.
///
/// All of these are validation failures: nothing is retryable, no partial
/// mutation is ever committed, and the store stays usable after any of them.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Malformed or out-of-range input
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Unknown id or out-of-range line index
    #[error("not found: {0}")]
    NotFound(String),

    /// Proposed BOM line would let a material contain itself
    #[error("material {component} already contains material {parent}; adding it would create a cycle")]
    CycleDetected {
        parent: MaterialId,
        component: MaterialId,
    },
}

impl CoreError {
    pub(crate) fn unknown_material(id: MaterialId) -> Self {
        CoreError::NotFound(format!("material {}", id))
    }

    pub(crate) fn unknown_line(parent: MaterialId, index: usize) -> Self {
        CoreError::NotFound(format!("line item {} of material {}", index, parent))
    }
}
