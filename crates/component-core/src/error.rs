//! Error types for component composition

use thiserror::Error;

/// Errors reported by ownership-transfer operations.
///
/// Absence (`get`, `remove`, `separate` on an empty slot) is not an error and
/// is reported through `Option`/`bool` return values instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentError {
    #[error("Component {type_name} is already attached to a parent")]
    AlreadyAttached { type_name: &'static str },

    #[error("Attaching {type_name} would make it an ancestor of itself")]
    CycleDetected { type_name: &'static str },
}

impl ComponentError {
    /// Type name of the component the failed operation was about.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::AlreadyAttached { type_name } | Self::CycleDetected { type_name } => type_name,
        }
    }
}
