//! Error types for Hangar core.

use std::{error::Error, fmt};

/// Error type for Hangar core operations.
#[derive(Debug, Clone, PartialEq)]
pub enum HangarError {
    /// A supplied field failed its validation rule.
    InvalidField {
        /// Wire name of the rejected field.
        field: &'static str,
    },
    /// No ship exists with the given identifier.
    NotFound(i64),
    /// The requested page starts beyond the end of the result set.
    PageOutOfRange {
        /// Index of the first item on the requested page.
        from: usize,
        /// Number of items available.
        len: usize,
    },
    /// The backing store failed.
    Store(String),
}

impl HangarError {
    /// Build an [`HangarError::InvalidField`] for the named field.
    pub fn invalid_field(field: &'static str) -> Self {
        Self::InvalidField { field }
    }

    /// Build an [`HangarError::Store`] from any displayable failure.
    pub fn store(err: impl fmt::Display) -> Self {
        Self::Store(err.to_string())
    }
}

impl fmt::Display for HangarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidField { field } => write!(f, "invalid value for field `{field}`"),
            Self::NotFound(id) => write!(f, "ship {id} not found"),
            Self::PageOutOfRange { from, len } => {
                write!(f, "page starts at index {from} but only {len} ships matched")
            }
            Self::Store(message) => write!(f, "store error: {message}"),
        }
    }
}

impl Error for HangarError {}

/// Convenience result type for Hangar core.
pub type Result<T> = std::result::Result<T, HangarError>;
