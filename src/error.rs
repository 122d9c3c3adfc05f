//! Error types for table construction and growth.

use thiserror::Error;

/// Failures reported by `ChainTable`.
///
/// A missing key is not an error: lookups return `None`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// A slot array or an owned key could not be reserved. The table is
    /// unchanged.
    #[error("failed to allocate {size} {unit}")]
    AllocationFailure { size: usize, unit: &'static str },
    /// Degenerate capacity or load factor.
    #[error("invalid table configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

impl TableError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        TableError::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    pub(crate) fn slots(size: usize) -> Self {
        TableError::AllocationFailure {
            size,
            unit: "slots",
        }
    }

    pub(crate) fn key_bytes(size: usize) -> Self {
        TableError::AllocationFailure {
            size,
            unit: "key bytes",
        }
    }
}
