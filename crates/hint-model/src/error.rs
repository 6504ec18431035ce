//! Error types for the hint model.

use std::result;

use thiserror::Error;

use crate::schema::ValidationError;

/// Result type for hint model operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while resolving identifiers or editing a
/// document.
///
/// Placement non-convergence and refused structural edits are not
/// errors: the placer falls back to top-level placement and refused
/// edits are no-ops, both by design.
#[derive(Debug, Error)]
pub enum Error {
    /// Point index beyond the glyph's point count.
    #[error("point index {index} out of range for glyph with {count} points")]
    PointRange { index: usize, count: usize },

    /// Identifier resolution exceeded the recursion limit, which means
    /// the glyph's name table contains a cycle.
    #[error("cyclic identifier: resolving '{name}' exceeded depth limit")]
    CyclicIdentifier { name: String },

    /// A coordinate label or symbolic name with no matching point.
    #[error("unknown point identifier '{0}'")]
    UnknownName(String),

    /// The external schema validator rejected a document.
    #[error("schema validation failed: {0}")]
    Validation(#[from] ValidationError),
}
