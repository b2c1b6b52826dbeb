//! Checker error types.

use thiserror::Error;

/// Failures that abort a check run.
///
/// Rule violations are never errors; they are returned as diagnostics.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The traversal broke the function-stack invariant. Diagnostics
    /// gathered so far cannot be trusted.
    #[error("Internal consistency failure: {0}")]
    InternalConsistency(String),
}
