use thiserror::Error;

/// Extraction failure.
///
/// Extraction is pure and deterministic, so there is no retry surface:
/// a failure is reported once, with no partial synthetic document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The input tree violates the node-model invariants.
    #[error("malformed template tree at line {line}: {reason}")]
    MalformedTree { line: u32, reason: String },
}
