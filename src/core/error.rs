use thiserror::Error;

/// Errors raised by the matching engine
///
/// Every variant is fatal to the single request that produced it. The engine
/// is deterministic, so retrying an identical computation changes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Feature vector dimension mismatch: {left} vs {right} (vocabulary changed between encodings)")]
    DimensionMismatch { left: usize, right: usize },
}
