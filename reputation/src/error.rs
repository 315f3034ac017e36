use thiserror::Error;

/// Errors on the fallible inner fetch paths. The public aggregation
/// surface converts all of these into neutral zero contributions — a
/// missing score is valid data, not a failure.
#[derive(Debug, Error)]
pub enum ReputationError {
    #[error("scoring provider request failed: {0}")]
    Http(String),

    #[error("scoring provider returned HTTP {0}")]
    Status(u16),

    #[error("scoring provider response could not be decoded: {0}")]
    Decode(String),
}
