use thiserror::Error;

#[derive(Debug, Error)]
pub enum AttestationError {
    #[error("attestation registry request failed: {0}")]
    Http(String),

    #[error("attestation registry returned HTTP {0}")]
    Status(u16),

    #[error("attestation response could not be decoded: {0}")]
    Decode(String),

    #[error("attestation query rejected: {0}")]
    Query(String),
}
