use thiserror::Error;

#[derive(Debug, Error)]
pub enum SocialError {
    #[error("social graph request failed: {0}")]
    Http(String),

    #[error("social graph returned HTTP {0}")]
    Status(u16),

    #[error("social graph response could not be decoded: {0}")]
    Decode(String),

    #[error("no user record for social id {0}")]
    UserNotFound(u64),

    #[error("user record has no custody address")]
    MissingCustodyAddress,
}
