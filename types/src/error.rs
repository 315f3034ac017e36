use thiserror::Error;

#[derive(Debug, Error)]
pub enum AddressError {
    #[error("address missing 0x prefix: {0}")]
    MissingPrefix(String),

    #[error("address {address} has {len} hex chars, expected 40")]
    BadLength { address: String, len: usize },

    #[error("address contains non-hex characters: {0}")]
    NonHex(String),
}
