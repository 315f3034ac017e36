use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("rpc request failed: {0}")]
    Http(String),

    #[error("rpc returned HTTP {0}")]
    Status(u16),

    #[error("rpc response could not be decoded: {0}")]
    Decode(String),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("malformed quantity in rpc response: {0}")]
    BadQuantity(String),

    #[error("no receipt within {0} seconds")]
    ReceiptTimeout(u64),
}
