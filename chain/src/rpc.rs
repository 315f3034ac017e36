//! JSON-RPC client for address-based chain reads.

use repdash_types::WalletAddress;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ChainError;

/// Per-request timeout for single RPC calls.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Overall deadline for the receipt wait. The one place the workflow
/// applies an explicit long timeout: after this the boost is reported as
/// failed/unknown rather than hanging.
pub const RECEIPT_WAIT_SECS: u64 = 60;

/// Interval between receipt polls.
const RECEIPT_POLL_INTERVAL: std::time::Duration = std::time::Duration::from_secs(3);

/// Read-side chain access. The seam lets tests drive the boost state
/// machine with a fake chain instead of a live RPC endpoint.
pub trait ChainReader {
    /// Transaction count (nonce) for an address.
    fn transaction_count(
        &self,
        address: &WalletAddress,
    ) -> impl std::future::Future<Output = Result<u64, ChainError>> + Send;

    /// Wait for a transaction receipt, bounded by [`RECEIPT_WAIT_SECS`].
    fn wait_for_receipt(
        &self,
        tx_hash: &str,
    ) -> impl std::future::Future<Output = Result<TransactionReceipt, ChainError>> + Send;
}

/// A mined transaction receipt; only the success flag is consumed.
#[derive(Clone, Debug, Deserialize)]
pub struct TransactionReceipt {
    #[serde(rename = "transactionHash")]
    pub transaction_hash: String,
    /// "0x1" on success, "0x0" on revert.
    pub status: Option<String>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status.as_deref() == Some("0x1")
    }
}

// ── Wire format ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// JSON-RPC client over a single HTTP endpoint.
pub struct RpcClient {
    url: String,
    client: reqwest::Client,
}

impl RpcClient {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<Option<T>, ChainError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let resp = self
            .client
            .post(&self.url)
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| ChainError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ChainError::Status(resp.status().as_u16()));
        }

        let parsed: JsonRpcResponse<T> = resp
            .json()
            .await
            .map_err(|e| ChainError::Decode(e.to_string()))?;

        if let Some(err) = parsed.error {
            return Err(ChainError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        Ok(parsed.result)
    }
}

impl ChainReader for RpcClient {
    async fn transaction_count(&self, address: &WalletAddress) -> Result<u64, ChainError> {
        let result: Option<String> = self
            .call(
                "eth_getTransactionCount",
                json!([address.normalized(), "latest"]),
            )
            .await?;
        let quantity = result.ok_or_else(|| ChainError::BadQuantity("null".into()))?;
        parse_quantity(&quantity)
    }

    async fn wait_for_receipt(&self, tx_hash: &str) -> Result<TransactionReceipt, ChainError> {
        let deadline = std::time::Duration::from_secs(RECEIPT_WAIT_SECS);
        let poll = async {
            loop {
                let receipt: Option<TransactionReceipt> = self
                    .call("eth_getTransactionReceipt", json!([tx_hash]))
                    .await?;
                if let Some(receipt) = receipt {
                    return Ok(receipt);
                }
                tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
            }
        };
        tokio::time::timeout(deadline, poll)
            .await
            .map_err(|_| ChainError::ReceiptTimeout(RECEIPT_WAIT_SECS))?
    }
}

/// Decode a 0x-prefixed hex quantity into a u64.
pub fn parse_quantity(raw: &str) -> Result<u64, ChainError> {
    let digits = raw
        .strip_prefix("0x")
        .ok_or_else(|| ChainError::BadQuantity(raw.to_string()))?;
    if digits.is_empty() {
        return Err(ChainError::BadQuantity(raw.to_string()));
    }
    u64::from_str_radix(digits, 16).map_err(|_| ChainError::BadQuantity(raw.to_string()))
}
