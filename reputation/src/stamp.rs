//! Stamp/anti-sybil scoring provider (provider A).
//!
//! One request per address; the per-address results are reduced via `max`.
//! A wallet with no recorded score is common and valid — it contributes
//! `0.0` to the reduction instead of failing it.

use futures_util::future::join_all;
use repdash_types::{AddressSet, WalletAddress};
use serde::Deserialize;
use tracing::debug;

use crate::aggregate::max_stamp_score;
use crate::error::ReputationError;

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// HTTP client for the stamp scoring provider.
pub struct StampClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

// ── Wire format ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct StampResponse {
    score: Option<ScoreValue>,
}

/// The provider is inconsistent about numeric encoding: some deployments
/// return a JSON number, others a decimal string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScoreValue {
    Number(f64),
    Text(String),
}

impl ScoreValue {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl StampClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Maximum non-zero score across all addresses in the set.
    ///
    /// All per-address requests run concurrently; every failure contributes
    /// a neutral zero. An all-zero result reports `None` so the UI can
    /// invite the user to create a score rather than implying an outage.
    pub async fn max_score(&self, addresses: &AddressSet) -> Option<f64> {
        let fetches = addresses.iter().map(|addr| self.score_for(addr));
        let scores: Vec<f64> = join_all(fetches).await;
        max_stamp_score(&scores)
    }

    /// Score for one address; any failure reads as zero.
    pub async fn score_for(&self, address: &WalletAddress) -> f64 {
        match self.try_score_for(address).await {
            Ok(Some(score)) => score,
            Ok(None) => 0.0,
            Err(e) => {
                debug!("stamp score lookup for {address} failed: {e}");
                0.0
            }
        }
    }

    /// Fallible per-address lookup. `Ok(None)` means the provider has no
    /// score recorded for this wallet.
    async fn try_score_for(
        &self,
        address: &WalletAddress,
    ) -> Result<Option<f64>, ReputationError> {
        let url = format!("{}/score/{}", self.base_url, address.normalized());
        let resp = self
            .client
            .get(&url)
            .header("x-api-key", &self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| ReputationError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ReputationError::Status(resp.status().as_u16()));
        }

        let body: StampResponse = resp
            .json()
            .await
            .map_err(|e| ReputationError::Decode(e.to_string()))?;

        Ok(body.score.as_ref().and_then(ScoreValue::as_f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_score_decodes() {
        let resp: StampResponse = serde_json::from_str(r#"{"score": 3.5}"#).unwrap();
        assert_eq!(resp.score.unwrap().as_f64(), Some(3.5));
    }

    #[test]
    fn string_score_decodes() {
        let resp: StampResponse = serde_json::from_str(r#"{"score": "27.431"}"#).unwrap();
        assert_eq!(resp.score.unwrap().as_f64(), Some(27.431));
    }

    #[test]
    fn null_score_decodes_as_absent() {
        let resp: StampResponse = serde_json::from_str(r#"{"score": null}"#).unwrap();
        assert!(resp.score.is_none());
    }

    #[test]
    fn garbage_string_score_reads_as_absent() {
        let resp: StampResponse = serde_json::from_str(r#"{"score": "n/a"}"#).unwrap();
        assert_eq!(resp.score.unwrap().as_f64(), None);
    }

    #[tokio::test]
    async fn unreachable_provider_scores_zero() {
        let client = StampClient::new("http://127.0.0.1:1", "key");
        let addr =
            WalletAddress::parse("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa").unwrap();
        assert_eq!(client.score_for(&addr).await, 0.0);
    }

    #[tokio::test]
    async fn unreachable_provider_reports_no_data_over_set() {
        let client = StampClient::new("http://127.0.0.1:1", "key");
        let set = AddressSet::from_parts(
            WalletAddress::parse("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa").unwrap(),
            vec![],
        );
        assert_eq!(client.max_score(&set).await, None);
    }
}
