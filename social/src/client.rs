//! HTTP client for the social-graph provider's bulk-user endpoint.

use repdash_types::{AddressSet, Identity, SocialId, WalletAddress};
use serde::Deserialize;
use tracing::debug;

use crate::error::SocialError;

/// Request timeout for the bulk-user lookup.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// A resolved identity together with its address set, as produced by one
/// bulk-user lookup.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedIdentity {
    pub identity: Identity,
    pub addresses: AddressSet,
}

/// HTTP client for the social-graph provider.
pub struct SocialGraphClient {
    /// Base URL of the provider API.
    base_url: String,
    /// API credential sent as a request header.
    api_key: String,
    /// Reusable HTTP client.
    client: reqwest::Client,
}

// ── Wire format ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct BulkUsersResponse {
    #[serde(default)]
    users: Vec<UserRecord>,
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    #[serde(default)]
    username: String,
    #[serde(default)]
    pfp_url: String,
    /// Provider activity/quality score. Absent is not the same as zero:
    /// a brand-new account has no score at all.
    score: Option<f64>,
    follower_count: Option<u64>,
    following_count: Option<u64>,
    custody_address: Option<String>,
    #[serde(default)]
    verified_addresses: VerifiedAddresses,
}

#[derive(Debug, Default, Deserialize)]
struct VerifiedAddresses {
    #[serde(default)]
    eth_addresses: Vec<String>,
}

impl SocialGraphClient {
    /// Create a client for the given provider endpoint and credential.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Resolve one social identifier to a profile and address set.
    ///
    /// Queries the bulk-user endpoint for exactly one identifier. The
    /// custody address is required; verified addresses are appended after
    /// it, deduplicated case-insensitively.
    pub async fn resolve(&self, social_id: SocialId) -> Result<ResolvedIdentity, SocialError> {
        let url = format!("{}/user/bulk?fids={}", self.base_url, social_id);
        let resp = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .header("api_key", &self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| SocialError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(SocialError::Status(resp.status().as_u16()));
        }

        let body: BulkUsersResponse = resp
            .json()
            .await
            .map_err(|e| SocialError::Decode(e.to_string()))?;

        let record = body
            .users
            .into_iter()
            .next()
            .ok_or(SocialError::UserNotFound(social_id.as_u64()))?;

        resolve_record(social_id, record)
    }
}

/// Reduce one user record to a resolved identity and address set.
fn resolve_record(
    social_id: SocialId,
    record: UserRecord,
) -> Result<ResolvedIdentity, SocialError> {
    let custody_raw = record
        .custody_address
        .ok_or(SocialError::MissingCustodyAddress)?;
    let custody = WalletAddress::parse(custody_raw)
        .map_err(|e| SocialError::Decode(e.to_string()))?;

    // Malformed verified addresses are dropped rather than failing the
    // whole resolution; the custody address alone is enough to proceed.
    let verified = record
        .verified_addresses
        .eth_addresses
        .into_iter()
        .filter_map(|raw| match WalletAddress::parse(raw) {
            Ok(addr) => Some(addr),
            Err(e) => {
                debug!("skipping malformed verified address: {e}");
                None
            }
        });

    let addresses = AddressSet::from_parts(custody, verified);

    Ok(ResolvedIdentity {
        identity: Identity {
            social_id,
            handle: record.username,
            avatar_url: record.pfp_url,
            activity_score: record.score,
            follower_count: record.follower_count,
            following_count: record.following_count,
        },
        addresses,
    })
}
