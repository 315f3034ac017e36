//! Dashboard configuration with TOML file and environment support.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Configuration for one dashboard session.
///
/// Can be loaded from a TOML file via [`DashboardConfig::from_toml_file`],
/// overlaid with environment variables via
/// [`DashboardConfig::apply_env`], or built programmatically (e.g. for
/// tests). Credentials are all optional: a missing credential disables
/// the corresponding integration without error.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Social-graph provider API base URL.
    #[serde(default = "default_social_url")]
    pub social_api_url: String,

    /// Social-graph API credential. Absent → identity stays unresolved.
    #[serde(default)]
    pub social_api_key: Option<String>,

    /// Attestation registry GraphQL endpoint.
    #[serde(default = "default_attestation_url")]
    pub attestation_url: String,

    /// Stamp scoring provider base URL.
    #[serde(default = "default_stamp_url")]
    pub stamp_api_url: String,

    /// Stamp scoring provider credential. Absent → provider disabled.
    #[serde(default)]
    pub stamp_api_key: Option<String>,

    /// Builder scoring provider base URL.
    #[serde(default = "default_builder_url")]
    pub builder_api_url: String,

    /// Builder scoring provider credential. Absent → provider disabled.
    #[serde(default)]
    pub builder_api_key: Option<String>,

    /// Chain JSON-RPC endpoint.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Gas-sponsorship relay endpoint, if any.
    #[serde(default)]
    pub paymaster_url: Option<String>,

    /// Active chain id.
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    /// The fixed boost contract address.
    #[serde(default = "default_boost_contract")]
    pub boost_contract: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_social_url() -> String {
    "https://api.social.example/v2/farcaster".to_string()
}

fn default_attestation_url() -> String {
    "https://attest.example/graphql".to_string()
}

fn default_stamp_url() -> String {
    "https://stamps.example/registry".to_string()
}

fn default_builder_url() -> String {
    "https://builders.example/api/v2".to_string()
}

fn default_rpc_url() -> String {
    "https://mainnet.base.org".to_string()
}

fn default_chain_id() -> u64 {
    8453
}

fn default_boost_contract() -> String {
    "0x4fba95e4772be6d37a0c931d00570fe2c9675524".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl DashboardConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, SessionError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SessionError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, SessionError> {
        toml::from_str(s).map_err(|e| SessionError::Config(e.to_string()))
    }

    /// Overlay credentials and endpoints from the environment. Set
    /// variables win over the file/base values.
    pub fn apply_env(mut self) -> Self {
        let overlay = |target: &mut String, var: &str| {
            if let Ok(v) = std::env::var(var) {
                *target = v;
            }
        };
        let overlay_opt = |target: &mut Option<String>, var: &str| {
            if let Ok(v) = std::env::var(var) {
                if !v.is_empty() {
                    *target = Some(v);
                }
            }
        };

        overlay(&mut self.social_api_url, "REPDASH_SOCIAL_API_URL");
        overlay_opt(&mut self.social_api_key, "REPDASH_SOCIAL_API_KEY");
        overlay(&mut self.attestation_url, "REPDASH_ATTESTATION_URL");
        overlay(&mut self.stamp_api_url, "REPDASH_STAMP_API_URL");
        overlay_opt(&mut self.stamp_api_key, "REPDASH_STAMP_API_KEY");
        overlay(&mut self.builder_api_url, "REPDASH_BUILDER_API_URL");
        overlay_opt(&mut self.builder_api_key, "REPDASH_BUILDER_API_KEY");
        overlay(&mut self.rpc_url, "REPDASH_RPC_URL");
        overlay_opt(&mut self.paymaster_url, "REPDASH_PAYMASTER_URL");
        if let Ok(v) = std::env::var("REPDASH_CHAIN_ID") {
            if let Ok(id) = v.parse() {
                self.chain_id = id;
            }
        }
        overlay(&mut self.boost_contract, "REPDASH_BOOST_CONTRACT");
        overlay(&mut self.log_level, "REPDASH_LOG_LEVEL");
        self
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            social_api_url: default_social_url(),
            social_api_key: None,
            attestation_url: default_attestation_url(),
            stamp_api_url: default_stamp_url(),
            stamp_api_key: None,
            builder_api_url: default_builder_url(),
            builder_api_key: None,
            rpc_url: default_rpc_url(),
            paymaster_url: None,
            chain_id: default_chain_id(),
            boost_contract: default_boost_contract(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = DashboardConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serializable");
        let parsed = DashboardConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.chain_id, config.chain_id);
        assert_eq!(parsed.rpc_url, config.rpc_url);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = DashboardConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.chain_id, 8453);
        assert!(config.social_api_key.is_none());
        assert!(config.paymaster_url.is_none());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            chain_id = 10
            stamp_api_key = "sk-test"
        "#;
        let config = DashboardConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.chain_id, 10);
        assert_eq!(config.stamp_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.log_level, "info"); // default
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = DashboardConfig::from_toml_file("/nonexistent/repdash.toml");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), SessionError::Config(_)));
    }
}
