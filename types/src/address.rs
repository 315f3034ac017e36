//! Wallet address type and the per-identity address set.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AddressError;

/// An EVM-style wallet address, always prefixed with `0x`.
///
/// The raw casing is preserved as received from the provider (some services
/// hand back checksummed forms), but equality, hashing and deduplication are
/// case-insensitive — the attestation registry and scoring services disagree
/// on casing for the same wallet.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// The standard prefix for all wallet addresses.
    pub const PREFIX: &'static str = "0x";

    /// Hex character count of the address body (20 bytes).
    const BODY_LEN: usize = 40;

    /// Parse and validate a wallet address string.
    pub fn parse(raw: impl Into<String>) -> Result<Self, AddressError> {
        let s = raw.into();
        if !s.starts_with(Self::PREFIX) {
            return Err(AddressError::MissingPrefix(s));
        }
        let body = &s[Self::PREFIX.len()..];
        if body.len() != Self::BODY_LEN {
            return Err(AddressError::BadLength {
                address: s.clone(),
                len: body.len(),
            });
        }
        if !body.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AddressError::NonHex(s));
        }
        Ok(Self(s))
    }

    /// Return the raw address string as received.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form, as required by case-sensitive recipient matching
    /// in the attestation registry.
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }
}

impl PartialEq for WalletAddress {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for WalletAddress {}

impl std::hash::Hash for WalletAddress {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_ascii_lowercase().hash(state);
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for WalletAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The ordered set of wallet addresses controlled by one identity.
///
/// The custody address comes first, then the verified addresses, in provider
/// order. The first entry is the primary address used for single-address
/// operations (transaction-count display, score refresh); the full set feeds
/// multi-address lookups (verification, scoring). Duplicates are dropped
/// case-insensitively — the source does not enforce uniqueness.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressSet {
    addresses: Vec<WalletAddress>,
}

impl AddressSet {
    /// Build an address set from a custody address and verified addresses.
    pub fn from_parts(
        custody: WalletAddress,
        verified: impl IntoIterator<Item = WalletAddress>,
    ) -> Self {
        let mut set = Self::default();
        set.push(custody);
        for addr in verified {
            set.push(addr);
        }
        set
    }

    /// Append an address, dropping case-insensitive duplicates.
    pub fn push(&mut self, addr: WalletAddress) {
        if !self.addresses.contains(&addr) {
            self.addresses.push(addr);
        }
    }

    /// The primary (custody) address, if the set is non-empty.
    pub fn primary(&self) -> Option<&WalletAddress> {
        self.addresses.first()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WalletAddress> {
        self.addresses.iter()
    }

    /// All addresses lowercased, for registry queries.
    pub fn normalized(&self) -> Vec<String> {
        self.addresses.iter().map(|a| a.normalized()).collect()
    }
}

impl<'a> IntoIterator for &'a AddressSet {
    type Item = &'a WalletAddress;
    type IntoIter = std::slice::Iter<'a, WalletAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.addresses.iter()
    }
}
