//! Ledger configuration from environment variables.

use std::env;

/// Default seed for custody-address derivation.
pub const DEFAULT_SEED: &str = "custody_vault";

/// Configuration for the custody ledger service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Seed mixed into custody-address derivation at bootstrap.
    pub seed: Vec<u8>,

    /// Re-check every invariant after each committed mutation.
    pub verify_invariants: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED.as_bytes().to_vec(),
            verify_invariants: true,
        }
    }
}

impl LedgerConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CUSTODY_SEED`: Derivation seed (default: custody_vault)
    /// - `CUSTODY_VERIFY_INVARIANTS`: Post-commit invariant checks (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            seed: lookup("CUSTODY_SEED")
                .map(String::into_bytes)
                .unwrap_or_else(|| DEFAULT_SEED.as_bytes().to_vec()),

            verify_invariants: lookup("CUSTODY_VERIFY_INVARIANTS")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),
        }
    }

    /// Override the derivation seed.
    pub fn with_seed(mut self, seed: impl Into<Vec<u8>>) -> Self {
        self.seed = seed.into();
        self
    }
}
