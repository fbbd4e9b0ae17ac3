//! Delegated Signer Adapter
//!
//! Implements `DelegatedSigner` with deterministic keyless custody accounts.
//! The custody address is `sha3-256(admin || seed || 0xFF)`; the trailing
//! scheme byte keeps derived addresses out of the key-derived address space.

use crate::domain::{Address, LedgerError, Signer, SignerCapability};
use crate::ports::outbound::DelegatedSigner;
use async_trait::async_trait;
use parking_lot::RwLock;
use sha3::{Digest, Sha3_256};
use std::collections::HashSet;
use tracing::info;

/// Scheme byte appended to derivation input.
pub const CUSTODY_ACCOUNT_SCHEME: u8 = 0xFF;

/// Derive the custody address for `admin` and `seed`.
pub fn derive_custody_address(admin: &Address, seed: &[u8]) -> Address {
    let mut hasher = Sha3_256::new();
    hasher.update(admin.as_bytes());
    hasher.update(seed);
    hasher.update([CUSTODY_ACCOUNT_SCHEME]);
    Address::new(hasher.finalize().into())
}

/// In-memory delegated signer.
#[derive(Debug, Default)]
pub struct InMemoryDelegatedSigner {
    /// Custody accounts created so far.
    issued: RwLock<HashSet<Address>>,
}

impl InMemoryDelegatedSigner {
    /// Create a signer with no accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of custody accounts created.
    pub fn issued_count(&self) -> usize {
        self.issued.read().len()
    }
}

#[async_trait]
impl DelegatedSigner for InMemoryDelegatedSigner {
    async fn create_custody_identity(
        &self,
        admin: Address,
        seed: &[u8],
    ) -> Result<(Address, SignerCapability), LedgerError> {
        let custody = derive_custody_address(&admin, seed);

        if !self.issued.write().insert(custody) {
            return Err(LedgerError::AlreadyInitialized { admin });
        }

        info!(admin = %admin, custody = %custody, "custody account created");
        Ok((custody, SignerCapability::new(custody)))
    }

    fn act_as(&self, capability: &SignerCapability) -> Signer {
        Signer::new(capability.account())
    }

    fn release(&self, capability: SignerCapability) {
        let custody = capability.account();
        if self.issued.write().remove(&custody) {
            info!(custody = %custody, "custody account released");
        }
    }
}
