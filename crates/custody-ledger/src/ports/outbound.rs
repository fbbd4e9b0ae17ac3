//! # Outbound Ports
//!
//! Collaborators the ledger consumes: the coin primitives, the delegated
//! signer and the audit sink.

use crate::domain::{Address, Amount, LedgerError, Signer, SignerCapability, TransferError};
use crate::events::LedgerEvent;
use async_trait::async_trait;

/// Funds-transfer primitive - outbound port.
///
/// Implementations must move `amount` atomically: either both balances
/// change or neither does.
#[async_trait]
pub trait FundsTransfer: Send + Sync {
    /// Move `amount` from the signer's account to `to`.
    async fn transfer(&self, from: &Signer, to: Address, amount: Amount)
        -> Result<(), TransferError>;
}

/// Registration primitive - outbound port.
#[async_trait]
pub trait AccountRegistry: Send + Sync {
    /// Whether `account` can hold value.
    async fn is_registered(&self, account: Address) -> bool;

    /// Enable `account` to hold value. Idempotent.
    async fn register(&self, account: Address) -> Result<(), TransferError>;
}

/// Delegated signing primitive - outbound port.
#[async_trait]
pub trait DelegatedSigner: Send + Sync {
    /// Create a keyless custody account for `admin` and the capability to
    /// sign for it.
    async fn create_custody_identity(
        &self,
        admin: Address,
        seed: &[u8],
    ) -> Result<(Address, SignerCapability), LedgerError>;

    /// Exchange the capability for a transient custody signer.
    fn act_as(&self, capability: &SignerCapability) -> Signer;

    /// Retire a capability whose bootstrap did not complete, so the same
    /// identity can be created again.
    fn release(&self, capability: SignerCapability);
}

/// Audit sink - outbound port. Append-only.
pub trait AuditSink: Send + Sync {
    /// Append one event for the ledger at `custody_address`.
    fn append(&self, custody_address: Address, event: LedgerEvent);
}
