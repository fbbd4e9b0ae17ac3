//! # Inbound Ports
//!
//! The surface operations a caller invokes against the custody ledger.
//!
//! `caller` is always the authenticated sender of the operation; the
//! submission layer that authenticates it lives outside this crate.

use crate::domain::{Address, Amount, LedgerError, LedgerSnapshot, Signer};
use async_trait::async_trait;

/// Custody ledger API - inbound port.
#[async_trait]
pub trait CustodyLedgerApi: Send + Sync {
    /// Create the custody account, its ledger and delegated authority.
    ///
    /// Returns the custody address. Fails with `AlreadyInitialized` when
    /// the caller has bootstrapped before.
    async fn bootstrap(&self, caller: &Signer) -> Result<Address, LedgerError>;

    /// Move `amount` from the caller into custody. Open to any caller.
    async fn deposit(
        &self,
        caller: &Signer,
        custody: Address,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Reserve `amount` for `beneficiary` (admin only).
    async fn allocate(
        &self,
        caller: &Signer,
        custody: Address,
        beneficiary: Address,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Pay the caller's whole entitlement out of custody.
    async fn claim(&self, caller: &Signer, custody: Address) -> Result<Amount, LedgerError>;

    /// Pay `amount` of unallocated custody to the admin (admin only).
    async fn withdraw(
        &self,
        caller: &Signer,
        custody: Address,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Hand administration to `new_admin` (admin only).
    async fn transfer_ownership(
        &self,
        caller: &Signer,
        custody: Address,
        new_admin: Address,
    ) -> Result<(), LedgerError>;

    /// Value held in custody.
    async fn total_balance(&self, custody: Address) -> Result<Amount, LedgerError>;

    /// Sum of outstanding allocations.
    async fn total_allocated(&self, custody: Address) -> Result<Amount, LedgerError>;

    /// Unallocated remainder.
    async fn available(&self, custody: Address) -> Result<Amount, LedgerError>;

    /// Entitlement of `beneficiary`, zero when absent.
    async fn allocation_of(
        &self,
        custody: Address,
        beneficiary: Address,
    ) -> Result<Amount, LedgerError>;

    /// Point-in-time view of the ledger.
    async fn snapshot(&self, custody: Address) -> Result<LedgerSnapshot, LedgerError>;

    /// Custody address bootstrapped by `admin`.
    fn custody_address_of(&self, admin: Address) -> Result<Address, LedgerError>;
}
