//! # Domain Errors
//!
//! Every rejected operation surfaces one of these kinds to the caller.

use super::value_objects::{Address, Amount};
use thiserror::Error;

/// Ledger error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Caller is not the ledger admin.
    #[error("Not admin: caller {caller} is not admin {admin}")]
    NotAdmin {
        /// Identity that invoked the operation
        caller: Address,
        /// Current admin
        admin: Address,
    },

    /// Operation would leave custody unable to cover allocations.
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        /// Amount the operation needed
        requested: Amount,
        /// Amount that was actually available to it
        available: Amount,
    },

    /// Claim attempted without a positive entitlement.
    #[error("No allocation for {beneficiary}")]
    NoAllocation {
        /// Claiming identity
        beneficiary: Address,
    },

    /// Bootstrap was already run for this admin.
    #[error("Ledger already initialized for admin {admin}")]
    AlreadyInitialized {
        /// Admin that bootstrapped
        admin: Address,
    },

    /// No ledger at the custody address.
    #[error("Ledger not found: {0}")]
    LedgerNotFound(Address),

    /// No delegated authority stored under the admin identity.
    #[error("Delegated authority not found for admin {0}")]
    AuthorityNotFound(Address),

    /// The custody account was named as its own counterparty.
    #[error("Custody account {account} cannot be its own counterparty")]
    CustodyCounterparty {
        /// The custody address
        account: Address,
    },

    /// The external funds-transfer primitive failed.
    #[error("Transfer failed: {0}")]
    Transfer(#[from] TransferError),

    /// Checked arithmetic would overflow.
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
}

impl LedgerError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotAdmin { .. } => "not_admin",
            Self::InsufficientBalance { .. } => "insufficient_balance",
            Self::NoAllocation { .. } => "no_allocation",
            Self::AlreadyInitialized { .. } => "already_initialized",
            Self::LedgerNotFound(_) => "ledger_not_found",
            Self::AuthorityNotFound(_) => "authority_not_found",
            Self::CustodyCounterparty { .. } => "custody_counterparty",
            Self::Transfer(_) => "transfer_failed",
            Self::ArithmeticOverflow => "arithmetic_overflow",
        }
    }
}

/// Failures reported by the funds-transfer and registration primitives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// Source account cannot cover the amount.
    #[error("Insufficient funds in {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Debited account
        account: Address,
        /// Its balance
        balance: Amount,
        /// Amount requested
        requested: Amount,
    },

    /// Account is not registered to hold value.
    #[error("Account not registered: {0}")]
    NotRegistered(Address),

    /// Crediting would overflow the recipient balance.
    #[error("Balance overflow")]
    Overflow,

    /// Backend unavailable.
    #[error("Transfer backend unavailable: {0}")]
    Unavailable(String),
}
