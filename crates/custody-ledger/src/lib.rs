//! # Custody Ledger
//!
//! Custodial token ledger: one admin funds a shared custody account and
//! earmarks slices of it for beneficiaries, who pull their entitlement out.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Operations
//!
//! | Operation | Caller | Effect |
//! |-----------|--------|--------|
//! | `bootstrap` | anyone, once | custody account, ledger, delegated authority |
//! | `deposit` | anyone | caller → custody |
//! | `allocate` | admin | reserve funds for a beneficiary (additive) |
//! | `claim` | beneficiary | custody → beneficiary, whole entitlement |
//! | `withdraw` | admin | custody → admin, unallocated funds only |
//! | `transfer_ownership` | admin | replace the admin |
//!
//! ## Invariants
//!
//! - `total_balance >= total_allocated` after every committed operation
//! - `total_allocated` equals the sum of all entitlements
//! - No entry with a zero entitlement is ever stored
//!
//! ## Module Structure
//!
//! ```text
//! custody-ledger/
//! ├── domain/          # Ledger, Address, Signer, capability, errors, invariants
//! ├── ports/           # CustodyLedgerApi, FundsTransfer, DelegatedSigner, AuditSink
//! ├── adapters/        # In-memory coin store, signer, audit sinks
//! ├── events.rs        # Audit events
//! ├── service.rs       # CustodyLedgerService
//! ├── config.rs        # LedgerConfig
//! └── metrics.rs       # Prometheus counters (feature = "metrics")
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod events;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{
    derive_custody_address, InMemoryAuditLog, InMemoryCoinStore, InMemoryDelegatedSigner,
    TracingAuditSink, AUDIT_TARGET,
};
pub use config::LedgerConfig;
pub use domain::{
    check_all_invariants, Address, Amount, InvariantViolation, Ledger, LedgerError,
    LedgerSnapshot, Signer, SignerCapability, TransferError,
};
pub use events::{AuditRecord, LedgerEvent};
pub use ports::{AccountRegistry, AuditSink, CustodyLedgerApi, DelegatedSigner, FundsTransfer};
pub use service::{create_test_service, CustodyLedgerService, InMemoryLedgerService};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
