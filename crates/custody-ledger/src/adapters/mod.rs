//! # Adapters Layer (Hexagonal Architecture)
//!
//! In-memory implementations of the outbound ports.

mod audit_log;
mod coin_store;
mod delegated_signer;

pub use audit_log::{InMemoryAuditLog, TracingAuditSink, AUDIT_TARGET};
pub use coin_store::InMemoryCoinStore;
pub use delegated_signer::{
    derive_custody_address, InMemoryDelegatedSigner, CUSTODY_ACCOUNT_SCHEME,
};
