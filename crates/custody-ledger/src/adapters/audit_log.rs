//! Audit Sink Adapters
//!
//! `InMemoryAuditLog` keeps records for inspection; `TracingAuditSink`
//! writes each record as a JSON line to the `custody_audit` log target.

use crate::domain::Address;
use crate::events::{AuditRecord, LedgerEvent};
use crate::ports::outbound::AuditSink;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, warn};

/// Log target used by [`TracingAuditSink`].
pub const AUDIT_TARGET: &str = "custody_audit";

/// In-memory append-only audit log.
#[derive(Debug, Default)]
pub struct InMemoryAuditLog {
    records: RwLock<Vec<AuditRecord>>,
}

impl InMemoryAuditLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in append order.
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.read().clone()
    }

    /// Records for a single ledger, in append order.
    pub fn records_for(&self, custody_address: &Address) -> Vec<AuditRecord> {
        self.records
            .read()
            .iter()
            .filter(|r| r.custody_address == *custody_address)
            .cloned()
            .collect()
    }

    /// Events only, in append order.
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.records.read().iter().map(|r| r.event.clone()).collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl AuditSink for InMemoryAuditLog {
    fn append(&self, custody_address: Address, event: LedgerEvent) {
        let mut records = self.records.write();
        let sequence = records.len() as u64;
        records.push(AuditRecord {
            sequence,
            custody_address,
            event,
        });
    }
}

/// Audit sink that emits records through `tracing`.
#[derive(Debug, Default)]
pub struct TracingAuditSink {
    next_sequence: AtomicU64,
}

impl TracingAuditSink {
    /// Create a sink starting at sequence 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence number the next record will carry.
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence.load(Ordering::SeqCst)
    }
}

impl AuditSink for TracingAuditSink {
    fn append(&self, custody_address: Address, event: LedgerEvent) {
        let record = AuditRecord {
            sequence: self.next_sequence.fetch_add(1, Ordering::SeqCst),
            custody_address,
            event,
        };
        match serde_json::to_string(&record) {
            Ok(json) => info!(target: AUDIT_TARGET, kind = record.event.kind(), record = %json),
            Err(e) => warn!(target: AUDIT_TARGET, error = %e, sequence = record.sequence, "unserializable audit record"),
        }
    }
}
