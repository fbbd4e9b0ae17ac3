//! # Ledger Metrics
//!
//! Prometheus metrics for committed operations and rejections.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! custody-ledger = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `custody_operations_total` - Counter of committed operations (by kind)
//! - `custody_rejections_total` - Counter of rejected operations (by error kind)
//! - `custody_invariant_violations_total` - Counter of post-commit invariant failures

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Committed operations, labeled by event kind
    pub static ref OPERATIONS_COMMITTED: IntCounterVec = register_int_counter_vec!(
        "custody_operations_total",
        "Total number of committed ledger operations",
        &["kind"]
    )
    .expect("Failed to create OPERATIONS_COMMITTED metric");

    /// Rejected operations, labeled by error kind
    pub static ref OPERATIONS_REJECTED: IntCounterVec = register_int_counter_vec!(
        "custody_rejections_total",
        "Total number of rejected ledger operations",
        &["reason"]
    )
    .expect("Failed to create OPERATIONS_REJECTED metric");

    /// Post-commit invariant violations
    pub static ref INVARIANT_VIOLATIONS: IntCounter = register_int_counter!(
        "custody_invariant_violations_total",
        "Total number of ledger invariant violations detected"
    )
    .expect("Failed to create INVARIANT_VIOLATIONS metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record a committed operation
#[cfg(feature = "metrics")]
pub fn record_operation(kind: &str) {
    OPERATIONS_COMMITTED.with_label_values(&[kind]).inc();
}

/// Record a rejected operation with reason
#[cfg(feature = "metrics")]
pub fn record_rejection(reason: &str) {
    OPERATIONS_REJECTED.with_label_values(&[reason]).inc();
}

/// Record invariant violations
#[cfg(feature = "metrics")]
pub fn record_invariant_violations(count: u64) {
    INVARIANT_VIOLATIONS.inc_by(count);
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

/// Record a committed operation (no-op)
#[cfg(not(feature = "metrics"))]
pub fn record_operation(_kind: &str) {}

/// Record a rejected operation (no-op)
#[cfg(not(feature = "metrics"))]
pub fn record_rejection(_reason: &str) {}

/// Record invariant violations (no-op)
#[cfg(not(feature = "metrics"))]
pub fn record_invariant_violations(_count: u64) {}
