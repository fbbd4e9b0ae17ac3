//! # Domain Invariants
//!
//! Properties every reachable [`Ledger`] state must satisfy.
//!
//! | Invariant | Check |
//! |-----------|-------|
//! | Solvency | `total_balance >= total_allocated` |
//! | Aggregate consistency | `total_allocated == sum(allocations)` |
//! | No empty entries | every allocation is strictly positive |
//!
//! The aggregate check re-scans the map. It is a verifier only; the ledger
//! never derives its totals from it.

use super::entities::Ledger;
use super::value_objects::{Address, Amount};
use std::fmt;

/// A broken ledger invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Custody cannot cover outstanding allocations.
    Insolvent {
        /// Tracked custody balance
        total_balance: Amount,
        /// Tracked allocation total
        total_allocated: Amount,
    },
    /// Running total disagrees with the allocation map.
    AggregateMismatch {
        /// Running counter
        tracked: Amount,
        /// Sum recomputed from the map
        actual: u128,
    },
    /// A zero-valued entry is present.
    EmptyAllocation(Address),
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insolvent {
                total_balance,
                total_allocated,
            } => write!(
                f,
                "insolvent: balance {total_balance} < allocated {total_allocated}"
            ),
            Self::AggregateMismatch { tracked, actual } => {
                write!(f, "aggregate mismatch: tracked {tracked}, actual {actual}")
            }
            Self::EmptyAllocation(addr) => write!(f, "empty allocation for {addr}"),
        }
    }
}

/// Invariant: solvency.
#[must_use]
pub fn invariant_solvent(ledger: &Ledger) -> bool {
    ledger.total_balance() >= ledger.total_allocated()
}

/// Invariant: `total_allocated` equals the exact sum of entries.
#[must_use]
pub fn invariant_aggregate_consistent(ledger: &Ledger) -> bool {
    allocation_sum(ledger) == u128::from(ledger.total_allocated())
}

/// Run every check, returning all violations found.
pub fn check_all_invariants(ledger: &Ledger) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    if !invariant_solvent(ledger) {
        violations.push(InvariantViolation::Insolvent {
            total_balance: ledger.total_balance(),
            total_allocated: ledger.total_allocated(),
        });
    }

    let actual = allocation_sum(ledger);
    if actual != u128::from(ledger.total_allocated()) {
        violations.push(InvariantViolation::AggregateMismatch {
            tracked: ledger.total_allocated(),
            actual,
        });
    }

    violations.extend(
        ledger
            .allocations()
            .filter(|(_, amount)| **amount == 0)
            .map(|(addr, _)| InvariantViolation::EmptyAllocation(*addr)),
    );

    violations
}

fn allocation_sum(ledger: &Ledger) -> u128 {
    ledger
        .allocations()
        .map(|(_, amount)| u128::from(*amount))
        .sum()
}
