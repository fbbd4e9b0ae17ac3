//! # Audit Events
//!
//! Every committed mutation appends exactly one [`LedgerEvent`] to the audit
//! sink. Events form a single tagged stream rather than one sink per kind,
//! so ordering across kinds is preserved.
//!
//! | Kind | Emitted by |
//! |------|-----------|
//! | `deposit` | `deposit` |
//! | `allocate` | `allocate` |
//! | `claim` | `claim` |
//! | `withdraw` | `withdraw` |
//! | `ownership_transfer` | `transfer_ownership` |

use crate::domain::{Address, Amount};
use serde::{Deserialize, Serialize};

/// A single audit event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// Value moved into custody.
    Deposit {
        /// Amount deposited (may be zero)
        amount: Amount,
    },
    /// Value reserved for a beneficiary.
    Allocate {
        /// Beneficiary
        beneficiary: Address,
        /// Amount added to the entitlement
        amount: Amount,
    },
    /// Entitlement paid out in full.
    Claim {
        /// Beneficiary
        beneficiary: Address,
        /// Amount paid
        amount: Amount,
    },
    /// Unallocated value paid to the admin.
    Withdraw {
        /// Amount withdrawn
        amount: Amount,
    },
    /// Administration handed over.
    OwnershipTransfer {
        /// Ledger whose admin changed
        custody_address: Address,
        /// Previous admin
        from: Address,
        /// New admin
        to: Address,
    },
}

impl LedgerEvent {
    /// Stable label, matches the serialized `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Deposit { .. } => "deposit",
            Self::Allocate { .. } => "allocate",
            Self::Claim { .. } => "claim",
            Self::Withdraw { .. } => "withdraw",
            Self::OwnershipTransfer { .. } => "ownership_transfer",
        }
    }
}

/// An event as stored by an audit sink.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Position in the sink, starting at 0.
    pub sequence: u64,
    /// Ledger the event belongs to.
    pub custody_address: Address,
    /// The event itself.
    pub event: LedgerEvent,
}
