//! # Domain Entities
//!
//! The custody [`Ledger`] and the [`DelegatedAuthority`] paired with it.
//!
//! Fund-moving operations are split into a `check_*` step that validates
//! without mutating and a `settle_*` step that commits once the external
//! transfer has succeeded. A failed transfer therefore never leaves a
//! partially applied ledger behind.

use super::capability::SignerCapability;
use super::errors::LedgerError;
use super::value_objects::{Address, Amount};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Per-custody-address accounting state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ledger {
    admin: Address,
    custody_address: Address,
    /// Admin identity the delegated authority is stored under. Fixed at
    /// bootstrap and not moved by ownership transfer.
    authority_key: Address,
    allocations: HashMap<Address, Amount>,
    total_allocated: Amount,
    total_balance: Amount,
}

impl Ledger {
    /// Create an empty ledger administered by `admin`.
    pub fn new(admin: Address, custody_address: Address) -> Self {
        Self {
            admin,
            custody_address,
            authority_key: admin,
            allocations: HashMap::new(),
            total_allocated: 0,
            total_balance: 0,
        }
    }

    /// Current admin.
    pub fn admin(&self) -> Address {
        self.admin
    }

    /// Custody account holding the pooled funds.
    pub fn custody_address(&self) -> Address {
        self.custody_address
    }

    /// Bootstrap admin under which the delegated authority lives.
    pub fn authority_key(&self) -> Address {
        self.authority_key
    }

    /// Value held in custody.
    pub fn total_balance(&self) -> Amount {
        self.total_balance
    }

    /// Sum of all outstanding allocations.
    pub fn total_allocated(&self) -> Amount {
        self.total_allocated
    }

    /// Unallocated remainder.
    pub fn available(&self) -> Amount {
        self.total_balance.saturating_sub(self.total_allocated)
    }

    /// Entitlement of `beneficiary`; zero when absent.
    pub fn allocation_of(&self, beneficiary: &Address) -> Amount {
        self.allocations.get(beneficiary).copied().unwrap_or(0)
    }

    /// Iterate over outstanding allocations in no particular order.
    pub fn allocations(&self) -> impl Iterator<Item = (&Address, &Amount)> {
        self.allocations.iter()
    }

    /// Number of beneficiaries with an outstanding allocation.
    pub fn beneficiary_count(&self) -> usize {
        self.allocations.len()
    }

    /// Reject callers other than the current admin.
    pub fn ensure_admin(&self, caller: &Address) -> Result<(), LedgerError> {
        if *caller != self.admin {
            return Err(LedgerError::NotAdmin {
                caller: *caller,
                admin: self.admin,
            });
        }
        Ok(())
    }

    /// Reject the custody account as the other side of a transfer.
    ///
    /// A transfer from custody to itself moves nothing, so the ledger would
    /// drift from the funds it actually holds.
    pub fn ensure_external(&self, account: &Address) -> Result<(), LedgerError> {
        if *account == self.custody_address {
            return Err(LedgerError::CustodyCounterparty { account: *account });
        }
        Ok(())
    }

    // =========================================================================
    // DEPOSIT
    // =========================================================================

    /// Validate that `depositor` can add `amount` to custody.
    pub fn check_deposit(&self, depositor: &Address, amount: Amount) -> Result<(), LedgerError> {
        self.ensure_external(depositor)?;
        self.total_balance
            .checked_add(amount)
            .map(|_| ())
            .ok_or(LedgerError::ArithmeticOverflow)
    }

    /// Record `amount` as received into custody.
    pub fn settle_deposit(&mut self, amount: Amount) -> Result<(), LedgerError> {
        self.total_balance = self
            .total_balance
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        Ok(())
    }

    // =========================================================================
    // ALLOCATE
    // =========================================================================

    /// Reserve `amount` of custody for `beneficiary`.
    ///
    /// Additive across calls. Returns the beneficiary's new entitlement.
    pub fn allocate(
        &mut self,
        caller: &Address,
        beneficiary: Address,
        amount: Amount,
    ) -> Result<Amount, LedgerError> {
        self.ensure_admin(caller)?;
        self.ensure_external(&beneficiary)?;

        let new_total = match self.total_allocated.checked_add(amount) {
            Some(total) if total <= self.total_balance => total,
            _ => {
                return Err(LedgerError::InsufficientBalance {
                    requested: amount,
                    available: self.available(),
                })
            }
        };

        if amount == 0 {
            return Ok(self.allocation_of(&beneficiary));
        }

        let entry = self.allocations.entry(beneficiary).or_insert(0);
        // Cannot overflow: entry <= total_allocated < new_total.
        *entry += amount;
        let entitlement = *entry;
        self.total_allocated = new_total;
        Ok(entitlement)
    }

    // =========================================================================
    // CLAIM
    // =========================================================================

    /// Amount `beneficiary` would receive by claiming now.
    pub fn check_claim(&self, beneficiary: &Address) -> Result<Amount, LedgerError> {
        self.ensure_external(beneficiary)?;
        let amount = self.allocation_of(beneficiary);
        if amount == 0 {
            return Err(LedgerError::NoAllocation {
                beneficiary: *beneficiary,
            });
        }
        if self.total_balance < amount {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available: self.total_balance,
            });
        }
        Ok(amount)
    }

    /// Remove the beneficiary's whole entry and release it from custody.
    pub fn settle_claim(&mut self, beneficiary: &Address) -> Result<Amount, LedgerError> {
        let amount = self.check_claim(beneficiary)?;
        self.allocations.remove(beneficiary);
        self.total_allocated -= amount;
        self.total_balance -= amount;
        Ok(amount)
    }

    // =========================================================================
    // WITHDRAW
    // =========================================================================

    /// Validate an admin withdrawal of `amount` from the unallocated remainder.
    pub fn check_withdraw(&self, caller: &Address, amount: Amount) -> Result<(), LedgerError> {
        self.ensure_admin(caller)?;
        self.ensure_external(caller)?;
        let available = self.available();
        if amount > available {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available,
            });
        }
        Ok(())
    }

    /// Release `amount` of unallocated custody.
    pub fn settle_withdraw(&mut self, amount: Amount) -> Result<(), LedgerError> {
        let available = self.available();
        if amount > available {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available,
            });
        }
        self.total_balance -= amount;
        Ok(())
    }

    // =========================================================================
    // OWNERSHIP
    // =========================================================================

    /// Hand administration to `new_admin`. Returns the previous admin.
    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        new_admin: Address,
    ) -> Result<Address, LedgerError> {
        self.ensure_admin(caller)?;
        self.ensure_external(&new_admin)?;
        Ok(std::mem::replace(&mut self.admin, new_admin))
    }

    /// Serializable point-in-time view.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            admin: self.admin,
            custody_address: self.custody_address,
            authority_key: self.authority_key,
            allocations: self.allocations.iter().map(|(k, v)| (*k, *v)).collect(),
            total_allocated: self.total_allocated,
            total_balance: self.total_balance,
            available: self.available(),
        }
    }
}

/// Read-only view of a [`Ledger`], allocations sorted by beneficiary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Current admin.
    pub admin: Address,
    /// Custody account.
    pub custody_address: Address,
    /// Bootstrap admin holding the delegated authority.
    pub authority_key: Address,
    /// Outstanding allocations.
    pub allocations: BTreeMap<Address, Amount>,
    /// Sum of allocations.
    pub total_allocated: Amount,
    /// Value in custody.
    pub total_balance: Amount,
    /// `total_balance - total_allocated`.
    pub available: Amount,
}

/// Capability record stored under the bootstrap admin.
///
/// Immutable after bootstrap and shared read-only by every claim and
/// withdrawal on the paired ledger.
#[derive(Debug)]
pub struct DelegatedAuthority {
    admin: Address,
    capability: SignerCapability,
}

impl DelegatedAuthority {
    /// Bind `capability` to the admin that bootstrapped it.
    pub fn new(admin: Address, capability: SignerCapability) -> Self {
        Self { admin, capability }
    }

    /// Admin the authority is stored under.
    pub fn admin(&self) -> Address {
        self.admin
    }

    /// Custody account the capability signs for.
    pub fn custody_address(&self) -> Address {
        self.capability.account()
    }

    pub(crate) fn capability(&self) -> &SignerCapability {
        &self.capability
    }
}
