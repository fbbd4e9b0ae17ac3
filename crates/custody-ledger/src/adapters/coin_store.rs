//! Coin Store Adapter
//!
//! Implements `FundsTransfer` and `AccountRegistry` over an in-memory
//! balance table. A registered account is one with an entry in the table.

use crate::domain::{Address, Amount, Signer, TransferError};
use crate::ports::outbound::{AccountRegistry, FundsTransfer};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::debug;

/// In-memory coin store for testing and simulation.
#[derive(Debug, Default)]
pub struct InMemoryCoinStore {
    /// Registered accounts and their balances.
    balances: RwLock<HashMap<Address, Amount>>,
    /// When set, every transfer fails with `Unavailable`.
    unavailable: AtomicBool,
    /// Successful transfers so far.
    transfers: AtomicU64,
}

impl InMemoryCoinStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to `account`, registering it if needed.
    pub fn mint(&self, account: Address, amount: Amount) -> Result<(), TransferError> {
        let mut balances = self.balances.write();
        let balance = balances.entry(account).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(TransferError::Overflow)?;
        Ok(())
    }

    /// Balance of `account`, zero if unregistered.
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.read().get(account).copied().unwrap_or(0)
    }

    /// Make subsequent transfers fail (or succeed again).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of successful transfers.
    pub fn transfer_count(&self) -> u64 {
        self.transfers.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FundsTransfer for InMemoryCoinStore {
    async fn transfer(
        &self,
        from: &Signer,
        to: Address,
        amount: Amount,
    ) -> Result<(), TransferError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(TransferError::Unavailable("coin store offline".to_string()));
        }

        let source = from.address();
        let mut balances = self.balances.write();

        let from_balance = *balances
            .get(&source)
            .ok_or(TransferError::NotRegistered(source))?;
        let to_balance = *balances.get(&to).ok_or(TransferError::NotRegistered(to))?;

        if from_balance < amount {
            return Err(TransferError::InsufficientFunds {
                account: source,
                balance: from_balance,
                requested: amount,
            });
        }

        if source != to {
            let credited = to_balance
                .checked_add(amount)
                .ok_or(TransferError::Overflow)?;
            balances.insert(source, from_balance - amount);
            balances.insert(to, credited);
        }

        self.transfers.fetch_add(1, Ordering::SeqCst);
        debug!(from = %source, to = %to, amount, "coin transfer applied");
        Ok(())
    }
}

#[async_trait]
impl AccountRegistry for InMemoryCoinStore {
    async fn is_registered(&self, account: Address) -> bool {
        self.balances.read().contains_key(&account)
    }

    async fn register(&self, account: Address) -> Result<(), TransferError> {
        self.balances.write().entry(account).or_insert(0);
        Ok(())
    }
}
