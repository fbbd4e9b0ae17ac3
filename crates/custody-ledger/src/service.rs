//! # Custody Ledger Service
//!
//! Binds the domain [`Ledger`] to the outbound ports and exposes the surface
//! operations.
//!
//! ## Exclusivity
//!
//! Each ledger sits behind its own async mutex, held for the whole operation
//! including the external transfer. Operations on one custody address are
//! therefore serialized; different custody addresses proceed independently.
//!
//! ## Claim and withdraw ordering
//!
//! Funds leave custody before the ledger changes: the operation validates
//! with `check_*`, performs the transfer, and only then commits with
//! `settle_*` and appends the audit event. A failed transfer leaves the
//! ledger and the audit log exactly as they were, and the allocation stays
//! claimable.
//!
//! ## Delegated authority after ownership transfer
//!
//! The authority stays stored under the bootstrap admin. Claims and
//! withdrawals resolve it through [`Ledger::authority_key`], which ownership
//! transfer does not move, and `custody_address_of` only answers for the
//! bootstrap admin. Should that slot ever disappear, claims and withdrawals
//! fail with `AuthorityNotFound`.

use crate::adapters::{InMemoryAuditLog, InMemoryCoinStore, InMemoryDelegatedSigner};
use crate::config::LedgerConfig;
use crate::domain::{
    check_all_invariants, Address, Amount, DelegatedAuthority, Ledger, LedgerError,
    LedgerSnapshot, Signer,
};
use crate::events::LedgerEvent;
use crate::metrics;
use crate::ports::inbound::CustodyLedgerApi;
use crate::ports::outbound::{AccountRegistry, AuditSink, DelegatedSigner, FundsTransfer};

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

type LedgerHandle = Arc<Mutex<Ledger>>;

/// Service over the in-memory adapters.
pub type InMemoryLedgerService =
    CustodyLedgerService<InMemoryCoinStore, InMemoryDelegatedSigner, InMemoryAuditLog>;

/// The custody ledger service.
///
/// `B` provides both the funds-transfer and the registration primitive.
pub struct CustodyLedgerService<B, D, A> {
    config: LedgerConfig,
    bank: Arc<B>,
    signer: Arc<D>,
    audit: Arc<A>,
    /// Ledgers keyed by custody address.
    ledgers: RwLock<HashMap<Address, LedgerHandle>>,
    /// Delegated authorities keyed by bootstrap admin.
    authorities: RwLock<HashMap<Address, Arc<DelegatedAuthority>>>,
}

impl<B, D, A> CustodyLedgerService<B, D, A>
where
    B: FundsTransfer + AccountRegistry,
    D: DelegatedSigner,
    A: AuditSink,
{
    /// Create a service with no ledgers.
    pub fn new(bank: Arc<B>, signer: Arc<D>, audit: Arc<A>, config: LedgerConfig) -> Self {
        Self {
            config,
            bank,
            signer,
            audit,
            ledgers: RwLock::new(HashMap::new()),
            authorities: RwLock::new(HashMap::new()),
        }
    }

    /// Service configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Funds-transfer and registration backend.
    pub fn bank(&self) -> &Arc<B> {
        &self.bank
    }

    /// Delegated signer.
    pub fn signer(&self) -> &Arc<D> {
        &self.signer
    }

    /// Audit sink.
    pub fn audit(&self) -> &Arc<A> {
        &self.audit
    }

    /// Number of bootstrapped ledgers.
    pub fn ledger_count(&self) -> usize {
        self.ledgers.read().len()
    }

    // =========================================================================
    // SURFACE OPERATIONS
    // =========================================================================

    /// Create custody account, ledger and delegated authority for the caller.
    #[instrument(skip(self, caller), fields(admin = %caller.address()))]
    pub async fn handle_bootstrap(&self, caller: &Signer) -> Result<Address, LedgerError> {
        let admin = caller.address();
        if self.authorities.read().contains_key(&admin) {
            return Err(self.rejected("bootstrap", LedgerError::AlreadyInitialized { admin }));
        }

        let (custody, capability) = self
            .signer
            .create_custody_identity(admin, &self.config.seed)
            .await
            .map_err(|e| self.rejected("bootstrap", e))?;
        if let Err(e) = self.ensure_registered(custody).await {
            self.signer.release(capability);
            return Err(self.rejected("bootstrap", e));
        }

        {
            let mut authorities = self.authorities.write();
            if authorities.contains_key(&admin) {
                return Err(self.rejected("bootstrap", LedgerError::AlreadyInitialized { admin }));
            }
            authorities.insert(admin, Arc::new(DelegatedAuthority::new(admin, capability)));
            self.ledgers
                .write()
                .insert(custody, Arc::new(Mutex::new(Ledger::new(admin, custody))));
        }

        info!(custody = %custody, "ledger bootstrapped");
        Ok(custody)
    }

    /// Move `amount` from the caller into custody.
    #[instrument(skip(self, caller), fields(caller = %caller.address()))]
    pub async fn handle_deposit(
        &self,
        caller: &Signer,
        custody: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.deposit_inner(caller, custody, amount)
            .await
            .map_err(|e| self.rejected("deposit", e))
    }

    async fn deposit_inner(
        &self,
        caller: &Signer,
        custody: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let handle = self.ledger(&custody)?;
        let mut ledger = handle.lock().await;

        ledger.check_deposit(&caller.address(), amount)?;
        self.bank.transfer(caller, custody, amount).await?;
        ledger.settle_deposit(amount)?;

        info!(amount, total_balance = ledger.total_balance(), "deposit committed");
        self.commit(&ledger, LedgerEvent::Deposit { amount });
        Ok(())
    }

    /// Reserve `amount` for `beneficiary`.
    #[instrument(skip(self, caller), fields(caller = %caller.address()))]
    pub async fn handle_allocate(
        &self,
        caller: &Signer,
        custody: Address,
        beneficiary: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.allocate_inner(caller, custody, beneficiary, amount)
            .await
            .map_err(|e| self.rejected("allocate", e))
    }

    async fn allocate_inner(
        &self,
        caller: &Signer,
        custody: Address,
        beneficiary: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let handle = self.ledger(&custody)?;
        let mut ledger = handle.lock().await;

        let entitlement = ledger.allocate(&caller.address(), beneficiary, amount)?;

        info!(
            beneficiary = %beneficiary,
            amount,
            entitlement,
            total_allocated = ledger.total_allocated(),
            "allocation committed"
        );
        self.commit(&ledger, LedgerEvent::Allocate { beneficiary, amount });
        Ok(())
    }

    /// Pay the caller's whole entitlement.
    #[instrument(skip(self, caller), fields(beneficiary = %caller.address()))]
    pub async fn handle_claim(
        &self,
        caller: &Signer,
        custody: Address,
    ) -> Result<Amount, LedgerError> {
        self.claim_inner(caller, custody)
            .await
            .map_err(|e| self.rejected("claim", e))
    }

    async fn claim_inner(&self, caller: &Signer, custody: Address) -> Result<Amount, LedgerError> {
        let beneficiary = caller.address();
        let handle = self.ledger(&custody)?;
        let mut ledger = handle.lock().await;

        let amount = ledger.check_claim(&beneficiary)?;
        let authority = self.authority_for(&ledger)?;
        let custody_signer = self.signer.act_as(authority.capability());

        self.ensure_registered(beneficiary).await?;
        self.bank
            .transfer(&custody_signer, beneficiary, amount)
            .await?;
        let settled = ledger.settle_claim(&beneficiary)?;
        debug_assert_eq!(settled, amount);

        info!(
            amount,
            total_balance = ledger.total_balance(),
            total_allocated = ledger.total_allocated(),
            "claim committed"
        );
        self.commit(&ledger, LedgerEvent::Claim { beneficiary, amount });
        Ok(amount)
    }

    /// Pay `amount` of unallocated custody to the admin.
    #[instrument(skip(self, caller), fields(caller = %caller.address()))]
    pub async fn handle_withdraw(
        &self,
        caller: &Signer,
        custody: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.withdraw_inner(caller, custody, amount)
            .await
            .map_err(|e| self.rejected("withdraw", e))
    }

    async fn withdraw_inner(
        &self,
        caller: &Signer,
        custody: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let admin = caller.address();
        let handle = self.ledger(&custody)?;
        let mut ledger = handle.lock().await;

        ledger.check_withdraw(&admin, amount)?;
        let authority = self.authority_for(&ledger)?;
        let custody_signer = self.signer.act_as(authority.capability());

        self.ensure_registered(admin).await?;
        self.bank.transfer(&custody_signer, admin, amount).await?;
        ledger.settle_withdraw(amount)?;

        info!(amount, available = ledger.available(), "withdrawal committed");
        self.commit(&ledger, LedgerEvent::Withdraw { amount });
        Ok(())
    }

    /// Hand administration to `new_admin`.
    #[instrument(skip(self, caller), fields(caller = %caller.address()))]
    pub async fn handle_transfer_ownership(
        &self,
        caller: &Signer,
        custody: Address,
        new_admin: Address,
    ) -> Result<(), LedgerError> {
        self.transfer_ownership_inner(caller, custody, new_admin)
            .await
            .map_err(|e| self.rejected("transfer_ownership", e))
    }

    async fn transfer_ownership_inner(
        &self,
        caller: &Signer,
        custody: Address,
        new_admin: Address,
    ) -> Result<(), LedgerError> {
        let handle = self.ledger(&custody)?;
        let mut ledger = handle.lock().await;

        let previous = ledger.transfer_ownership(&caller.address(), new_admin)?;

        info!(from = %previous, to = %new_admin, "ownership transferred");
        self.commit(
            &ledger,
            LedgerEvent::OwnershipTransfer {
                custody_address: custody,
                from: previous,
                to: new_admin,
            },
        );
        Ok(())
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn ledger(&self, custody: &Address) -> Result<LedgerHandle, LedgerError> {
        self.ledgers
            .read()
            .get(custody)
            .cloned()
            .ok_or(LedgerError::LedgerNotFound(*custody))
    }

    fn authority_for(&self, ledger: &Ledger) -> Result<Arc<DelegatedAuthority>, LedgerError> {
        let key = ledger.authority_key();
        self.authorities
            .read()
            .get(&key)
            .cloned()
            .ok_or(LedgerError::AuthorityNotFound(key))
    }

    async fn ensure_registered(&self, account: Address) -> Result<(), LedgerError> {
        if !self.bank.is_registered(account).await {
            debug!(account = %account, "registering account");
            self.bank.register(account).await?;
        }
        Ok(())
    }

    fn commit(&self, ledger: &Ledger, event: LedgerEvent) {
        let kind = event.kind();
        self.audit.append(ledger.custody_address(), event);
        metrics::record_operation(kind);

        if self.config.verify_invariants {
            let violations = check_all_invariants(ledger);
            if !violations.is_empty() {
                for violation in &violations {
                    error!(
                        custody = %ledger.custody_address(),
                        violation = %violation,
                        "ledger invariant violated"
                    );
                }
                metrics::record_invariant_violations(violations.len() as u64);
            }
        }
    }

    fn rejected(&self, operation: &'static str, err: LedgerError) -> LedgerError {
        warn!(operation, reason = err.kind(), error = %err, "operation rejected");
        metrics::record_rejection(err.kind());
        err
    }
}

#[async_trait]
impl<B, D, A> CustodyLedgerApi for CustodyLedgerService<B, D, A>
where
    B: FundsTransfer + AccountRegistry,
    D: DelegatedSigner,
    A: AuditSink,
{
    async fn bootstrap(&self, caller: &Signer) -> Result<Address, LedgerError> {
        self.handle_bootstrap(caller).await
    }

    async fn deposit(
        &self,
        caller: &Signer,
        custody: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.handle_deposit(caller, custody, amount).await
    }

    async fn allocate(
        &self,
        caller: &Signer,
        custody: Address,
        beneficiary: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.handle_allocate(caller, custody, beneficiary, amount)
            .await
    }

    async fn claim(&self, caller: &Signer, custody: Address) -> Result<Amount, LedgerError> {
        self.handle_claim(caller, custody).await
    }

    async fn withdraw(
        &self,
        caller: &Signer,
        custody: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.handle_withdraw(caller, custody, amount).await
    }

    async fn transfer_ownership(
        &self,
        caller: &Signer,
        custody: Address,
        new_admin: Address,
    ) -> Result<(), LedgerError> {
        self.handle_transfer_ownership(caller, custody, new_admin)
            .await
    }

    async fn total_balance(&self, custody: Address) -> Result<Amount, LedgerError> {
        let handle = self.ledger(&custody)?;
        let ledger = handle.lock().await;
        Ok(ledger.total_balance())
    }

    async fn total_allocated(&self, custody: Address) -> Result<Amount, LedgerError> {
        let handle = self.ledger(&custody)?;
        let ledger = handle.lock().await;
        Ok(ledger.total_allocated())
    }

    async fn available(&self, custody: Address) -> Result<Amount, LedgerError> {
        let handle = self.ledger(&custody)?;
        let ledger = handle.lock().await;
        Ok(ledger.available())
    }

    async fn allocation_of(
        &self,
        custody: Address,
        beneficiary: Address,
    ) -> Result<Amount, LedgerError> {
        let handle = self.ledger(&custody)?;
        let ledger = handle.lock().await;
        Ok(ledger.allocation_of(&beneficiary))
    }

    async fn snapshot(&self, custody: Address) -> Result<LedgerSnapshot, LedgerError> {
        let handle = self.ledger(&custody)?;
        let ledger = handle.lock().await;
        Ok(ledger.snapshot())
    }

    fn custody_address_of(&self, admin: Address) -> Result<Address, LedgerError> {
        self.authorities
            .read()
            .get(&admin)
            .map(|authority| authority.custody_address())
            .ok_or(LedgerError::AuthorityNotFound(admin))
    }
}

/// Create a service over fresh in-memory adapters.
pub fn create_test_service() -> InMemoryLedgerService {
    CustodyLedgerService::new(
        Arc::new(InMemoryCoinStore::new()),
        Arc::new(InMemoryDelegatedSigner::new()),
        Arc::new(InMemoryAuditLog::new()),
        LedgerConfig::default(),
    )
}
