//! Integration tests across the service, adapters and audit log.

pub mod concurrency;
pub mod ownership;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod fixtures {
    use custody_ledger::{
        create_test_service, Address, Amount, CustodyLedgerApi, InMemoryLedgerService, Signer,
    };

    pub const ADMIN: Address = Address::new([0xAA; 32]);
    pub const X: Address = Address::new([0x01; 32]);
    pub const Y: Address = Address::new([0x02; 32]);
    pub const MALLORY: Address = Address::new([0xEE; 32]);

    /// Bootstrapped ledger whose admin holds `funds` outside custody.
    pub async fn bootstrapped(funds: Amount) -> (InMemoryLedgerService, Address) {
        custody_telemetry::init_test_tracing();

        let service = create_test_service();
        service.bank().mint(ADMIN, funds).expect("mint");
        let custody = service
            .bootstrap(&Signer::new(ADMIN))
            .await
            .expect("bootstrap");
        (service, custody)
    }
}
