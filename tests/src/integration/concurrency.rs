//! # Concurrency
//!
//! Operations on one ledger serialize; separate ledgers run side by side.

#[cfg(test)]
mod tests {
    use super::super::fixtures::{bootstrapped, ADMIN};
    use custody_ledger::{
        create_test_service, Address, CustodyLedgerApi, LedgerEvent, Signer,
    };
    use futures::future::join_all;
    use std::sync::Arc;

    fn beneficiary(i: u8) -> Address {
        Address::new([0x40 + i; 32])
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_claims_on_one_ledger() {
        let (service, custody) = bootstrapped(1_000).await;
        let service = Arc::new(service);
        let admin = Signer::new(ADMIN);
        service.deposit(&admin, custody, 1_000).await.unwrap();
        for i in 0..50 {
            service
                .allocate(&admin, custody, beneficiary(i), 10)
                .await
                .unwrap();
        }

        let handles: Vec<_> = (0..50)
            .map(|i| {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    service.claim(&Signer::new(beneficiary(i)), custody).await
                })
            })
            .collect();

        for result in join_all(handles).await {
            assert_eq!(result.unwrap(), Ok(10));
        }
        assert_eq!(service.total_balance(custody).await.unwrap(), 500);
        assert_eq!(service.total_allocated(custody).await.unwrap(), 0);
        assert_eq!(service.bank().balance_of(&custody), 500);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_duplicate_concurrent_claims_pay_once() {
        let (service, custody) = bootstrapped(100).await;
        let service = Arc::new(service);
        let admin = Signer::new(ADMIN);
        service.deposit(&admin, custody, 100).await.unwrap();
        service
            .allocate(&admin, custody, beneficiary(0), 70)
            .await
            .unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    service.claim(&Signer::new(beneficiary(0)), custody).await
                })
            })
            .collect();

        let paid = join_all(handles)
            .await
            .into_iter()
            .filter(|r| matches!(r, Ok(Ok(70))))
            .count();
        assert_eq!(paid, 1);
        assert_eq!(service.bank().balance_of(&beneficiary(0)), 70);
        assert_eq!(service.total_balance(custody).await.unwrap(), 30);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_interleaved_allocate_and_withdraw_stay_solvent() {
        let (service, custody) = bootstrapped(300).await;
        let service = Arc::new(service);
        service
            .deposit(&Signer::new(ADMIN), custody, 300)
            .await
            .unwrap();

        let handles: Vec<_> = (0..40u8)
            .map(|i| {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    let admin = Signer::new(ADMIN);
                    if i % 2 == 0 {
                        service.allocate(&admin, custody, beneficiary(i), 10).await
                    } else {
                        service.withdraw(&admin, custody, 10).await
                    }
                })
            })
            .collect();
        let committed = join_all(handles)
            .await
            .into_iter()
            .filter(|r| matches!(r, Ok(Ok(()))))
            .count();

        let balance = service.total_balance(custody).await.unwrap();
        let allocated = service.total_allocated(custody).await.unwrap();
        assert!(balance >= allocated);
        assert_eq!(service.bank().balance_of(&custody), balance);
        // Every success consumes 10 of the 300 available, whatever the order
        assert_eq!(committed, 30);
        assert_eq!(service.audit().len(), 1 + committed);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_independent_ledgers_in_parallel() {
        custody_telemetry::init_test_tracing();
        let service = Arc::new(create_test_service());
        let admins: Vec<Address> = (0..8u8).map(|i| Address::new([0x80 + i; 32])).collect();
        for admin in &admins {
            service.bank().mint(*admin, 100).unwrap();
        }

        let handles: Vec<_> = admins
            .iter()
            .map(|admin| {
                let service = Arc::clone(&service);
                let admin = *admin;
                tokio::spawn(async move {
                    let signer = Signer::new(admin);
                    let custody = service.bootstrap(&signer).await?;
                    service.deposit(&signer, custody, 100).await?;
                    service.allocate(&signer, custody, admin, 40).await?;
                    service.claim(&signer, custody).await?;
                    service.withdraw(&signer, custody, 60).await?;
                    Ok::<_, custody_ledger::LedgerError>(custody)
                })
            })
            .collect();

        let custodies: Vec<Address> = join_all(handles)
            .await
            .into_iter()
            .map(|r| r.unwrap().unwrap())
            .collect();

        assert_eq!(service.ledger_count(), admins.len());
        for (admin, custody) in admins.iter().zip(&custodies) {
            assert_eq!(service.custody_address_of(*admin).unwrap(), *custody);
            assert_eq!(service.total_balance(*custody).await.unwrap(), 0);
            assert_eq!(service.bank().balance_of(admin), 100);

            let kinds: Vec<_> = service
                .audit()
                .records_for(custody)
                .iter()
                .map(|r| r.event.kind())
                .collect();
            assert_eq!(kinds, vec!["deposit", "allocate", "claim", "withdraw"]);
        }
        assert!(service
            .audit()
            .events()
            .iter()
            .all(|e| !matches!(e, LedgerEvent::OwnershipTransfer { .. })));
    }
}
