//! # Ownership Handover
//!
//! After `transfer_ownership` the new admin controls the ledger while the
//! delegated authority stays stored under the bootstrap admin.

#[cfg(test)]
mod tests {
    use super::super::fixtures::{bootstrapped, ADMIN, MALLORY, X, Y};
    use custody_ledger::{CustodyLedgerApi, LedgerError, LedgerEvent, Signer};

    #[tokio::test]
    async fn test_new_admin_takes_over_admin_operations() {
        let (service, custody) = bootstrapped(100).await;
        let old = Signer::new(ADMIN);
        let new = Signer::new(Y);
        service.deposit(&old, custody, 100).await.unwrap();

        service.transfer_ownership(&old, custody, Y).await.unwrap();

        assert_eq!(
            service.allocate(&old, custody, X, 10).await,
            Err(LedgerError::NotAdmin {
                caller: ADMIN,
                admin: Y
            })
        );
        service.allocate(&new, custody, X, 10).await.unwrap();
        service.withdraw(&new, custody, 90).await.unwrap();

        assert_eq!(service.bank().balance_of(&Y), 90);
        assert_eq!(service.claim(&Signer::new(X), custody).await.unwrap(), 10);
        assert_eq!(service.total_balance(custody).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_transfer_record_carries_both_admins() {
        let (service, custody) = bootstrapped(0).await;

        service
            .transfer_ownership(&Signer::new(ADMIN), custody, Y)
            .await
            .unwrap();

        assert_eq!(
            service.audit().events(),
            vec![LedgerEvent::OwnershipTransfer {
                custody_address: custody,
                from: ADMIN,
                to: Y,
            }]
        );
    }

    #[tokio::test]
    async fn test_custody_resolution_stays_with_bootstrap_admin() {
        let (service, custody) = bootstrapped(0).await;
        service
            .transfer_ownership(&Signer::new(ADMIN), custody, Y)
            .await
            .unwrap();

        assert_eq!(service.custody_address_of(ADMIN).unwrap(), custody);
        assert_eq!(
            service.custody_address_of(Y),
            Err(LedgerError::AuthorityNotFound(Y))
        );

        let snapshot = service.snapshot(custody).await.unwrap();
        assert_eq!(snapshot.admin, Y);
        assert_eq!(snapshot.authority_key, ADMIN);
    }

    #[tokio::test]
    async fn test_handover_chain() {
        let (service, custody) = bootstrapped(50).await;
        service
            .deposit(&Signer::new(ADMIN), custody, 50)
            .await
            .unwrap();

        service
            .transfer_ownership(&Signer::new(ADMIN), custody, Y)
            .await
            .unwrap();
        service
            .transfer_ownership(&Signer::new(Y), custody, MALLORY)
            .await
            .unwrap();

        assert!(service
            .withdraw(&Signer::new(Y), custody, 1)
            .await
            .is_err());
        service
            .withdraw(&Signer::new(MALLORY), custody, 50)
            .await
            .unwrap();
        assert_eq!(service.bank().balance_of(&MALLORY), 50);
    }

    #[tokio::test]
    async fn test_previous_admin_can_bootstrap_nothing_new() {
        let (service, custody) = bootstrapped(0).await;
        service
            .transfer_ownership(&Signer::new(ADMIN), custody, Y)
            .await
            .unwrap();

        assert_eq!(
            service.bootstrap(&Signer::new(ADMIN)).await,
            Err(LedgerError::AlreadyInitialized { admin: ADMIN })
        );

        // The new admin has no authority slot yet, so a ledger of their own is allowed
        let own = service.bootstrap(&Signer::new(Y)).await.unwrap();
        assert_ne!(own, custody);
        assert_eq!(service.custody_address_of(Y).unwrap(), own);
    }
}
