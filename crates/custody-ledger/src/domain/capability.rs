//! # Signer Capability
//!
//! Opaque credential that lets the ledger act as its custody account.
//!
//! ## Ownership
//!
//! The capability is neither `Clone` nor `Serialize`. It is issued once by a
//! [`DelegatedSigner`](crate::ports::DelegatedSigner) at bootstrap, moved
//! into a [`DelegatedAuthority`](super::DelegatedAuthority), and only ever
//! lent back to the signer to mint a transient [`Signer`](super::Signer).

use super::value_objects::Address;
use std::fmt;

/// Credential bound to one custody account.
///
/// Only this crate's delegated signer can issue one:
///
/// ```compile_fail
/// use custody_ledger::{Address, SignerCapability};
///
/// let forged = SignerCapability::new(Address::ZERO);
/// ```
pub struct SignerCapability {
    account: Address,
}

impl SignerCapability {
    /// Issue a capability for `account`.
    #[must_use]
    pub(crate) fn new(account: Address) -> Self {
        Self { account }
    }

    /// Custody account the capability signs for.
    #[must_use]
    pub fn account(&self) -> Address {
        self.account
    }
}

impl fmt::Debug for SignerCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SignerCapability(***)")
    }
}
