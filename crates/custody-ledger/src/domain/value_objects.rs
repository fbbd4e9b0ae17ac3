//! # Value Objects
//!
//! Identity and amount primitives shared by the ledger, its ports and adapters.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Fungible amount in minimal units.
pub type Amount = u64;

// =============================================================================
// ADDRESS (32 bytes)
// =============================================================================

/// A 32-byte account identity.
///
/// Used for admins, beneficiaries, depositors and custody accounts alike.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 32]);

impl Address {
    /// The zero address.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates an address from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates an address from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let bytes: [u8; 32] = slice.try_into().ok()?;
        Some(Self(bytes))
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Full lowercase hex form with `0x` prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x{}...{}",
            hex::encode(&self.0[..4]),
            hex::encode(&self.0[30..])
        )
    }
}

/// Error parsing an [`Address`] from hex.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseAddressError {
    /// Input was not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Input decoded to the wrong number of bytes.
    #[error("expected 32 bytes, got {0}")]
    InvalidLength(usize),
}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches("0x");
        let bytes = hex::decode(digits).map_err(|e| ParseAddressError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes).ok_or(ParseAddressError::InvalidLength(bytes.len()))
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// SIGNER
// =============================================================================

/// Authority to move funds out of a single account.
///
/// Either the authenticated sender of an operation, or the transient custody
/// signer produced by a delegated authority. Not `Clone`: a signer is
/// consumed by reference for the duration of one operation.
#[derive(Debug, PartialEq, Eq)]
pub struct Signer {
    address: Address,
}

impl Signer {
    /// Signer for an already-authenticated account.
    ///
    /// Authentication happens in the submission layer, outside this crate.
    /// A signer built for a custody address gains nothing: the ledger
    /// rejects the custody account as depositor, beneficiary or admin with
    /// [`LedgerError::CustodyCounterparty`](super::LedgerError::CustodyCounterparty),
    /// and custody funds move only through a signer minted by
    /// [`DelegatedSigner::act_as`](crate::ports::DelegatedSigner::act_as).
    #[must_use]
    pub const fn new(address: Address) -> Self {
        Self { address }
    }

    /// The account this signer acts for.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }
}
