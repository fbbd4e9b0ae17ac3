//! # Domain Module
//!
//! Core accounting types for the custody ledger.

pub mod capability;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use capability::SignerCapability;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use value_objects::*;
