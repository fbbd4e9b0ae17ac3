//! # Custody Ledger Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs          # Operation sequences end to end
//!     ├── ownership.rs      # Admin handover and delegated authority
//!     ├── concurrency.rs    # Parallel ledgers, parallel claims
//!     └── telemetry.rs      # Audit target routing
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p custody-tests
//!
//! # By category
//! cargo test -p custody-tests integration::flows
//! cargo test -p custody-tests integration::concurrency
//! ```

#![allow(dead_code)]

pub mod integration;
