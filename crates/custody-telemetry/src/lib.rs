//! # Custody Telemetry
//!
//! Structured logging for the custody ledger, built on `tracing-subscriber`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use custody_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("Failed to init telemetry");
//!     // Spans and events from custody-ledger are now written to stdout
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `custody-ledger` | Service name |
//! | `CUSTODY_LOG_LEVEL` | `info` | Log filter (falls back to `RUST_LOG`) |
//! | `CUSTODY_JSON_LOGS` | `false` | JSON formatted output |
//! | `CUSTODY_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `CUSTODY_AUDIT_LOG` | `true` | Emit `custody_audit` records |

#![warn(missing_docs)]

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::{build_filter, init_test_tracing, AUDIT_TARGET};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber is already installed, or installation failed
    #[error("Failed to initialize tracing subscriber: {0}")]
    SubscriberInit(String),

    /// Filter directives could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install the global subscriber described by `config`.
///
/// Returns a guard to be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    tracing_setup::init_tracing(&config)?;
    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active.
#[derive(Debug)]
pub struct TelemetryGuard {
    service_name: String,
}

impl TelemetryGuard {
    /// Service name the subscriber was installed for.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry...");
    }
}
