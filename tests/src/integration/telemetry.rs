//! # Audit Log Routing
//!
//! The ledger emits audit records on the target the subscriber filters.

#[cfg(test)]
mod tests {
    use custody_telemetry::{build_filter, TelemetryConfig};

    #[test]
    fn test_ledger_and_subscriber_share_audit_target() {
        assert_eq!(custody_ledger::AUDIT_TARGET, custody_telemetry::AUDIT_TARGET);
    }

    #[test]
    fn test_disabled_audit_log_silences_ledger_target() {
        let config = TelemetryConfig {
            audit_log: false,
            ..TelemetryConfig::default()
        };
        let filter = build_filter(&config).unwrap().to_string();
        assert!(filter.contains(&format!("{}=off", custody_ledger::AUDIT_TARGET)));

        let filter = build_filter(&TelemetryConfig::default()).unwrap().to_string();
        assert!(!filter.contains(custody_ledger::AUDIT_TARGET));
    }
}
