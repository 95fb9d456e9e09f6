use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use report_core::{ApisConfig, ReportIssuer};

/// Shared application state
pub struct AppState {
    config: ApisConfig,
    issuer: ReportIssuer,
    /// Unix millis of the last overload flip, 0 when it never flipped.
    last_toggle_ms: AtomicI64,
}

impl AppState {
    pub fn new(config: ApisConfig, issuer: ReportIssuer) -> Self {
        Self {
            config,
            issuer,
            last_toggle_ms: AtomicI64::new(0),
        }
    }

    pub fn config(&self) -> &ApisConfig {
        &self.config
    }

    pub fn issuer(&self) -> &ReportIssuer {
        &self.issuer
    }

    pub fn record_toggle(&self, at: DateTime<Utc>) {
        self.last_toggle_ms
            .store(at.timestamp_millis(), Ordering::Relaxed);
    }

    pub fn last_toggle(&self) -> Option<DateTime<Utc>> {
        match self.last_toggle_ms.load(Ordering::Relaxed) {
            0 => None,
            ms => DateTime::from_timestamp_millis(ms),
        }
    }
}
