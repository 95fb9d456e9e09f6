//! Report generation configuration.

use serde::{Deserialize, Serialize};

/// Configuration for synthetic report generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Number of rows in every report.
    #[serde(default = "default_rows")]
    pub rows: u32,

    /// Simulated production latency per report (milliseconds).
    #[serde(default = "default_latency")]
    pub latency_ms: u64,
}

fn default_rows() -> u32 {
    5
}

fn default_latency() -> u64 {
    1000 // 1 second
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            latency_ms: default_latency(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.rows, 5);
        assert_eq!(config.latency_ms, 1000);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ReportConfig = toml::from_str("latency_ms = 0").unwrap();
        assert_eq!(config.rows, 5);
        assert_eq!(config.latency_ms, 0);
    }
}
