//! Readiness gate configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the periodic overload toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Enable/disable the background toggle.
    /// When disabled, the service never reports itself overloaded.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// How often the overload flag is flipped (milliseconds).
    #[serde(default = "default_toggle_interval")]
    pub toggle_interval_ms: u64,

    /// State of the overload flag at startup.
    #[serde(default)]
    pub initially_overloaded: bool,
}

fn default_enabled() -> bool {
    true
}

fn default_toggle_interval() -> u64 {
    120_000 // 2 minutes
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            toggle_interval_ms: default_toggle_interval(),
            initially_overloaded: false,
        }
    }
}
