use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

use crate::gate::GateConfig;
use crate::report::ReportConfig;

/// Root configuration of the report service
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApisConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub gate: GateConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: ApisConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.gate.toggle_interval_ms, 120_000);
        assert_eq!(config.report.rows, 5);
        assert_eq!(config.report.latency_ms, 1000);
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000

[gate]
enabled = false
toggle_interval_ms = 1000

[report]
rows = 10
latency_ms = 0
"#;
        let config: ApisConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
        assert!(!config.gate.enabled);
        assert_eq!(config.gate.toggle_interval_ms, 1000);
        assert_eq!(config.report.rows, 10);
        assert_eq!(config.report.latency_ms, 0);
    }

    #[test]
    fn test_deserialize_invalid_port_fails() {
        let toml = r#"
[server]
port = "not-a-port"
"#;
        let result: Result<ApisConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }
}
