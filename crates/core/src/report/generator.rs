use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::config::ReportConfig;
use super::types::{Report, ReportError};

/// Produces the report for a given resumption offset.
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    /// Generate the report starting at `offset`. The same offset must always
    /// produce the same report.
    async fn generate(&self, offset: u64) -> Result<Report, ReportError>;

    /// Name of this generator
    fn name(&self) -> &'static str;
}

/// Generator producing fixed-size synthetic reports after a simulated delay.
pub struct SyntheticReportGenerator {
    config: ReportConfig,
}

impl SyntheticReportGenerator {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }
}

impl Default for SyntheticReportGenerator {
    fn default() -> Self {
        Self::new(ReportConfig::default())
    }
}

#[async_trait]
impl ReportGenerator for SyntheticReportGenerator {
    async fn generate(&self, offset: u64) -> Result<Report, ReportError> {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
        }
        let report = Report::from_offset(offset, self.config.rows)?;
        debug!(offset, rows = report.rows().len(), "Generated report");
        Ok(report)
    }

    fn name(&self) -> &'static str {
        "synthetic"
    }
}
