//! Submit-then-poll collection run.
//!
//! `Idle -> Submitted -> Polling -> {Completed | Failed | TimedOut}`. Polling
//! loops on "not ready"; every other failure is terminal. The whole run is
//! bounded by one deadline, which also cuts short an in-progress wait.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::ticket::Ticket;

use super::api::ReportApi;
use super::config::CollectorConfig;
use super::types::{Artifact, CollectorError, CollectorState, PollOutcome};

/// Timing of a collection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Wait between polls while the report is not ready.
    pub retry_interval: Duration,
    /// Bound on the whole submit-and-poll run.
    pub deadline: Duration,
}

impl From<&CollectorConfig> for PollPolicy {
    fn from(config: &CollectorConfig) -> Self {
        Self {
            retry_interval: Duration::from_millis(config.retry_interval_ms),
            deadline: Duration::from_millis(config.deadline_ms),
        }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::from(&CollectorConfig::default())
    }
}

/// Drives one ticket from submission to a downloaded report.
pub struct ReportCollector<A> {
    api: A,
    policy: PollPolicy,
    state: watch::Sender<CollectorState>,
}

impl<A: ReportApi> ReportCollector<A> {
    pub fn new(api: A, policy: PollPolicy) -> Self {
        let (state, _) = watch::channel(CollectorState::Idle);
        Self { api, policy, state }
    }

    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Current state of the run.
    pub fn state(&self) -> CollectorState {
        self.state.borrow().clone()
    }

    /// Watch state transitions.
    pub fn subscribe(&self) -> watch::Receiver<CollectorState> {
        self.state.subscribe()
    }

    fn transition(&self, next: CollectorState) {
        let previous = self.state.send_replace(next);
        debug!(
            from = previous.name(),
            to = self.state.borrow().name(),
            "Collector state transition"
        );
    }

    /// Submit a report request. No retry: any failure ends the run.
    pub async fn request_report(&self, offset: u64) -> Result<Ticket, CollectorError> {
        info!(offset, "Requesting report");

        let raw = self.api.request_report(offset).await?;
        let ticket = Ticket::decode(&raw)?;

        info!(ticket = %ticket, "Report requested");
        self.transition(CollectorState::Submitted {
            ticket: ticket.encode(),
        });
        Ok(ticket)
    }

    /// Poll until the report is ready, sleeping `retry_interval` after each
    /// "not ready". Transport failures are not retried.
    pub async fn fetch_report(&self, ticket: &Ticket) -> Result<Artifact, CollectorError> {
        info!(ticket = %ticket, "Getting report");

        let mut attempt: u32 = 0;
        loop {
            attempt = next_attempt(attempt);
            self.transition(CollectorState::Polling { attempt });

            match self.api.get_report(ticket).await {
                Ok(PollOutcome::Ready(artifact)) => {
                    info!(attempt, bytes = artifact.body.len(), "Report received");
                    return Ok(artifact);
                }
                Ok(PollOutcome::NotReady) => {
                    info!(
                        attempt,
                        retry_in_ms = self.policy.retry_interval.as_millis() as u64,
                        "Report not ready, retrying"
                    );
                    tokio::time::sleep(self.policy.retry_interval).await;
                }
                Err(e) => {
                    warn!(attempt, "Error downloading report: {}", e);
                    return Err(e);
                }
            }
        }
    }

    /// Run submit and poll under the overall deadline.
    pub async fn collect(&self, offset: u64) -> Result<Artifact, CollectorError> {
        let deadline = self.policy.deadline;

        let run = async {
            let ticket = self.request_report(offset).await?;
            self.fetch_report(&ticket).await
        };

        let result = match tokio::time::timeout(deadline, run).await {
            Ok(result) => result,
            Err(_) => Err(CollectorError::DeadlineExceeded(deadline)),
        };

        match &result {
            Ok(_) => self.transition(CollectorState::Completed),
            Err(CollectorError::DeadlineExceeded(_)) => {
                error!(deadline_ms = deadline.as_millis() as u64, "Collection timed out");
                self.transition(CollectorState::TimedOut);
            }
            Err(e) => {
                error!("Collection failed: {}", e);
                self.transition(CollectorState::Failed {
                    reason: e.to_string(),
                });
            }
        }

        result
    }
}

/// Attempt counter step. Sticks at `u32::MAX` on very long runs.
fn next_attempt(attempt: u32) -> u32 {
    attempt.saturating_add(1)
}

/// Write the report into `dir`, creating it if needed.
///
/// Uses the server-announced filename (final path component only), falling
/// back to `<offset>.csv`.
pub async fn save_artifact(
    artifact: &Artifact,
    dir: &Path,
    offset: u64,
) -> Result<PathBuf, CollectorError> {
    let file_name = artifact
        .file_name
        .as_deref()
        .and_then(|name| Path::new(name).file_name())
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| format!("{}.csv", offset).into());
    let path = dir.join(file_name);

    let save_error = |e: std::io::Error| CollectorError::Save {
        path: path.clone(),
        message: e.to_string(),
    };

    tokio::fs::create_dir_all(dir).await.map_err(save_error)?;
    tokio::fs::write(&path, &artifact.body)
        .await
        .map_err(save_error)?;

    info!(path = %path.display(), bytes = artifact.body.len(), "Saved report");
    Ok(path)
}
