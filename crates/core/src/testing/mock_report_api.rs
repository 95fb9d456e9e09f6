//! Mock report service for testing the collector.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

use crate::collector::{Artifact, CollectorError, PollOutcome, ReportApi};
use crate::ticket::Ticket;

/// Mock implementation of the ReportApi trait.
///
/// Provides controllable behavior for testing:
/// - Answer "not ready" for a number of polls, or forever
/// - Fail a submission or a poll with a given error
/// - Delay polls to simulate a slow server
/// - Record requested offsets and count polls for assertions
///
/// # Example
///
/// ```rust,ignore
/// use report_core::testing::MockReportApi;
///
/// let api = MockReportApi::new();
/// api.set_not_ready_polls(3);
///
/// let collector = ReportCollector::new(api, PollPolicy::default());
/// let artifact = collector.collect(0).await?;
/// assert_eq!(collector.api().poll_count(), 4);
/// ```
pub struct MockReportApi {
    /// Identity used to build tickets.
    identity: String,
    /// Raw ticket body override.
    ticket_body: RwLock<Option<String>>,
    /// Remaining "not ready" answers.
    not_ready_polls: AtomicU32,
    /// Answer "not ready" forever.
    never_ready: AtomicBool,
    /// Report returned once ready.
    report: RwLock<Artifact>,
    /// If set, the next submission fails with this error.
    request_error: RwLock<Option<CollectorError>>,
    /// If set, the first poll after this many answered polls fails.
    poll_error: RwLock<Option<(u32, CollectorError)>>,
    /// Delay before answering each poll.
    poll_delay: RwLock<Duration>,
    /// Offsets submitted so far.
    requested_offsets: RwLock<Vec<u64>>,
    /// Polls made so far.
    polls: AtomicU32,
}

impl MockReportApi {
    pub const DEFAULT_IDENTITY: &'static str = "123e4567-e89b-12d3-a456-426614174000";
    pub const DEFAULT_REPORT: &'static str = "timestamp,data\n0,data-0\n";

    pub fn new() -> Self {
        Self {
            identity: Self::DEFAULT_IDENTITY.to_string(),
            ticket_body: RwLock::new(None),
            not_ready_polls: AtomicU32::new(0),
            never_ready: AtomicBool::new(false),
            report: RwLock::new(
                Artifact::new(Self::DEFAULT_REPORT)
                    .with_content_type("text/csv")
                    .with_file_name("0.csv"),
            ),
            request_error: RwLock::new(None),
            poll_error: RwLock::new(None),
            poll_delay: RwLock::new(Duration::ZERO),
            requested_offsets: RwLock::new(Vec::new()),
            polls: AtomicU32::new(0),
        }
    }

    /// Answer "not ready" to the next `polls` polls.
    pub fn set_not_ready_polls(&self, polls: u32) {
        self.not_ready_polls.store(polls, Ordering::SeqCst);
    }

    /// Never become ready.
    pub fn set_never_ready(&self) {
        self.never_ready.store(true, Ordering::SeqCst);
    }

    /// Return this body from submissions instead of a well-formed ticket.
    pub async fn set_ticket_body(&self, body: impl Into<String>) {
        *self.ticket_body.write().await = Some(body.into());
    }

    pub async fn set_report(&self, report: Artifact) {
        *self.report.write().await = report;
    }

    pub async fn fail_next_request(&self, error: CollectorError) {
        *self.request_error.write().await = Some(error);
    }

    /// Fail the poll following the first `answered` polls.
    pub async fn fail_poll_after(&self, answered: u32, error: CollectorError) {
        *self.poll_error.write().await = Some((answered, error));
    }

    pub async fn set_poll_delay(&self, delay: Duration) {
        *self.poll_delay.write().await = delay;
    }

    pub async fn requested_offsets(&self) -> Vec<u64> {
        self.requested_offsets.read().await.clone()
    }

    pub fn poll_count(&self) -> u32 {
        self.polls.load(Ordering::SeqCst)
    }
}

impl Default for MockReportApi {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MockReportApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockReportApi")
            .field("identity", &self.identity)
            .field("not_ready_polls", &self.not_ready_polls)
            .field("never_ready", &self.never_ready)
            .field("polls", &self.polls)
            .finish()
    }
}

#[async_trait]
impl ReportApi for MockReportApi {
    async fn request_report(&self, offset: u64) -> Result<String, CollectorError> {
        self.requested_offsets.write().await.push(offset);

        if let Some(error) = self.request_error.write().await.take() {
            return Err(error);
        }

        match self.ticket_body.read().await.as_ref() {
            Some(body) => Ok(body.clone()),
            None => Ok(format!("{}_{}", self.identity, offset)),
        }
    }

    async fn get_report(&self, _ticket: &Ticket) -> Result<PollOutcome, CollectorError> {
        let poll = self.polls.fetch_add(1, Ordering::SeqCst) + 1;

        let delay = *self.poll_delay.read().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        {
            let mut poll_error = self.poll_error.write().await;
            let due = matches!(poll_error.as_ref(), Some((answered, _)) if poll > *answered);
            if due {
                if let Some((_, error)) = poll_error.take() {
                    return Err(error);
                }
            }
        }

        if self.never_ready.load(Ordering::SeqCst) {
            return Ok(PollOutcome::NotReady);
        }

        let remaining = self.not_ready_polls.load(Ordering::SeqCst);
        if remaining > 0 {
            self.not_ready_polls.store(remaining - 1, Ordering::SeqCst);
            return Ok(PollOutcome::NotReady);
        }

        Ok(PollOutcome::Ready(self.report.read().await.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::Step;

    fn ticket() -> Ticket {
        Ticket::new(MockReportApi::DEFAULT_IDENTITY, 0).unwrap()
    }

    #[tokio::test]
    async fn test_request_report_builds_ticket() {
        let api = MockReportApi::new();
        let body = api.request_report(10000).await.unwrap();
        assert_eq!(body, format!("{}_10000", MockReportApi::DEFAULT_IDENTITY));
        assert_eq!(api.requested_offsets().await, vec![10000]);
    }

    #[tokio::test]
    async fn test_not_ready_countdown() {
        let api = MockReportApi::new();
        api.set_not_ready_polls(2);

        assert_eq!(api.get_report(&ticket()).await.unwrap(), PollOutcome::NotReady);
        assert_eq!(api.get_report(&ticket()).await.unwrap(), PollOutcome::NotReady);
        assert!(matches!(
            api.get_report(&ticket()).await.unwrap(),
            PollOutcome::Ready(_)
        ));
        assert_eq!(api.poll_count(), 3);
    }

    #[tokio::test]
    async fn test_poll_error_fires_once() {
        let api = MockReportApi::new();
        api.fail_poll_after(
            0,
            CollectorError::Transport {
                step: Step::GetReport,
                message: "reset".to_string(),
            },
        )
        .await;

        assert!(api.get_report(&ticket()).await.is_err());
        assert!(api.get_report(&ticket()).await.is_ok());
    }
}
