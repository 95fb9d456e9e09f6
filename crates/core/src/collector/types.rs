use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::protocol::NOT_READY_BODY;
use crate::ticket::TicketError;

/// Protocol step a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    RequestReport,
    GetReport,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::RequestReport => write!(f, "request_report"),
            Step::GetReport => write!(f, "get_report"),
        }
    }
}

/// Terminal collector failures. None of these are retried.
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("transport error during {step}: {message}")]
    Transport { step: Step, message: String },

    #[error("unexpected HTTP status {status} during {step}: {body}")]
    UnexpectedStatus {
        step: Step,
        status: u16,
        body: String,
    },

    #[error("server returned an unusable ticket: {0}")]
    InvalidTicket(#[from] TicketError),

    #[error("deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    #[error("failed to save report to {path:?}: {message}")]
    Save { path: PathBuf, message: String },

    #[error("failed to create HTTP client: {0}")]
    Client(String),
}

impl CollectorError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, CollectorError::DeadlineExceeded(_))
    }
}

/// A downloaded report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
    /// Filename announced by the server, if any.
    pub file_name: Option<String>,
}

impl Artifact {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            content_type: None,
            file_name: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Result of a single poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Ready(Artifact),
    NotReady,
}

impl PollOutcome {
    /// Classify a successful lookup response.
    ///
    /// Only a body exactly equal to the not-ready marker means "retry";
    /// anything else is taken as the report.
    pub fn classify(artifact: Artifact) -> Self {
        if artifact.body == NOT_READY_BODY.as_bytes() {
            PollOutcome::NotReady
        } else {
            PollOutcome::Ready(artifact)
        }
    }
}

/// Where a collection run currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectorState {
    Idle,
    Submitted { ticket: String },
    Polling { attempt: u32 },
    Completed,
    Failed { reason: String },
    TimedOut,
}

impl CollectorState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CollectorState::Completed | CollectorState::Failed { .. } | CollectorState::TimedOut
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            CollectorState::Idle => "idle",
            CollectorState::Submitted { .. } => "submitted",
            CollectorState::Polling { .. } => "polling",
            CollectorState::Completed => "completed",
            CollectorState::Failed { .. } => "failed",
            CollectorState::TimedOut => "timed_out",
        }
    }
}
