use thiserror::Error;

use crate::report::{Report, ReportError};
use crate::ticket::TicketError;

/// Outcome of a report lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The report for the ticket's offset.
    Ready(Report),
    /// The service is overloaded; ask again later.
    NotReady,
}

impl Lookup {
    pub fn is_ready(&self) -> bool {
        matches!(self, Lookup::Ready(_))
    }
}

/// Errors surfaced by the issuer.
#[derive(Debug, Error)]
pub enum IssueError {
    #[error(transparent)]
    Ticket(#[from] TicketError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

impl IssueError {
    /// Whether the caller sent something malformed (as opposed to a server fault).
    pub fn is_client_error(&self) -> bool {
        match self {
            IssueError::Ticket(e) => e.is_client_error(),
            IssueError::Report(_) => false,
        }
    }
}
