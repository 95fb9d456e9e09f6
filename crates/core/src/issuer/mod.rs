//! Ticket issuer and readiness-gated lookup.

mod service;
mod types;

pub use service::ReportIssuer;
pub use types::{IssueError, Lookup};
