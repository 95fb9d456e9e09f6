//! Polling report collector.
//!
//! This module provides the client side of the ticket protocol: a
//! [`ReportApi`] transport (HTTP via [`HttpReportApi`]) and the
//! [`ReportCollector`] that submits one request and polls until the report is
//! ready or the deadline passes.

mod api;
mod config;
mod runner;
mod types;

pub use api::{HttpReportApi, ReportApi};
pub use config::CollectorConfig;
pub use runner::{save_artifact, PollPolicy, ReportCollector};
pub use types::{Artifact, CollectorError, CollectorState, PollOutcome, Step};
