//! Report generation.
//!
//! Reports are derived from the resumption offset alone, so they can be
//! rebuilt on every lookup instead of being stored.

mod config;
mod generator;
mod types;

pub use config::ReportConfig;
pub use generator::{ReportGenerator, SyntheticReportGenerator};
pub use types::{Report, ReportError, ReportRow};
