//! Testing utilities and mock implementations.
//!
//! This module provides scripted implementations of the service seams
//! (readiness gate, identity source, report API), allowing the issuer and the
//! collector to be tested deterministically without timers or a network.
//!
//! # Example
//!
//! ```rust,ignore
//! use report_core::testing::{CountdownGate, MockReportApi};
//!
//! // Overloaded for the first three lookups
//! let gate = CountdownGate::new(3);
//!
//! // "Not ready" for the first two polls
//! let api = MockReportApi::new();
//! api.set_not_ready_polls(2);
//! ```

mod mock_gate;
mod mock_identity;
mod mock_report_api;

pub use mock_gate::{CountdownGate, StaticGate};
pub use mock_identity::{FailingIdentitySource, SequenceIdentitySource};
pub use mock_report_api::MockReportApi;
