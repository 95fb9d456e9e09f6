//! Readiness gate.
//!
//! This module provides the [`ReadinessGate`] predicate consulted on every
//! report lookup, the shared [`OverloadFlag`] implementing it, and the
//! [`OverloadToggler`] background task that flips the flag periodically.

mod config;
mod flag;
mod toggler;

pub use config::GateConfig;
pub use flag::{OverloadFlag, ReadinessGate};
pub use toggler::{OverloadToggler, ToggleCallback};
