//! Scripted readiness gates.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::gate::ReadinessGate;

/// Gate that reports overloaded for the first `checks` checks, then clears.
#[derive(Debug, Default)]
pub struct CountdownGate {
    remaining: AtomicU32,
    checks: AtomicU32,
}

impl CountdownGate {
    pub fn new(checks: u32) -> Self {
        Self {
            remaining: AtomicU32::new(checks),
            checks: AtomicU32::new(0),
        }
    }

    /// Number of times the gate has been consulted.
    pub fn checks(&self) -> u32 {
        self.checks.load(Ordering::SeqCst)
    }
}

impl ReadinessGate for CountdownGate {
    fn is_overloaded(&self) -> bool {
        self.checks.fetch_add(1, Ordering::SeqCst);
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

/// Gate with a fixed answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticGate {
    overloaded: bool,
}

impl StaticGate {
    pub fn overloaded() -> Self {
        Self { overloaded: true }
    }

    pub fn ready() -> Self {
        Self { overloaded: false }
    }
}

impl ReadinessGate for StaticGate {
    fn is_overloaded(&self) -> bool {
        self.overloaded
    }
}
