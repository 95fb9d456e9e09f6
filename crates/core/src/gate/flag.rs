use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Answers whether the service is currently too busy to hand out reports.
///
/// The gate is global: while it reports overloaded, every lookup is told the
/// report is not ready, whatever the ticket.
pub trait ReadinessGate: Send + Sync {
    fn is_overloaded(&self) -> bool;
}

/// Shared process-wide overload flag.
///
/// Clones share the same underlying atomic. Reads may be briefly stale, which
/// is fine for a coarse gate.
#[derive(Debug, Clone, Default)]
pub struct OverloadFlag {
    inner: Arc<AtomicBool>,
}

impl OverloadFlag {
    pub fn new(overloaded: bool) -> Self {
        Self {
            inner: Arc::new(AtomicBool::new(overloaded)),
        }
    }

    pub fn set(&self, overloaded: bool) {
        self.inner.store(overloaded, Ordering::SeqCst);
    }

    /// Flip the flag and return the new value.
    pub fn toggle(&self) -> bool {
        !self.inner.fetch_xor(true, Ordering::SeqCst)
    }
}

impl ReadinessGate for OverloadFlag {
    fn is_overloaded(&self) -> bool {
        self.inner.load(Ordering::Relaxed)
    }
}
