use std::sync::Arc;

use tracing::{debug, info};

use crate::gate::ReadinessGate;
use crate::report::ReportGenerator;
use crate::ticket::{IdentitySource, Ticket};

use super::types::{IssueError, Lookup};

/// Mints tickets and answers lookups.
///
/// Holds no per-ticket state: a lookup decodes the ticket and rebuilds the
/// report from its offset.
pub struct ReportIssuer {
    identities: Arc<dyn IdentitySource>,
    gate: Arc<dyn ReadinessGate>,
    generator: Arc<dyn ReportGenerator>,
}

impl ReportIssuer {
    pub fn new(
        identities: Arc<dyn IdentitySource>,
        gate: Arc<dyn ReadinessGate>,
        generator: Arc<dyn ReportGenerator>,
    ) -> Self {
        Self {
            identities,
            gate,
            generator,
        }
    }

    /// Mint a ticket for a report starting at `offset` (0 when absent).
    pub fn submit(&self, offset: Option<u64>) -> Result<Ticket, IssueError> {
        let offset = offset.unwrap_or(0);
        let identity = self.identities.next_identity()?;
        let ticket = Ticket::new(identity, offset)?;
        info!(ticket = %ticket, offset, "Issued report ticket");
        Ok(ticket)
    }

    /// Look up the report for an encoded ticket.
    ///
    /// Malformed tickets are rejected before the gate is consulted. While the
    /// gate reports overloaded every valid ticket gets [`Lookup::NotReady`].
    pub async fn lookup(&self, raw_ticket: &str) -> Result<Lookup, IssueError> {
        let ticket = Ticket::decode(raw_ticket)?;

        if self.gate.is_overloaded() {
            debug!(ticket = %ticket, "Service overloaded, report not ready");
            return Ok(Lookup::NotReady);
        }

        let report = self.generator.generate(ticket.offset()).await?;
        info!(ticket = %ticket, rows = report.rows().len(), "Report ready");
        Ok(Lookup::Ready(report))
    }

    pub fn is_overloaded(&self) -> bool {
        self.gate.is_overloaded()
    }

    pub fn identity_source(&self) -> &dyn IdentitySource {
        self.identities.as_ref()
    }

    pub fn generator(&self) -> &dyn ReportGenerator {
        self.generator.as_ref()
    }
}
