//! Opaque report tickets.
//!
//! A ticket is `<identity>_<offset>`: a fresh unique identity paired with the
//! offset report generation resumes from.

mod identity;
mod types;

pub use identity::{IdentitySource, UuidIdentitySource};
pub use types::{parse_offset, Ticket, TicketError, TICKET_DELIMITER};
