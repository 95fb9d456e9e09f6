//! Ticket type and its wire encoding.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Separator between the identity and the offset in an encoded ticket.
///
/// Identities must never contain it, otherwise the encoding is ambiguous.
pub const TICKET_DELIMITER: char = '_';

/// Errors produced while minting or decoding tickets.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TicketError {
    #[error("invalid ticket format: {0:?}")]
    InvalidFormat(String),

    #[error("invalid offset format: {0:?}")]
    InvalidOffset(String),

    #[error("invalid ticket identity: {0:?}")]
    InvalidIdentity(String),

    #[error("identity source unavailable: {0}")]
    IdentityUnavailable(String),
}

impl TicketError {
    /// Whether the error was caused by a malformed value supplied by a caller.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TicketError::InvalidFormat(_) | TicketError::InvalidOffset(_)
        )
    }
}

/// A pending-or-ready unit of work, identified by a unique identity and the
/// offset report generation starts from.
///
/// Tickets are immutable and carry everything the server needs to rebuild the
/// report, so nothing is stored server-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticket {
    identity: String,
    offset: u64,
}

impl Ticket {
    /// Pair an identity with an offset.
    ///
    /// Fails if the identity is empty or contains [`TICKET_DELIMITER`].
    pub fn new(identity: impl Into<String>, offset: u64) -> Result<Self, TicketError> {
        let identity = identity.into();
        if identity.is_empty() || identity.contains(TICKET_DELIMITER) {
            return Err(TicketError::InvalidIdentity(identity));
        }
        Ok(Self { identity, offset })
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Encode as `<identity>_<offset>`.
    pub fn encode(&self) -> String {
        format!("{}{}{}", self.identity, TICKET_DELIMITER, self.offset)
    }

    /// Decode a ticket previously produced by [`Ticket::encode`].
    ///
    /// The token must contain exactly one delimiter, a non-empty identity and
    /// an offset made only of ASCII digits that fits in a `u64`.
    pub fn decode(raw: &str) -> Result<Self, TicketError> {
        let mut parts = raw.split(TICKET_DELIMITER);
        let (identity, offset) = match (parts.next(), parts.next(), parts.next()) {
            (Some(identity), Some(offset), None) if !identity.is_empty() => (identity, offset),
            _ => return Err(TicketError::InvalidFormat(raw.to_string())),
        };

        let offset = parse_offset(offset)?;

        Ok(Self {
            identity: identity.to_string(),
            offset,
        })
    }
}

/// Parse a non-negative decimal offset.
///
/// `u64::from_str` accepts a leading `+`, which a ticket never carries, so
/// the digits are checked first.
pub fn parse_offset(value: &str) -> Result<u64, TicketError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TicketError::InvalidOffset(value.to_string()));
    }
    value
        .parse::<u64>()
        .map_err(|_| TicketError::InvalidOffset(value.to_string()))
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.identity, TICKET_DELIMITER, self.offset)
    }
}

impl FromStr for Ticket {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}
