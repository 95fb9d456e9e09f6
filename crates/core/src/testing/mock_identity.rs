//! Identity sources with predictable output.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::ticket::{IdentitySource, TicketError};

/// Hands out the given identities in order, then fails.
#[derive(Debug)]
pub struct SequenceIdentitySource {
    identities: Mutex<VecDeque<String>>,
}

impl SequenceIdentitySource {
    pub fn new<I, S>(identities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identities: Mutex::new(identities.into_iter().map(Into::into).collect()),
        }
    }
}

impl IdentitySource for SequenceIdentitySource {
    fn next_identity(&self) -> Result<String, TicketError> {
        let mut identities = self
            .identities
            .lock()
            .map_err(|e| TicketError::IdentityUnavailable(e.to_string()))?;
        identities
            .pop_front()
            .ok_or_else(|| TicketError::IdentityUnavailable("sequence exhausted".to_string()))
    }

    fn name(&self) -> &'static str {
        "sequence"
    }
}

/// Always fails, as if the entropy source were exhausted.
#[derive(Debug, Clone)]
pub struct FailingIdentitySource {
    message: String,
}

impl FailingIdentitySource {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IdentitySource for FailingIdentitySource {
    fn next_identity(&self) -> Result<String, TicketError> {
        Err(TicketError::IdentityUnavailable(self.message.clone()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_then_exhausted() {
        let source = SequenceIdentitySource::new(["a", "b"]);
        assert_eq!(source.next_identity().unwrap(), "a");
        assert_eq!(source.next_identity().unwrap(), "b");
        assert!(matches!(
            source.next_identity(),
            Err(TicketError::IdentityUnavailable(_))
        ));
    }

    #[test]
    fn test_failing_source() {
        let source = FailingIdentitySource::new("no entropy");
        assert_eq!(
            source.next_identity().unwrap_err(),
            TicketError::IdentityUnavailable("no entropy".to_string())
        );
    }
}
