use uuid::Uuid;

use super::{TicketError, TICKET_DELIMITER};

/// Source of fresh, unpredictable ticket identities.
pub trait IdentitySource: Send + Sync {
    /// Produce a new identity. Must not return the same value twice in practice.
    fn next_identity(&self) -> Result<String, TicketError>;

    /// Name of this identity source
    fn name(&self) -> &'static str;
}

/// Random (v4) UUID identities in hyphenated form.
pub struct UuidIdentitySource;

impl UuidIdentitySource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UuidIdentitySource {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentitySource for UuidIdentitySource {
    fn next_identity(&self) -> Result<String, TicketError> {
        let identity = Uuid::new_v4().hyphenated().to_string();
        if identity.contains(TICKET_DELIMITER) {
            return Err(TicketError::IdentityUnavailable(format!(
                "generated identity contains '{}'",
                TICKET_DELIMITER
            )));
        }
        Ok(identity)
    }

    fn name(&self) -> &'static str {
        "uuid_v4"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uuid_identity_is_valid_uuid() {
        let source = UuidIdentitySource::new();
        let identity = source.next_identity().unwrap();
        assert!(Uuid::parse_str(&identity).is_ok());
        assert!(!identity.contains(TICKET_DELIMITER));
        assert_eq!(identity.len(), 36);
    }

    #[test]
    fn test_uuid_identities_are_unique() {
        let source = UuidIdentitySource::new();
        let identities: HashSet<String> = (0..1000)
            .map(|_| source.next_identity().unwrap())
            .collect();
        assert_eq!(identities.len(), 1000);
    }

    #[test]
    fn test_uuid_identity_source_name() {
        assert_eq!(UuidIdentitySource::new().name(), "uuid_v4");
    }
}
