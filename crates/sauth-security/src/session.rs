//! Session id generation

use uuid::Uuid;

/// Produces fresh session tokens for a user.
pub trait SessionIdGenerator: Send + Sync {
    /// Returns `None` when no session can be issued for `user_id`.
    fn generate(&self, user_id: &str) -> Option<String>;
}

/// Random v4 UUID tokens.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSessionIdGenerator;

impl SessionIdGenerator for UuidSessionIdGenerator {
    fn generate(&self, user_id: &str) -> Option<String> {
        if user_id.trim().is_empty() {
            return None;
        }
        Some(Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_session_id() {
        let generator = UuidSessionIdGenerator;
        let first = generator.generate("1").unwrap();
        let second = generator.generate("1").unwrap();
        assert!(Uuid::parse_str(&first).is_ok());
        assert_ne!(first, second);
    }

    #[test]
    fn test_blank_user_id_gets_no_session() {
        let generator = UuidSessionIdGenerator;
        assert!(generator.generate("").is_none());
        assert!(generator.generate("   ").is_none());
    }
}
