// ============================================================================
// Session Auth Core - User Session Entity
// File: crates/sauth-core/src/domain/user_session.rs
// Description: Persisted association of a session token to a user
// ============================================================================

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use sauth_shared::{new_id, now_seconds, store_timestamp, EntityId};

/// Session record kept by the record store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub id: EntityId,
    pub user_id: EntityId,
    pub session_id: String,

    #[serde(with = "store_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "store_timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl UserSession {
    pub fn new(user_id: impl Into<EntityId>, session_id: impl Into<String>) -> Self {
        let now = now_seconds();
        Self {
            id: new_id(),
            user_id: user_id.into(),
            session_id: session_id.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Instant after which the session is no longer honoured, if it expires at all
    pub fn expires_at(&self, duration_secs: i64) -> Option<DateTime<Utc>> {
        if duration_secs <= 0 {
            return None;
        }
        Some(self.created_at + Duration::seconds(duration_secs))
    }

    /// A session is still valid exactly at its expiry instant.
    pub fn is_expired_at(&self, duration_secs: i64, now: DateTime<Utc>) -> bool {
        self.expires_at(duration_secs)
            .map(|expires_at| expires_at < now)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_session_record() {
        let session = UserSession::new("1", "abc");
        assert_eq!(session.user_id, "1");
        assert_eq!(session.session_id, "abc");
        assert_eq!(session.created_at, session.updated_at);
    }

    #[test]
    fn test_expiry() {
        let session = UserSession::new("1", "abc");
        let created = session.created_at;

        assert!(session.expires_at(0).is_none());
        assert!(!session.is_expired_at(0, created + Duration::days(365)));
        assert!(!session.is_expired_at(-10, created + Duration::days(365)));

        assert_eq!(session.expires_at(60), Some(created + Duration::seconds(60)));
        assert!(!session.is_expired_at(60, created + Duration::seconds(59)));
        assert!(!session.is_expired_at(60, created + Duration::seconds(60)));
        assert!(session.is_expired_at(60, created + Duration::seconds(61)));
    }
}
