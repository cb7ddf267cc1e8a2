//! Session record store trait (port)

use async_trait::async_trait;

use crate::domain::UserSession;
use crate::error::DomainError;

/// Field filter for session searches; unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFilter {
    pub session_id: Option<String>,
    pub user_id: Option<String>,
}

impl SessionFilter {
    pub fn by_session_id(session_id: &str) -> Self {
        Self { session_id: Some(session_id.to_string()), user_id: None }
    }

    pub fn by_user_id(user_id: &str) -> Self {
        Self { session_id: None, user_id: Some(user_id.to_string()) }
    }

    pub fn matches(&self, session: &UserSession) -> bool {
        self.session_id.as_ref().map_or(true, |id| *id == session.session_id)
            && self.user_id.as_ref().map_or(true, |id| *id == session.user_id)
    }
}

/// Implementations return search results oldest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserSessionRepository: Send + Sync {
    /// Re-read persisted state so later calls see other writers' changes.
    async fn reload(&self) -> Result<(), DomainError>;
    async fn search(&self, filter: &SessionFilter) -> Result<Vec<UserSession>, DomainError>;
    async fn save(&self, session: &UserSession) -> Result<(), DomainError>;
    async fn remove(&self, session: &UserSession) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches() {
        let session = UserSession::new("1", "abc");

        assert!(SessionFilter::default().matches(&session));
        assert!(SessionFilter::by_session_id("abc").matches(&session));
        assert!(!SessionFilter::by_session_id("abd").matches(&session));
        assert!(SessionFilter::by_user_id("1").matches(&session));
        assert!(!SessionFilter::by_user_id("2").matches(&session));

        let both = SessionFilter { session_id: Some("abc".into()), user_id: Some("2".into()) };
        assert!(!both.matches(&session));
    }
}
