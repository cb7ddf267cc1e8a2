// ============================================================================
// Session Auth Core - Session Authentication Service
// File: crates/sauth-core/src/services/session_auth_service.rs
// ============================================================================
//! Session lifecycle: create, resolve, expire and destroy session records
//! kept in the record store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use sauth_security::{SessionIdGenerator, UuidSessionIdGenerator};
use sauth_shared::config::SessionSettings;
use sauth_shared::EntityId;

use crate::domain::{User, UserSession};
use crate::error::DomainError;
use crate::repositories::{SessionFilter, UserFilter, UserRepository, UserSessionRepository};

/// Session authentication backed by a persistent record store
pub struct SessionAuthService {
    sessions: Arc<dyn UserSessionRepository>,
    users: Arc<dyn UserRepository>,
    id_generator: Arc<dyn SessionIdGenerator>,
    settings: SessionSettings,
}

/// Result of successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub session_id: String,
}

impl SessionAuthService {
    pub fn new(
        sessions: Arc<dyn UserSessionRepository>,
        users: Arc<dyn UserRepository>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            sessions,
            users,
            id_generator: Arc::new(UuidSessionIdGenerator),
            settings,
        }
    }

    pub fn with_id_generator(mut self, id_generator: Arc<dyn SessionIdGenerator>) -> Self {
        self.id_generator = id_generator;
        self
    }

    /// Name of the cookie carrying the session id
    pub fn session_name(&self) -> &str {
        &self.settings.name
    }

    /// Create and persist a session for `user_id`.
    ///
    /// Returns `None` when the generator refuses to issue an id.
    pub async fn create_session(&self, user_id: &str) -> Result<Option<String>, DomainError> {
        let Some(session_id) = self.id_generator.generate(user_id) else {
            debug!("No session id issued for user id {:?}", user_id);
            return Ok(None);
        };

        let record = UserSession::new(user_id, session_id.as_str());
        self.sessions.save(&record).await?;

        info!("Session created for user: {}", user_id);
        Ok(Some(session_id))
    }

    /// Resolve the owner of a session, `None` if unknown or expired.
    pub async fn user_id_for_session_id(
        &self,
        session_id: Option<&str>,
    ) -> Result<Option<EntityId>, DomainError> {
        self.user_id_for_session_id_at(session_id, Utc::now()).await
    }

    /// Same as [`Self::user_id_for_session_id`] with an explicit clock reading.
    pub async fn user_id_for_session_id_at(
        &self,
        session_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Option<EntityId>, DomainError> {
        let Some(session_id) = session_id.filter(|id| !id.is_empty()) else {
            return Ok(None);
        };

        let Some(record) = self.find_session(session_id).await? else {
            debug!("Session not found");
            return Ok(None);
        };

        if record.is_expired_at(self.settings.duration, now) {
            debug!("Session for user {} expired", record.user_id);
            return Ok(None);
        }

        Ok(Some(record.user_id))
    }

    /// Delete the session named by the request cookie (logout).
    ///
    /// Returns `false` when there is no cookie or it does not resolve to a live session.
    pub async fn destroy_session(&self, session_cookie: Option<&str>) -> Result<bool, DomainError> {
        let Some(session_id) = session_cookie.filter(|id| !id.is_empty()) else {
            return Ok(false);
        };

        let Some(user_id) = self.user_id_for_session_id(Some(session_id)).await? else {
            warn!("Logout refused: session does not resolve to a user");
            return Ok(false);
        };

        let Some(record) = self.find_session(session_id).await? else {
            return Ok(false);
        };

        self.sessions.remove(&record).await?;

        info!("Session destroyed for user: {}", user_id);
        Ok(true)
    }

    /// User owning the session named by the request cookie.
    pub async fn current_user(&self, session_cookie: Option<&str>) -> Result<Option<User>, DomainError> {
        let Some(user_id) = self.user_id_for_session_id(session_cookie).await? else {
            return Ok(None);
        };
        self.users.get(&user_id).await
    }

    /// Check credentials and open a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, DomainError> {
        info!("Login attempt for email: {}", email);

        let user = self
            .users
            .search(&UserFilter::by_email(email))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                warn!("Login failed: email not found: {}", email);
                DomainError::UserNotFound
            })?;

        if !user.is_valid_password(password) {
            warn!("Login failed: invalid password for: {}", email);
            return Err(DomainError::InvalidCredentials);
        }

        let session_id = self
            .create_session(&user.id)
            .await?
            .ok_or_else(|| DomainError::InternalError("unable to create session".to_string()))?;

        info!("Login successful for: {}", email);
        Ok(LoginResult { user, session_id })
    }

    async fn find_session(&self, session_id: &str) -> Result<Option<UserSession>, DomainError> {
        self.sessions.reload().await?;
        let matches = self
            .sessions
            .search(&SessionFilter::by_session_id(session_id))
            .await?;
        if matches.len() > 1 {
            warn!("{} records share one session id, using the oldest", matches.len());
        }
        Ok(matches.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::repositories::{MockUserRepository, MockUserSessionRepository};

    struct NoSessionIds;

    impl SessionIdGenerator for NoSessionIds {
        fn generate(&self, _user_id: &str) -> Option<String> {
            None
        }
    }

    fn session_store_with(records: Vec<UserSession>) -> MockUserSessionRepository {
        let mut store = MockUserSessionRepository::new();
        store.expect_reload().returning(|| Ok(()));
        store.expect_search().returning(move |filter| {
            Ok(records.iter().filter(|r| filter.matches(r)).cloned().collect())
        });
        store
    }

    fn service(
        sessions: MockUserSessionRepository,
        users: MockUserRepository,
        duration: i64,
    ) -> SessionAuthService {
        SessionAuthService::new(
            Arc::new(sessions),
            Arc::new(users),
            SessionSettings::new("_my_session_id", duration),
        )
    }

    #[tokio::test]
    async fn test_create_session_persists_record() {
        let mut sessions = MockUserSessionRepository::new();
        sessions
            .expect_save()
            .withf(|record| record.user_id == "1" && !record.session_id.is_empty())
            .times(1)
            .returning(|_| Ok(()));

        let svc = service(sessions, MockUserRepository::new(), 0);
        let session_id = svc.create_session("1").await.unwrap();
        assert!(session_id.is_some());
    }

    #[tokio::test]
    async fn test_create_session_without_generated_id() {
        let mut sessions = MockUserSessionRepository::new();
        sessions.expect_save().never();

        let svc = service(sessions, MockUserRepository::new(), 0)
            .with_id_generator(Arc::new(NoSessionIds));
        assert!(svc.create_session("1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_session_blank_user_id() {
        let mut sessions = MockUserSessionRepository::new();
        sessions.expect_save().never();

        let svc = service(sessions, MockUserRepository::new(), 0);
        assert!(svc.create_session("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_missing_session_id() {
        let mut sessions = MockUserSessionRepository::new();
        sessions.expect_reload().never();
        sessions.expect_search().never();

        let svc = service(sessions, MockUserRepository::new(), 0);
        assert!(svc.user_id_for_session_id(None).await.unwrap().is_none());
        assert!(svc.user_id_for_session_id(Some("")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_unknown_session() {
        let svc = service(
            session_store_with(vec![UserSession::new("1", "abc")]),
            MockUserRepository::new(),
            0,
        );
        assert!(svc.user_id_for_session_id(Some("zzz")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_without_duration_never_expires() {
        let mut record = UserSession::new("1", "abc");
        record.created_at = record.created_at - Duration::days(3650);

        let svc = service(session_store_with(vec![record]), MockUserRepository::new(), 0);
        assert_eq!(
            svc.user_id_for_session_id(Some("abc")).await.unwrap().as_deref(),
            Some("1")
        );
    }

    #[tokio::test]
    async fn test_lookup_honours_duration() {
        let record = UserSession::new("1", "abc");
        let created = record.created_at;
        let svc = service(session_store_with(vec![record]), MockUserRepository::new(), 60);

        let before = svc
            .user_id_for_session_id_at(Some("abc"), created + Duration::seconds(59))
            .await
            .unwrap();
        assert_eq!(before.as_deref(), Some("1"));

        let after = svc
            .user_id_for_session_id_at(Some("abc"), created + Duration::seconds(61))
            .await
            .unwrap();
        assert!(after.is_none());
    }

    #[tokio::test]
    async fn test_lookup_uses_first_search_result() {
        let mut older = UserSession::new("1", "abc");
        older.created_at = older.created_at - Duration::seconds(10);
        let newer = UserSession::new("2", "abc");

        let svc = service(session_store_with(vec![older, newer]), MockUserRepository::new(), 0);
        assert_eq!(
            svc.user_id_for_session_id(Some("abc")).await.unwrap().as_deref(),
            Some("1")
        );
    }

    #[tokio::test]
    async fn test_destroy_session_removes_one_record() {
        let record = UserSession::new("1", "abc");
        let record_id = record.id.clone();

        let mut sessions = session_store_with(vec![record]);
        sessions
            .expect_remove()
            .withf(move |r| r.id == record_id)
            .times(1)
            .returning(|_| Ok(()));

        let svc = service(sessions, MockUserRepository::new(), 0);
        assert!(svc.destroy_session(Some("abc")).await.unwrap());
    }

    #[tokio::test]
    async fn test_destroy_session_without_cookie() {
        let mut sessions = MockUserSessionRepository::new();
        sessions.expect_remove().never();

        let svc = service(sessions, MockUserRepository::new(), 0);
        assert!(!svc.destroy_session(None).await.unwrap());
    }

    #[tokio::test]
    async fn test_destroy_expired_session_refused() {
        let mut record = UserSession::new("1", "abc");
        record.created_at = record.created_at - Duration::seconds(120);

        let mut sessions = session_store_with(vec![record]);
        sessions.expect_remove().never();

        let svc = service(sessions, MockUserRepository::new(), 60);
        assert!(!svc.destroy_session(Some("abc")).await.unwrap());
    }

    #[tokio::test]
    async fn test_current_user() {
        let user = User::new("a@b.com", "pw1").unwrap().with_id("1");
        let expected = user.clone();

        let mut users = MockUserRepository::new();
        users
            .expect_get()
            .withf(|id| id == "1")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let svc = service(session_store_with(vec![UserSession::new("1", "abc")]), users, 0);
        assert_eq!(svc.current_user(Some("abc")).await.unwrap(), Some(expected));
    }

    #[tokio::test]
    async fn test_current_user_unknown_session() {
        let mut users = MockUserRepository::new();
        users.expect_get().never();

        let svc = service(session_store_with(vec![]), users, 0);
        assert!(svc.current_user(Some("abc")).await.unwrap().is_none());
        assert!(svc.current_user(None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login() {
        let user = User::new("a@b.com", "pw1").unwrap().with_id("1");

        let mut users = MockUserRepository::new();
        users
            .expect_search()
            .returning(move |filter| Ok(vec![user.clone()].into_iter().filter(|u| filter.matches(u)).collect()));

        let mut sessions = MockUserSessionRepository::new();
        sessions
            .expect_save()
            .withf(|record| record.user_id == "1")
            .times(1)
            .returning(|_| Ok(()));

        let svc = service(sessions, users, 0);

        let result = svc.login("a@b.com", "pw1").await.unwrap();
        assert_eq!(result.user.id, "1");
        assert!(!result.session_id.is_empty());

        assert!(matches!(
            svc.login("a@b.com", "nope").await,
            Err(DomainError::InvalidCredentials)
        ));
        assert!(matches!(
            svc.login("x@y.com", "pw1").await,
            Err(DomainError::UserNotFound)
        ));
    }
}
