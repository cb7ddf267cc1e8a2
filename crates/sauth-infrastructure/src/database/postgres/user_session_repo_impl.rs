// ============================================================================
// Session Auth Infrastructure - PostgreSQL User Session Repository
// File: crates/sauth-infrastructure/src/database/postgres/user_session_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{debug, error};

use sauth_core::domain::UserSession;
use sauth_core::error::DomainError;
use sauth_core::repositories::{SessionFilter, UserSessionRepository};

pub struct PgUserSessionRepository {
    pool: PgPool,
}

impl PgUserSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct UserSessionRow {
    pub id: String,
    pub user_id: String,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserSessionRow> for UserSession {
    fn from(row: UserSessionRow) -> Self {
        UserSession {
            id: row.id,
            user_id: row.user_id,
            session_id: row.session_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl UserSessionRepository for PgUserSessionRepository {
    async fn reload(&self) -> Result<(), DomainError> {
        // Every query reads committed rows; nothing is cached in process.
        Ok(())
    }

    async fn search(&self, filter: &SessionFilter) -> Result<Vec<UserSession>, DomainError> {
        let rows: Vec<UserSessionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, session_id, created_at, updated_at
            FROM user_sessions
            WHERE ($1::TEXT IS NULL OR session_id = $1)
              AND ($2::TEXT IS NULL OR user_id = $2)
            ORDER BY created_at ASC, id ASC
            "#
        )
        .bind(filter.session_id.as_deref())
        .bind(filter.user_id.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error searching sessions: {}", e);
            DomainError::StorageError(e.to_string())
        })?;

        debug!("Session search matched {} rows", rows.len());
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn save(&self, session: &UserSession) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO user_sessions (id, user_id, session_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET user_id = EXCLUDED.user_id,
                session_id = EXCLUDED.session_id,
                updated_at = EXCLUDED.updated_at
            "#
        )
        .bind(&session.id)
        .bind(&session.user_id)
        .bind(&session.session_id)
        .bind(session.created_at)
        .bind(session.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error saving session: {}", e);
            DomainError::StorageError(e.to_string())
        })?;

        Ok(())
    }

    async fn remove(&self, session: &UserSession) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM user_sessions WHERE id = $1")
            .bind(&session.id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error removing session: {}", e);
                DomainError::StorageError(e.to_string())
            })?;

        Ok(())
    }
}

// Needs a reachable Postgres in DATABASE_URL: cargo test -- --ignored
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[sqlx::test]
    #[ignore]
    async fn test_session_round_trip(pool: PgPool) {
        let repo = PgUserSessionRepository::new(pool);

        let mut older = UserSession::new("1", "abc");
        older.created_at = older.created_at - Duration::seconds(30);
        let other = UserSession::new("2", "def");
        repo.save(&other).await.unwrap();
        repo.save(&older).await.unwrap();

        let found = repo.search(&SessionFilter::by_session_id("abc")).await.unwrap();
        assert_eq!(found, vec![older.clone()]);
        assert_eq!(repo.search(&SessionFilter::by_user_id("2")).await.unwrap(), vec![other.clone()]);

        let all = repo.search(&SessionFilter::default()).await.unwrap();
        assert_eq!(all.iter().map(|s| s.user_id.as_str()).collect::<Vec<_>>(), ["1", "2"]);

        repo.remove(&older).await.unwrap();
        assert!(repo.search(&SessionFilter::by_session_id("abc")).await.unwrap().is_empty());
        assert_eq!(repo.search(&SessionFilter::default()).await.unwrap().len(), 1);
    }

    #[sqlx::test]
    #[ignore]
    async fn test_session_id_is_unique(pool: PgPool) {
        let repo = PgUserSessionRepository::new(pool);

        repo.save(&UserSession::new("1", "abc")).await.unwrap();
        let duplicate = repo.save(&UserSession::new("2", "abc")).await;
        assert!(matches!(duplicate, Err(DomainError::StorageError(_))));
    }
}
