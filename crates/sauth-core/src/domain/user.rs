// ============================================================================
// Session Auth Core - User Entity
// File: crates/sauth-core/src/domain/user.rs
// Description: Account looked up by the login flow
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use validator::Validate;

use sauth_security::PasswordService;
use sauth_shared::constants::DISPLAY_TIMESTAMP_FORMAT;
use sauth_shared::{new_id, now_seconds, store_timestamp, EntityId};

use crate::error::DomainError;

/// User account entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct User {
    pub id: EntityId,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    /// Stored password hash, never the clear text
    #[serde(rename = "_password")]
    pub password: Option<String>,

    pub first_name: Option<String>,
    pub last_name: Option<String>,

    #[serde(with = "store_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "store_timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Public JSON representation of a user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    pub id: EntityId,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    /// Create a user, hashing the clear-text password
    pub fn new(email: &str, password: &str) -> Result<Self, DomainError> {
        let password_hash = PasswordService::hash(password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;
        let now = now_seconds();
        let user = Self {
            id: new_id(),
            email: Some(email.trim().to_string()),
            password: Some(password_hash),
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        };
        user.validate()
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;
        Ok(user)
    }

    pub fn with_id(mut self, id: impl Into<EntityId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_names(mut self, first_name: Option<&str>, last_name: Option<&str>) -> Self {
        self.first_name = first_name.map(str::to_string);
        self.last_name = last_name.map(str::to_string);
        self
    }

    pub fn is_valid_password(&self, password: &str) -> bool {
        if password.is_empty() {
            return false;
        }
        let Some(stored) = self.password.as_deref() else {
            return false;
        };
        match PasswordService::verify(password, stored) {
            Ok(valid) => valid,
            Err(e) => {
                warn!("Unreadable password hash for user {}: {}", self.id, e);
                false
            }
        }
    }

    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(f), Some(l)) => format!("{} {}", f, l),
            (Some(f), None) => f.clone(),
            (None, Some(l)) => l.clone(),
            (None, None) => self.email.clone().unwrap_or_default(),
        }
    }

    pub fn to_json(&self) -> UserView {
        UserView {
            id: self.id.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            created_at: self.created_at.format(DISPLAY_TIMESTAMP_FORMAT).to_string(),
            updated_at: self.updated_at.format(DISPLAY_TIMESTAMP_FORMAT).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user() {
        let user = User::new("a@b.com", "pw1").unwrap();
        assert_eq!(user.email.as_deref(), Some("a@b.com"));
        assert_ne!(user.password.as_deref(), Some("pw1"));
        assert!(user.is_valid_password("pw1"));
        assert!(!user.is_valid_password("pw2"));
        assert!(!user.is_valid_password(""));
    }

    #[test]
    fn test_invalid_email_rejected() {
        assert!(matches!(
            User::new("not-an-email", "pw1"),
            Err(DomainError::ValidationError(_))
        ));
    }

    #[test]
    fn test_user_without_password() {
        let mut user = User::new("a@b.com", "pw1").unwrap();
        user.password = None;
        assert!(!user.is_valid_password("pw1"));
    }

    #[test]
    fn test_display_name() {
        let user = User::new("a@b.com", "pw1").unwrap();
        assert_eq!(user.display_name(), "a@b.com");
        assert_eq!(user.clone().with_names(Some("Ada"), None).display_name(), "Ada");
        assert_eq!(user.clone().with_names(None, Some("Lovelace")).display_name(), "Lovelace");
        assert_eq!(
            user.clone().with_names(Some("Ada"), Some("Lovelace")).display_name(),
            "Ada Lovelace"
        );

        let mut anonymous = user;
        anonymous.email = None;
        assert_eq!(anonymous.display_name(), "");
    }

    #[test]
    fn test_to_json_hides_password() {
        let user = User::new("a@b.com", "pw1").unwrap().with_id("1");
        let json = serde_json::to_value(user.to_json()).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["email"], "a@b.com");
        assert!(json["first_name"].is_null());
        assert!(json.get("_password").is_none());
        assert_eq!(
            json["created_at"],
            user.created_at.format("%Y-%m-%d %H:%M:%S").to_string()
        );
    }

    #[test]
    fn test_stored_form_keeps_password_hash() {
        let user = User::new("a@b.com", "pw1").unwrap();
        let stored = serde_json::to_value(&user).unwrap();
        assert_eq!(stored["_password"], user.password.clone().unwrap());

        let back: User = serde_json::from_value(stored).unwrap();
        assert_eq!(back, user);
    }
}
