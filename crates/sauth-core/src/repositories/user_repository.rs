//! User repository trait (port)

use async_trait::async_trait;

use crate::domain::User;
use crate::error::DomainError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub email: Option<String>,
}

impl UserFilter {
    pub fn by_email(email: &str) -> Self {
        Self { email: Some(email.to_string()) }
    }

    pub fn matches(&self, user: &User) -> bool {
        self.email
            .as_ref()
            .map_or(true, |email| user.email.as_deref() == Some(email.as_str()))
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn search(&self, filter: &UserFilter) -> Result<Vec<User>, DomainError>;
    async fn get(&self, id: &str) -> Result<Option<User>, DomainError>;
    async fn save(&self, user: &User) -> Result<(), DomainError>;
}
