//! Role membership repository trait (port)

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::DomainError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Distinct users that hold `role`.
    async fn users_with_role(&self, role: &str) -> Result<Vec<String>, DomainError>;
}
