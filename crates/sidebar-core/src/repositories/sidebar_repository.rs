//! Sidebar config repository trait (port)

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::SidebarConfig;
use crate::error::DomainError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait SidebarRepository: Send + Sync {
    /// Config of the role regardless of its enabled flag.
    async fn find_by_role(&self, role: &str) -> Result<Option<SidebarConfig>, DomainError>;
    async fn find_enabled_by_role(&self, role: &str) -> Result<Option<SidebarConfig>, DomainError>;
    /// Inserts or replaces the config together with all of its items.
    async fn save(&self, config: &SidebarConfig) -> Result<SidebarConfig, DomainError>;
    async fn delete(&self, role: &str) -> Result<bool, DomainError>;
}
