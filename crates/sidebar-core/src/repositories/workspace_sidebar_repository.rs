//! Workspace sidebar repository trait (port)

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::WorkspaceSidebar;
use crate::error::DomainError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait WorkspaceSidebarRepository: Send + Sync {
    async fn list(&self, limit: usize) -> Result<Vec<WorkspaceSidebar>, DomainError>;
}
