//! Permission lookup repository trait (port)

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::{RecordKind, WorkspaceRecord};
use crate::error::LookupError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    async fn exists(&self, kind: RecordKind, name: &str) -> Result<bool, LookupError>;

    /// Whether `role` holds read at permission level 0 on `doctype`.
    async fn has_read_grant(&self, doctype: &str, role: &str) -> Result<bool, LookupError>;

    /// Roles a Page, Report or Module Def is restricted to; empty means unrestricted.
    async fn restricted_roles(&self, kind: RecordKind, name: &str) -> Result<Vec<String>, LookupError>;

    async fn find_workspace(&self, name: &str) -> Result<Option<WorkspaceRecord>, LookupError>;
}
