// ============================================================================
// Sidebar Core - Permission Service
// File: crates/sidebar-core/src/services/permission_service.rs
// ============================================================================
//! Role access predicate over sidebar link targets

use std::sync::Arc;

use sidebar_shared::constants::{ADMINISTRATOR_ROLE, ALL_ROLE};
use tracing::{debug, warn};

use crate::domain::menu_item::non_empty;
use crate::domain::{LinkType, RecordKind};
use crate::error::LookupError;
use crate::repositories::PermissionRepository;

pub struct PermissionService {
    repo: Arc<dyn PermissionRepository>,
}

impl PermissionService {
    pub fn new(repo: Arc<dyn PermissionRepository>) -> Self {
        Self { repo }
    }

    /// Whether `role` may open the record behind a link.
    ///
    /// Lookup failures are returned as-is; use [`has_access_or_deny`] where a
    /// failure must count as a refusal.
    ///
    /// [`has_access_or_deny`]: PermissionService::has_access_or_deny
    pub async fn has_access(
        &self,
        role: &str,
        link_type: &LinkType,
        link_to: &str,
    ) -> Result<bool, LookupError> {
        let role = role.trim();
        let link_to = link_to.trim();
        if role.is_empty() || link_to.is_empty() {
            return Ok(false);
        }
        if role == ADMINISTRATOR_ROLE {
            return Ok(true);
        }

        match link_type {
            LinkType::DocType => {
                if !self.repo.exists(RecordKind::DocType, link_to).await? {
                    return Ok(false);
                }
                if self.repo.has_read_grant(link_to, role).await? {
                    return Ok(true);
                }
                self.repo.has_read_grant(link_to, ALL_ROLE).await
            }
            LinkType::Page => self.check_restricted(RecordKind::Page, role, link_to).await,
            LinkType::Report => self.check_restricted(RecordKind::Report, role, link_to).await,
            LinkType::Workspace => {
                let Some(workspace) = self.repo.find_workspace(link_to).await? else {
                    return Ok(false);
                };
                if workspace.public {
                    return Ok(true);
                }
                match non_empty(workspace.module.as_deref()) {
                    Some(module) => {
                        let roles = self.repo.restricted_roles(RecordKind::ModuleDef, module).await?;
                        Ok(roles.is_empty() || roles.iter().any(|r| r == role))
                    }
                    None => Ok(true),
                }
            }
            LinkType::Dashboard | LinkType::Url | LinkType::Other(_) => Ok(true),
        }
    }

    /// Same as [`has_access`](PermissionService::has_access) with lookup
    /// failures logged and mapped to `false`.
    pub async fn has_access_or_deny(&self, role: &str, link_type: &LinkType, link_to: &str) -> bool {
        match self.has_access(role, link_type, link_to).await {
            Ok(allowed) => {
                if !allowed {
                    debug!("Role {} denied {} '{}'", role, link_type, link_to);
                }
                allowed
            }
            Err(e) => {
                warn!(
                    "Error checking access for role {}, link_type {}, link_to {}: {}",
                    role, link_type, link_to, e
                );
                false
            }
        }
    }

    async fn check_restricted(
        &self,
        kind: RecordKind,
        role: &str,
        name: &str,
    ) -> Result<bool, LookupError> {
        if !self.repo.exists(kind, name).await? {
            return Ok(false);
        }
        let roles = self.repo.restricted_roles(kind, name).await?;
        Ok(roles.is_empty() || roles.iter().any(|r| r == role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WorkspaceRecord;
    use crate::repositories::MockPermissionRepository;

    fn service(repo: MockPermissionRepository) -> PermissionService {
        PermissionService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_administrator_bypasses_lookups() {
        let mut repo = MockPermissionRepository::new();
        repo.expect_exists().times(0);
        let svc = service(repo);
        assert!(svc.has_access("Administrator", &LinkType::DocType, "Salary Slip").await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_inputs_are_denied() {
        let svc = service(MockPermissionRepository::new());
        assert!(!svc.has_access("", &LinkType::Dashboard, "Payroll").await.unwrap());
        assert!(!svc.has_access("HR User", &LinkType::Url, " ").await.unwrap());
    }

    #[tokio::test]
    async fn test_doctype_requires_read_grant() {
        let mut repo = MockPermissionRepository::new();
        repo.expect_exists()
            .returning(|kind, name| Ok(kind == RecordKind::DocType && name != "Missing"));
        repo.expect_has_read_grant()
            .returning(|doctype, role| Ok(doctype == "Employee" && role == "HR User"));
        let svc = service(repo);

        assert!(svc.has_access("HR User", &LinkType::DocType, "Employee").await.unwrap());
        assert!(!svc.has_access("Employee", &LinkType::DocType, "Employee").await.unwrap());
        assert!(!svc.has_access("HR User", &LinkType::DocType, "Missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_doctype_all_role_grant_applies_to_everyone() {
        let mut repo = MockPermissionRepository::new();
        repo.expect_exists().returning(|_, _| Ok(true));
        repo.expect_has_read_grant()
            .returning(|_, role| Ok(role == "All"));
        let svc = service(repo);
        assert!(svc.has_access("Employee", &LinkType::DocType, "Holiday List").await.unwrap());
    }

    #[tokio::test]
    async fn test_page_and_report_restrictions() {
        let mut repo = MockPermissionRepository::new();
        repo.expect_exists().returning(|_, _| Ok(true));
        repo.expect_restricted_roles().returning(|kind, name| {
            Ok(match (kind, name) {
                (RecordKind::Page, "org-chart") => vec![],
                (RecordKind::Report, "Salary Register") => vec!["HR Manager".to_string()],
                _ => vec!["Nobody".to_string()],
            })
        });
        let svc = service(repo);

        assert!(svc.has_access("Employee", &LinkType::Page, "org-chart").await.unwrap());
        assert!(svc.has_access("HR Manager", &LinkType::Report, "Salary Register").await.unwrap());
        assert!(!svc.has_access("Employee", &LinkType::Report, "Salary Register").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_page_is_denied() {
        let mut repo = MockPermissionRepository::new();
        repo.expect_exists().returning(|_, _| Ok(false));
        repo.expect_restricted_roles().times(0);
        let svc = service(repo);
        assert!(!svc.has_access("Employee", &LinkType::Page, "ghost").await.unwrap());
    }

    #[tokio::test]
    async fn test_workspace_rules() {
        let mut repo = MockPermissionRepository::new();
        repo.expect_find_workspace().returning(|name| {
            Ok(match name {
                "Home" => Some(WorkspaceRecord { name: "Home".into(), public: true, module: None }),
                "Payroll" => Some(WorkspaceRecord {
                    name: "Payroll".into(),
                    public: false,
                    module: Some("Payroll".into()),
                }),
                "Private" => Some(WorkspaceRecord { name: "Private".into(), public: false, module: None }),
                _ => None,
            })
        });
        repo.expect_restricted_roles()
            .returning(|_, _| Ok(vec!["HR Manager".to_string()]));
        let svc = service(repo);

        assert!(svc.has_access("Employee", &LinkType::Workspace, "Home").await.unwrap());
        assert!(svc.has_access("HR Manager", &LinkType::Workspace, "Payroll").await.unwrap());
        assert!(!svc.has_access("Employee", &LinkType::Workspace, "Payroll").await.unwrap());
        assert!(svc.has_access("Employee", &LinkType::Workspace, "Private").await.unwrap());
        assert!(!svc.has_access("Employee", &LinkType::Workspace, "Unknown").await.unwrap());
    }

    #[tokio::test]
    async fn test_open_kinds_are_allowed() {
        let svc = service(MockPermissionRepository::new());
        assert!(svc.has_access("Employee", &LinkType::Dashboard, "Payroll").await.unwrap());
        assert!(svc.has_access("Employee", &LinkType::Url, "https://x").await.unwrap());
        assert!(svc
            .has_access("Employee", &LinkType::Other("Custom".into()), "thing")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_lookup_failure_maps_to_deny() {
        let mut repo = MockPermissionRepository::new();
        repo.expect_exists().returning(|kind, name| {
            Err(LookupError::Store {
                kind: kind.to_string(),
                name: name.to_string(),
                reason: "connection reset".into(),
            })
        });
        let svc = service(repo);

        assert!(svc.has_access("HR User", &LinkType::DocType, "Employee").await.is_err());
        assert!(!svc.has_access_or_deny("HR User", &LinkType::DocType, "Employee").await);
    }
}
