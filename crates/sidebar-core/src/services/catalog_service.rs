//! Menu catalog built from the stock workspace sidebars

use std::collections::HashSet;
use std::sync::Arc;

use sidebar_shared::constants::{FALLBACK_URL, WORKSPACE_SIDEBAR_SCAN_LIMIT};
use tracing::{debug, info, warn};

use crate::domain::menu_item::non_empty;
use crate::domain::{CatalogItem, DefaultSidebarItem, ItemKind};
use crate::error::DomainError;
use crate::repositories::WorkspaceSidebarRepository;

use super::permission_service::PermissionService;
use super::route::build_route;

pub struct CatalogService {
    workspaces: Arc<dyn WorkspaceSidebarRepository>,
    permissions: Arc<PermissionService>,
}

impl CatalogService {
    pub fn new(workspaces: Arc<dyn WorkspaceSidebarRepository>, permissions: Arc<PermissionService>) -> Self {
        Self { workspaces, permissions }
    }

    /// Every Link item of every workspace sidebar.
    pub async fn available_menu_items(&self) -> Result<Vec<CatalogItem>, DomainError> {
        let sidebars = self.workspaces.list(usize::MAX).await?;
        let items = sidebars
            .into_iter()
            .flat_map(|sidebar| {
                let source = sidebar.name;
                sidebar
                    .items
                    .into_iter()
                    .filter(|item| item.kind == ItemKind::Link)
                    .map(move |item| CatalogItem {
                        label: item.label,
                        icon: item.icon,
                        link_type: item.link_type,
                        link_to: item.link_to,
                        url: item.url.unwrap_or_default(),
                        source: source.clone(),
                    })
            })
            .collect();
        Ok(items)
    }

    /// Starting point for a role's sidebar: the workspace items the role may open.
    pub async fn default_items_for_role(&self, role: &str) -> Result<Vec<DefaultSidebarItem>, DomainError> {
        let role = role.trim();
        if role.is_empty() {
            warn!("No role given for default sidebar items");
            return Ok(Vec::new());
        }

        let sidebars = self.workspaces.list(WORKSPACE_SIDEBAR_SCAN_LIMIT).await?;
        debug!("Scanning {} workspace sidebars for role {}", sidebars.len(), role);

        let mut seen: HashSet<String> = HashSet::new();
        let mut items = Vec::new();
        let mut sequence = 1;
        let mut checked = 0usize;

        for sidebar in &sidebars {
            for item in &sidebar.items {
                match item.kind {
                    ItemKind::Link => {
                        let Some(link_to) = non_empty(item.link_to.as_deref()) else {
                            continue;
                        };
                        checked += 1;
                        let link_type = item.link_type.clone().unwrap_or_default();
                        let key = format!("{}:{}:{}", link_type, link_to, item.label);
                        if seen.contains(&key) {
                            continue;
                        }
                        if !self.permissions.has_access_or_deny(role, &link_type, link_to).await {
                            continue;
                        }
                        seen.insert(key);

                        let url = non_empty(item.url.as_deref())
                            .map(str::to_string)
                            .or_else(|| build_route(&link_type, link_to))
                            .unwrap_or_else(|| FALLBACK_URL.to_string());
                        items.push(DefaultSidebarItem {
                            label: item.label.clone(),
                            icon: item.icon.clone(),
                            kind: ItemKind::Link,
                            link_type: Some(link_type),
                            link_to: Some(link_to.to_string()),
                            url: Some(url),
                            sidebar_name: sidebar.name.clone(),
                            sequence,
                            is_active: true,
                            open_in_new_tab: false,
                        });
                        sequence += 1;
                    }
                    ItemKind::SectionBreak => {
                        if !seen.insert(format!("section:{}", item.label)) {
                            continue;
                        }
                        let label = if item.label.is_empty() { "Section" } else { &item.label };
                        items.push(DefaultSidebarItem {
                            label: label.to_string(),
                            icon: item.icon.clone(),
                            kind: ItemKind::SectionBreak,
                            link_type: None,
                            link_to: None,
                            url: None,
                            sidebar_name: sidebar.name.clone(),
                            sequence,
                            is_active: true,
                            open_in_new_tab: false,
                        });
                        sequence += 1;
                    }
                }
            }
        }

        info!(
            "Role {}: checked {} items, returning {} default items",
            role,
            checked,
            items.len()
        );
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LinkType, WorkspaceSidebar, WorkspaceSidebarItem};
    use crate::repositories::{MockPermissionRepository, MockWorkspaceSidebarRepository};

    fn link(label: &str, link_type: &str, link_to: &str) -> WorkspaceSidebarItem {
        WorkspaceSidebarItem {
            label: label.into(),
            icon: String::new(),
            kind: ItemKind::Link,
            link_type: Some(LinkType::from(link_type)),
            link_to: Some(link_to.into()),
            url: None,
        }
    }

    fn section(label: &str) -> WorkspaceSidebarItem {
        WorkspaceSidebarItem {
            label: label.into(),
            icon: String::new(),
            kind: ItemKind::SectionBreak,
            link_type: None,
            link_to: None,
            url: None,
        }
    }

    fn workspaces() -> MockWorkspaceSidebarRepository {
        let sidebars = vec![
            WorkspaceSidebar {
                name: "HR".into(),
                label: None,
                header_icon: None,
                items: vec![
                    section("People"),
                    link("Employee", "DocType", "Employee"),
                    link("Salary Slip", "DocType", "Salary Slip"),
                ],
            },
            WorkspaceSidebar {
                name: "Payroll".into(),
                label: Some("Payroll & Pay".into()),
                header_icon: None,
                items: vec![
                    section("People"),
                    link("Employee", "DocType", "Employee"),
                    link("Payroll Dashboard", "Dashboard", "Payroll"),
                ],
            },
        ];
        let mut repo = MockWorkspaceSidebarRepository::new();
        repo.expect_list().returning(move |_| Ok(sidebars.clone()));
        repo
    }

    fn service(perms: MockPermissionRepository) -> CatalogService {
        CatalogService::new(
            Arc::new(workspaces()),
            Arc::new(PermissionService::new(Arc::new(perms))),
        )
    }

    #[tokio::test]
    async fn test_available_items_lists_links_with_source() {
        let svc = service(MockPermissionRepository::new());
        let items = svc.available_menu_items().await.unwrap();
        assert_eq!(items.len(), 4);
        assert!(items.iter().all(|i| !i.label.is_empty()));
        assert_eq!(items[3].source, "Payroll");
    }

    #[tokio::test]
    async fn test_default_items_filter_and_dedupe() {
        let mut perms = MockPermissionRepository::new();
        perms.expect_exists().returning(|_, _| Ok(true));
        perms
            .expect_has_read_grant()
            .returning(|doctype, _| Ok(doctype == "Employee"));
        let svc = service(perms);

        let items = svc.default_items_for_role("HR User").await.unwrap();
        let labels: Vec<_> = items.iter().map(|i| (i.label.as_str(), i.sequence)).collect();
        assert_eq!(
            labels,
            vec![("People", 1), ("Employee", 2), ("Payroll Dashboard", 3)]
        );
        assert_eq!(items[1].url.as_deref(), Some("/app/employee"));
        assert_eq!(items[2].url.as_deref(), Some("/app/dashboard/payroll"));
        assert_eq!(items[2].sidebar_name, "Payroll");
    }

    #[tokio::test]
    async fn test_default_items_for_blank_role() {
        let svc = service(MockPermissionRepository::new());
        assert!(svc.default_items_for_role(" ").await.unwrap().is_empty());
    }
}
