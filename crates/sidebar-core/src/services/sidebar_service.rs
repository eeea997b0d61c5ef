// ============================================================================
// Sidebar Core - Sidebar Service
// File: crates/sidebar-core/src/services/sidebar_service.rs
// ============================================================================
//! Role sidebar resolution, save, and change notification

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::json;
use sidebar_shared::constants::{EVENT_ROLE_SIDEBAR_UPDATED, SIDEBAR_HEADER_ICON};
use sidebar_shared::utils::sidebar_cache_key;
use sidebar_shared::EntityId;
use tracing::{debug, error, info, warn};

use crate::domain::{Caller, MenuItem, ResolvedSidebar, ResolvedSidebarItem, SidebarConfig};
use crate::error::DomainError;
use crate::ports::cache::{get_json, invalidate, set_json};
use crate::ports::{CacheStore, RealtimeEvent, RealtimePublisher, Recipients};
use crate::repositories::{RoleRepository, SidebarRepository};

use super::permission_service::PermissionService;
use super::route::resolve_url;
use super::validation::prepare_items;

/// Result of a successful save
#[derive(Debug, Clone, Serialize)]
pub struct SaveOutcome {
    pub status: String,
    pub id: EntityId,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotifyOutcome {
    pub status: String,
    pub users_notified: usize,
}

pub struct SidebarService {
    sidebars: Arc<dyn SidebarRepository>,
    roles: Arc<dyn RoleRepository>,
    permissions: Arc<PermissionService>,
    cache: Arc<dyn CacheStore>,
    realtime: Arc<dyn RealtimePublisher>,
    cache_ttl: Duration,
}

impl SidebarService {
    pub fn new(
        sidebars: Arc<dyn SidebarRepository>,
        roles: Arc<dyn RoleRepository>,
        permissions: Arc<PermissionService>,
        cache: Arc<dyn CacheStore>,
        realtime: Arc<dyn RealtimePublisher>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            sidebars,
            roles,
            permissions,
            cache,
            realtime,
            cache_ttl,
        }
    }

    /// Resolved sidebar of `role`, or of the caller's first role when none is given.
    ///
    /// `None` when no role applies or the role has no enabled config.
    pub async fn resolve(
        &self,
        caller: &Caller,
        role: Option<&str>,
    ) -> Result<Option<ResolvedSidebar>, DomainError> {
        let role = match role.map(str::trim).filter(|r| !r.is_empty()) {
            Some(role) => role,
            None => match caller.primary_role() {
                Some(role) => role,
                None => return Ok(None),
            },
        };

        // 1. Cache
        let key = sidebar_cache_key(role);
        if let Some(cached) = get_json::<ResolvedSidebar>(self.cache.as_ref(), &key).await {
            debug!("Sidebar cache hit for role {}", role);
            return Ok(Some(cached));
        }

        // 2. Enabled config
        let Some(config) = self.sidebars.find_enabled_by_role(role).await? else {
            debug!("No enabled sidebar for role {}", role);
            return Ok(None);
        };

        // 3. Build and cache
        let sidebar = self.build(role, &config).await;
        set_json(self.cache.as_ref(), &key, &sidebar, Some(self.cache_ttl)).await;

        Ok(Some(sidebar))
    }

    async fn build(&self, role: &str, config: &SidebarConfig) -> ResolvedSidebar {
        let mut visible: Vec<&MenuItem> = Vec::new();
        for item in config.active_items() {
            if let Some(target) = item.checked_target() {
                if !self
                    .permissions
                    .has_access_or_deny(role, &target.link_type, &target.link_to)
                    .await
                {
                    continue;
                }
            }
            visible.push(item);
        }

        let (mut parents, children): (Vec<&MenuItem>, Vec<&MenuItem>) =
            visible.into_iter().partition(|item| item.parent().is_none());
        parents.sort_by_key(|item| item.sort_key());

        let mut attached: Vec<Vec<&MenuItem>> = vec![Vec::new(); parents.len()];
        for child in children {
            let parent_ref = child.parent().unwrap_or_default();
            match find_parent(&parents, parent_ref) {
                Some(idx) if parents[idx].is_section_break() => {
                    warn!(
                        "Dropping item '{}' of role {}: parent '{}' is a section break",
                        child.label, role, parent_ref
                    );
                }
                Some(idx) => attached[idx].push(child),
                None => {
                    warn!(
                        "Dropping item '{}' of role {}: parent '{}' not found or ambiguous",
                        child.label, role, parent_ref
                    );
                }
            }
        }

        let mut items = Vec::new();
        for (parent, mut kids) in parents.into_iter().zip(attached) {
            kids.sort_by_key(|item| item.sort_key());
            let resolved_kids: Vec<ResolvedSidebarItem> =
                kids.into_iter().map(|kid| resolve_item(kid, true)).collect();

            let mut entry = resolve_item(parent, false);
            if !resolved_kids.is_empty() {
                entry.collapsible = true;
                entry.children = resolved_kids.clone();
            }
            items.push(entry);
            items.extend(resolved_kids);
        }

        ResolvedSidebar {
            label: role.to_string(),
            header_icon: SIDEBAR_HEADER_ICON.to_string(),
            items,
        }
    }

    /// Validates and stores a role's items. All-or-nothing.
    pub async fn save_sidebar(
        &self,
        caller: &Caller,
        role: &str,
        items: Vec<MenuItem>,
    ) -> Result<SaveOutcome, DomainError> {
        if !caller.is_administrator() {
            warn!("User {} tried to save the sidebar of role {}", caller.user, role);
            return Err(DomainError::PermissionDenied(
                "Only administrators can configure role sidebars".to_string(),
            ));
        }
        let role = role.trim();
        if role.is_empty() {
            return Err(DomainError::ValidationError("Role is required".to_string()));
        }

        // 1. Validate
        let prepared = prepare_items(items)?;
        for warning in &prepared.warnings {
            warn!("Sidebar of role {}: {}", role, warning);
        }

        // 2. Get or create, then persist
        let mut config = match self.sidebars.find_by_role(role).await? {
            Some(config) => config,
            None => SidebarConfig::new(role, Some(caller.user.clone())),
        };
        config.replace_items(prepared.items, &caller.user);
        let saved = self.sidebars.save(&config).await?;

        info!(
            "Saved sidebar of role {} with {} items by {}",
            role,
            saved.items.len(),
            caller.user
        );

        // 3. Invalidate and broadcast
        if saved.enabled {
            self.invalidate(role).await;
            self.broadcast_update(role, Some(&caller.user)).await;
        }

        Ok(SaveOutcome {
            status: "success".to_string(),
            id: saved.id,
            warnings: prepared.warnings,
        })
    }

    pub async fn delete_sidebar(&self, caller: &Caller, role: &str) -> Result<bool, DomainError> {
        if !caller.is_administrator() {
            warn!("User {} tried to delete the sidebar of role {}", caller.user, role);
            return Err(DomainError::PermissionDenied(
                "Only administrators can delete role sidebars".to_string(),
            ));
        }
        let role = role.trim();
        let deleted = self.sidebars.delete(role).await?;
        self.invalidate(role).await;
        if deleted {
            info!("Deleted sidebar of role {} by {}", role, caller.user);
        }
        Ok(deleted)
    }

    /// Tells every holder of `role` to reload its sidebar.
    pub async fn notify_role_update(&self, role: &str) -> Result<NotifyOutcome, DomainError> {
        let users = self.distinct_users(role).await?;
        let count = users.len();
        if count > 0 {
            self.publish_to(role, users);
        }
        info!("Notified {} users of role {} about a sidebar update", count, role);

        Ok(NotifyOutcome {
            status: "success".to_string(),
            users_notified: count,
        })
    }

    pub async fn invalidate(&self, role: &str) {
        invalidate(self.cache.as_ref(), &sidebar_cache_key(role)).await;
    }

    async fn broadcast_update(&self, role: &str, fallback_user: Option<&str>) {
        let mut users = match self.distinct_users(role).await {
            Ok(users) => users,
            Err(e) => {
                error!("Failed to list users of role {}: {}", role, e);
                Vec::new()
            }
        };
        if users.is_empty() {
            if let Some(user) = fallback_user {
                users.push(user.to_string());
            }
        }
        if !users.is_empty() {
            self.publish_to(role, users);
        }
    }

    async fn distinct_users(&self, role: &str) -> Result<Vec<String>, DomainError> {
        let users: BTreeSet<String> = self
            .roles
            .users_with_role(role)
            .await?
            .into_iter()
            .filter(|u| !u.trim().is_empty())
            .collect();
        Ok(users.into_iter().collect())
    }

    fn publish_to(&self, role: &str, users: Vec<String>) {
        self.realtime.publish(RealtimeEvent::new(
            EVENT_ROLE_SIDEBAR_UPDATED,
            json!({ "role": role }),
            Recipients::Users(users),
        ));
    }
}

/// Explicit name first, then label. A reference is attached only when exactly
/// one parent matches at the first level that matches at all.
fn find_parent(parents: &[&MenuItem], parent_ref: &str) -> Option<usize> {
    let by_name = unique_match(parents, |p| p.explicit_name() == Some(parent_ref));
    match by_name {
        Match::One(idx) => Some(idx),
        Match::Many => None,
        Match::None => match unique_match(parents, |p| p.label == parent_ref) {
            Match::One(idx) => Some(idx),
            Match::Many | Match::None => None,
        },
    }
}

enum Match {
    None,
    One(usize),
    Many,
}

fn unique_match(parents: &[&MenuItem], pred: impl Fn(&MenuItem) -> bool) -> Match {
    let mut found = parents
        .iter()
        .enumerate()
        .filter(|(_, p)| pred(**p))
        .map(|(idx, _)| idx);
    match (found.next(), found.next()) {
        (None, _) => Match::None,
        (Some(idx), None) => Match::One(idx),
        (Some(_), Some(_)) => Match::Many,
    }
}

fn resolve_item(item: &MenuItem, child: bool) -> ResolvedSidebarItem {
    let section = item.is_section_break();
    let link = if section { None } else { item.link.as_ref() };
    ResolvedSidebarItem {
        label: item.label.clone(),
        icon: item.icon.clone(),
        kind: item.kind,
        url: (!section).then(|| resolve_url(item)),
        link_type: link.map(|l| l.link_type.clone()),
        link_to: link.map(|l| l.link_to.clone()).filter(|to| !to.is_empty()),
        open_in_new_tab: item.open_in_new_tab,
        collapsible: false,
        child,
        children: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LinkTarget, LinkType, RecordKind};
    use crate::error::LookupError;
    use crate::repositories::{MockPermissionRepository, MockRoleRepository, MockSidebarRepository};
    use crate::test_support::{FakeCache, RecordingPublisher};

    struct Fixture {
        service: SidebarService,
        cache: Arc<FakeCache>,
        events: Arc<RecordingPublisher>,
    }

    fn fixture(
        sidebars: MockSidebarRepository,
        perms: MockPermissionRepository,
        roles: MockRoleRepository,
    ) -> Fixture {
        let cache = Arc::new(FakeCache::default());
        let events = Arc::new(RecordingPublisher::default());
        let service = SidebarService::new(
            Arc::new(sidebars),
            Arc::new(roles),
            Arc::new(PermissionService::new(Arc::new(perms))),
            cache.clone(),
            events.clone(),
            Duration::from_secs(3600),
        );
        Fixture { service, cache, events }
    }

    fn allow_all() -> MockPermissionRepository {
        let mut perms = MockPermissionRepository::new();
        perms.expect_exists().returning(|_, _| Ok(true));
        perms.expect_has_read_grant().returning(|_, _| Ok(true));
        perms.expect_restricted_roles().returning(|_, _| Ok(vec![]));
        perms
    }

    fn doc(label: &str, seq: i32) -> MenuItem {
        MenuItem::link(label, LinkTarget::new(LinkType::DocType, label)).with_sequence(seq)
    }

    fn enabled(items: Vec<MenuItem>) -> MockSidebarRepository {
        let config = SidebarConfig::new("HR User", None).with_items(items);
        let mut sidebars = MockSidebarRepository::new();
        sidebars
            .expect_find_enabled_by_role()
            .returning(move |_| Ok(Some(config.clone())));
        sidebars
    }

    fn hr_user() -> Caller {
        Caller::new("jane@example.com", vec!["HR User".into()])
    }

    fn admin() -> Caller {
        Caller::new("admin@example.com", vec!["Administrator".into()])
    }

    #[tokio::test]
    async fn test_reports_example() {
        let items = vec![
            MenuItem::link("Reports", LinkTarget::new(LinkType::DocType, "Sales Report")).with_sequence(1),
            MenuItem::link("Sub", LinkTarget::url("/x")).with_sequence(1).with_parent("Reports"),
        ];
        let fx = fixture(enabled(items), allow_all(), MockRoleRepository::new());

        let sidebar = fx.service.resolve(&hr_user(), None).await.unwrap().unwrap();
        assert_eq!(sidebar.label, "HR User");
        assert_eq!(sidebar.header_icon, "folder");
        assert_eq!(sidebar.labels(), vec!["Reports", "Sub"]);

        let reports = &sidebar.items[0];
        assert_eq!(reports.url.as_deref(), Some("/app/sales_report"));
        assert!(reports.collapsible);
        assert!(!reports.child);
        assert_eq!(reports.children.len(), 1);

        let sub = &sidebar.items[1];
        assert_eq!(sub.url.as_deref(), Some("/x"));
        assert!(sub.child);
        assert!(!sub.collapsible);
    }

    #[tokio::test]
    async fn test_children_follow_their_parent() {
        let items = vec![
            doc("Leave", 2).with_parent("HR"),
            doc("Payroll", 2),
            doc("Employee", 1).with_parent("HR"),
            doc("HR", 1),
            doc("Salary Slip", 1).with_parent("Payroll"),
        ];
        let fx = fixture(enabled(items), allow_all(), MockRoleRepository::new());

        let sidebar = fx.service.resolve(&hr_user(), Some("HR User")).await.unwrap().unwrap();
        assert_eq!(sidebar.items.len(), 5);
        assert_eq!(
            sidebar.labels(),
            vec!["HR", "Employee", "Leave", "Payroll", "Salary Slip"]
        );
    }

    #[tokio::test]
    async fn test_sequence_ties_keep_original_order() {
        let items = vec![doc("B", 1), doc("A", 1), doc("First", 0), MenuItem::link("NoSeq", LinkTarget::url("/n"))];
        let fx = fixture(enabled(items), allow_all(), MockRoleRepository::new());

        let sidebar = fx.service.resolve(&hr_user(), None).await.unwrap().unwrap();
        assert_eq!(sidebar.labels(), vec!["First", "NoSeq", "B", "A"]);
    }

    #[tokio::test]
    async fn test_inactive_items_never_appear() {
        let items = vec![doc("Employee", 1), doc("Old", 0).inactive(), doc("Child", 1).with_parent("Employee").inactive()];
        let fx = fixture(enabled(items), allow_all(), MockRoleRepository::new());

        let sidebar = fx.service.resolve(&hr_user(), None).await.unwrap().unwrap();
        assert_eq!(sidebar.labels(), vec!["Employee"]);
        assert!(!sidebar.items[0].collapsible);
    }

    #[tokio::test]
    async fn test_dangling_child_dropped_and_result_cached() {
        let items = vec![doc("Employee", 1), doc("Orphan", 1).with_parent("Missing")];
        let fx = fixture(enabled(items), allow_all(), MockRoleRepository::new());

        let sidebar = fx.service.resolve(&hr_user(), None).await.unwrap().unwrap();
        assert_eq!(sidebar.labels(), vec!["Employee"]);
        assert!(fx.cache.contains("role_sidebar_HR User"));
    }

    #[tokio::test]
    async fn test_cache_hit_skips_store() {
        let config = SidebarConfig::new("HR User", None).with_items(vec![doc("Employee", 1)]);
        let mut sidebars = MockSidebarRepository::new();
        sidebars
            .expect_find_enabled_by_role()
            .times(1)
            .returning(move |_| Ok(Some(config.clone())));
        let fx = fixture(sidebars, allow_all(), MockRoleRepository::new());

        let first = fx.service.resolve(&hr_user(), None).await.unwrap();
        let second = fx.service.resolve(&hr_user(), None).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_cache_failure_falls_back_to_store() {
        let cache = Arc::new(FakeCache::failing());
        let service = SidebarService::new(
            Arc::new(enabled(vec![doc("Employee", 1)])),
            Arc::new(MockRoleRepository::new()),
            Arc::new(PermissionService::new(Arc::new(allow_all()))),
            cache,
            Arc::new(RecordingPublisher::default()),
            Duration::from_secs(60),
        );
        let sidebar = service.resolve(&hr_user(), None).await.unwrap().unwrap();
        assert_eq!(sidebar.labels(), vec!["Employee"]);
    }

    #[tokio::test]
    async fn test_no_role_or_no_config_resolves_to_none() {
        let mut sidebars = MockSidebarRepository::new();
        sidebars.expect_find_enabled_by_role().returning(|_| Ok(None));
        let fx = fixture(sidebars, allow_all(), MockRoleRepository::new());

        let nobody = Caller::new("x@example.com", vec![]);
        assert!(fx.service.resolve(&nobody, None).await.unwrap().is_none());
        assert!(fx.service.resolve(&hr_user(), None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_denied_items_and_their_children_are_removed() {
        let mut perms = MockPermissionRepository::new();
        perms.expect_exists().returning(|_, _| Ok(true));
        perms
            .expect_has_read_grant()
            .returning(|doctype, _| Ok(doctype != "Salary Slip"));
        let items = vec![
            doc("Employee", 1),
            doc("Salary Slip", 2),
            doc("Payslip Detail", 1).with_parent("Salary Slip"),
        ];
        let fx = fixture(enabled(items), perms, MockRoleRepository::new());

        let sidebar = fx.service.resolve(&hr_user(), None).await.unwrap().unwrap();
        assert_eq!(sidebar.labels(), vec!["Employee"]);
    }

    #[tokio::test]
    async fn test_lookup_error_excludes_item() {
        let mut perms = MockPermissionRepository::new();
        perms.expect_exists().returning(|kind, name| {
            if name == "Broken" {
                Err(LookupError::Store {
                    kind: kind.to_string(),
                    name: name.to_string(),
                    reason: "timeout".into(),
                })
            } else {
                Ok(kind == RecordKind::DocType)
            }
        });
        perms.expect_has_read_grant().returning(|_, _| Ok(true));
        let fx = fixture(enabled(vec![doc("Employee", 1), doc("Broken", 2)]), perms, MockRoleRepository::new());

        let sidebar = fx.service.resolve(&hr_user(), None).await.unwrap().unwrap();
        assert_eq!(sidebar.labels(), vec!["Employee"]);
    }

    #[tokio::test]
    async fn test_section_breaks_have_no_url_or_children() {
        let items = vec![
            MenuItem::section("People").with_sequence(1),
            doc("Employee", 1).with_parent("People"),
            doc("Attendance", 2),
        ];
        let fx = fixture(enabled(items), allow_all(), MockRoleRepository::new());

        let sidebar = fx.service.resolve(&hr_user(), None).await.unwrap().unwrap();
        assert_eq!(sidebar.labels(), vec!["People", "Attendance"]);
        let section = &sidebar.items[0];
        assert!(section.url.is_none());
        assert!(!section.collapsible);
        assert!(section.children.is_empty());
    }

    #[tokio::test]
    async fn test_ambiguous_label_parent_drops_child() {
        let items = vec![
            doc("Reports", 1).with_name("r1"),
            doc("Reports", 2).with_name("r2"),
            doc("Sub", 1).with_parent("Reports"),
            doc("Named", 1).with_parent("r2"),
        ];
        let fx = fixture(enabled(items), allow_all(), MockRoleRepository::new());

        let sidebar = fx.service.resolve(&hr_user(), None).await.unwrap().unwrap();
        assert_eq!(sidebar.labels(), vec!["Reports", "Reports", "Named"]);
        assert!(sidebar.items[1].collapsible);
    }

    #[tokio::test]
    async fn test_unnamed_parents_sharing_label_drop_child() {
        let items = vec![
            doc("Reports", 1),
            doc("Reports", 2),
            doc("Sub", 1).with_parent("Reports"),
        ];
        let fx = fixture(enabled(items), allow_all(), MockRoleRepository::new());

        let sidebar = fx.service.resolve(&hr_user(), None).await.unwrap().unwrap();
        assert_eq!(sidebar.labels(), vec!["Reports", "Reports"]);
        assert!(sidebar.items.iter().all(|item| !item.collapsible && !item.child));
    }

    #[test]
    fn test_find_parent_prefers_unique_name() {
        let named = doc("Reports", 1).with_name("Sales");
        let plain = doc("Sales", 2);
        let other = doc("Reports", 3);
        let parents = vec![&named, &plain, &other];

        assert_eq!(find_parent(&parents, "Sales"), Some(0));
        assert_eq!(find_parent(&parents, "Reports"), None);
        assert_eq!(find_parent(&parents, "Missing"), None);
    }

    #[tokio::test]
    async fn test_save_requires_administrator() {
        let mut sidebars = MockSidebarRepository::new();
        sidebars.expect_find_by_role().times(0);
        sidebars.expect_save().times(0);
        let fx = fixture(sidebars, allow_all(), MockRoleRepository::new());

        let err = fx
            .service
            .save_sidebar(&hr_user(), "HR User", vec![doc("Employee", 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::PermissionDenied(_)));
        assert!(fx.events.events().is_empty());
    }

    #[tokio::test]
    async fn test_save_rejects_dangling_parent() {
        let mut sidebars = MockSidebarRepository::new();
        sidebars.expect_find_by_role().times(0);
        sidebars.expect_save().times(0);
        let fx = fixture(sidebars, allow_all(), MockRoleRepository::new());

        let err = fx
            .service
            .save_sidebar(&admin(), "HR User", vec![doc("Sub", 1).with_parent("Reports")])
            .await
            .unwrap_err();
        match err {
            DomainError::ValidationError(msg) => assert!(msg.contains("'Reports'")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_save_invalidates_and_notifies_role_holders() {
        let mut sidebars = MockSidebarRepository::new();
        sidebars.expect_find_by_role().times(1).returning(|_| Ok(None));
        sidebars
            .expect_save()
            .times(1)
            .returning(|config| Ok(config.clone()));
        let mut roles = MockRoleRepository::new();
        roles
            .expect_users_with_role()
            .returning(|_| Ok(vec!["b@example.com".into(), "a@example.com".into(), "b@example.com".into()]));
        let fx = fixture(sidebars, allow_all(), roles);
        fx.cache.put("role_sidebar_HR User", "{}");

        let outcome = fx
            .service
            .save_sidebar(&admin(), "HR User", vec![doc("Employee", 1)])
            .await
            .unwrap();
        assert_eq!(outcome.status, "success");
        assert!(outcome.warnings.is_empty());
        assert!(!fx.cache.contains("role_sidebar_HR User"));

        let events = fx.events.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, "role_sidebar_updated");
        assert_eq!(events[0].payload, json!({ "role": "HR User" }));
        assert_eq!(
            events[0].recipients,
            Recipients::Users(vec!["a@example.com".into(), "b@example.com".into()])
        );
    }

    #[tokio::test]
    async fn test_save_notifies_caller_when_role_is_unassigned() {
        let mut sidebars = MockSidebarRepository::new();
        sidebars.expect_find_by_role().returning(|_| Ok(None));
        sidebars.expect_save().returning(|config| Ok(config.clone()));
        let mut roles = MockRoleRepository::new();
        roles.expect_users_with_role().returning(|_| Ok(vec![]));
        let fx = fixture(sidebars, allow_all(), roles);

        fx.service
            .save_sidebar(&admin(), "Auditor", vec![doc("Employee", 1)])
            .await
            .unwrap();
        let events = fx.events.events();
        assert_eq!(events[0].recipients, Recipients::Users(vec!["admin@example.com".into()]));
    }

    #[tokio::test]
    async fn test_save_of_disabled_config_stays_quiet() {
        let mut existing = SidebarConfig::new("HR User", None);
        existing.enabled = false;
        let mut sidebars = MockSidebarRepository::new();
        sidebars
            .expect_find_by_role()
            .returning(move |_| Ok(Some(existing.clone())));
        sidebars.expect_save().returning(|config| Ok(config.clone()));
        let fx = fixture(sidebars, allow_all(), MockRoleRepository::new());
        fx.cache.put("role_sidebar_HR User", "{}");

        fx.service
            .save_sidebar(&admin(), "HR User", vec![doc("Employee", 1)])
            .await
            .unwrap();
        assert!(fx.cache.contains("role_sidebar_HR User"));
        assert!(fx.events.events().is_empty());
    }

    #[tokio::test]
    async fn test_delete_invalidates_cache() {
        let mut sidebars = MockSidebarRepository::new();
        sidebars.expect_delete().times(1).returning(|_| Ok(true));
        let fx = fixture(sidebars, allow_all(), MockRoleRepository::new());
        fx.cache.put("role_sidebar_HR User", "{}");

        assert!(fx.service.delete_sidebar(&admin(), "HR User").await.unwrap());
        assert!(!fx.cache.contains("role_sidebar_HR User"));
        assert!(fx.service.delete_sidebar(&hr_user(), "HR User").await.is_err());
    }

    #[tokio::test]
    async fn test_notify_counts_distinct_users() {
        let mut roles = MockRoleRepository::new();
        roles
            .expect_users_with_role()
            .returning(|_| Ok(vec!["a".into(), "b".into(), "a".into()]));
        let fx = fixture(MockSidebarRepository::new(), allow_all(), roles);

        let outcome = fx.service.notify_role_update("HR User").await.unwrap();
        assert_eq!(outcome.users_notified, 2);
        assert_eq!(fx.events.events().len(), 1);
    }

    #[tokio::test]
    async fn test_notify_without_holders_publishes_nothing() {
        let mut roles = MockRoleRepository::new();
        roles.expect_users_with_role().returning(|_| Ok(vec![]));
        let fx = fixture(MockSidebarRepository::new(), allow_all(), roles);

        let outcome = fx.service.notify_role_update("Nobody").await.unwrap();
        assert_eq!(outcome.users_notified, 0);
        assert!(fx.events.events().is_empty());
    }
}
