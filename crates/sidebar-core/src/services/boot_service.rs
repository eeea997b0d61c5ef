//! Per-session bootstrap payload

use std::sync::Arc;

use serde::Serialize;
use tracing::error;

use crate::domain::{Caller, ResolvedSidebar, ThemeSettings};

use super::sidebar_service::SidebarService;
use super::theme_service::ThemeService;

#[derive(Debug, Clone, Default, Serialize)]
pub struct BootInfo {
    pub theme_settings: ThemeSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_sidebar: Option<ResolvedSidebar>,
}

pub struct BootService {
    theme: Arc<ThemeService>,
    sidebar: Arc<SidebarService>,
}

impl BootService {
    pub fn new(theme: Arc<ThemeService>, sidebar: Arc<SidebarService>) -> Self {
        Self { theme, sidebar }
    }

    /// Never fails; broken parts are logged and left empty.
    pub async fn boot_info(&self, caller: &Caller) -> BootInfo {
        let theme_settings = match self.theme.get_settings().await {
            Ok(settings) => settings,
            Err(e) => {
                error!("Error loading theme settings: {}", e);
                ThemeSettings::default()
            }
        };

        if caller.is_guest() {
            return BootInfo {
                theme_settings,
                ..BootInfo::default()
            };
        }

        let Some(role) = caller.sidebar_role() else {
            return BootInfo {
                theme_settings,
                ..BootInfo::default()
            };
        };

        let role_sidebar = match self.sidebar.resolve(caller, Some(role)).await {
            Ok(sidebar) => sidebar,
            Err(e) => {
                error!("Error loading role sidebar for {}: {}", role, e);
                None
            }
        };

        BootInfo {
            theme_settings,
            sidebar_role: role_sidebar.as_ref().map(|_| role.to_string()),
            role_sidebar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::domain::{LinkTarget, MenuItem, SidebarConfig};
    use crate::error::DomainError;
    use crate::repositories::{
        MockPermissionRepository, MockRoleRepository, MockSidebarRepository, MockThemeRepository,
    };
    use crate::services::PermissionService;
    use crate::test_support::{FakeCache, RecordingPublisher};

    fn boot(theme_repo: MockThemeRepository, sidebars: MockSidebarRepository) -> BootService {
        let cache = Arc::new(FakeCache::default());
        let events = Arc::new(RecordingPublisher::default());
        let theme = ThemeService::new(Arc::new(theme_repo), cache.clone(), events.clone(), Duration::from_secs(60));
        let sidebar = SidebarService::new(
            Arc::new(sidebars),
            Arc::new(MockRoleRepository::new()),
            Arc::new(PermissionService::new(Arc::new(MockPermissionRepository::new()))),
            cache,
            events,
            Duration::from_secs(60),
        );
        BootService::new(Arc::new(theme), Arc::new(sidebar))
    }

    #[tokio::test]
    async fn test_boot_attaches_sidebar_of_first_custom_role() {
        let mut theme = MockThemeRepository::new();
        theme.expect_load().returning(|| Ok(None));
        let mut sidebars = MockSidebarRepository::new();
        sidebars.expect_find_enabled_by_role().returning(|role| {
            assert_eq!(role, "HR User");
            Ok(Some(SidebarConfig::new(role, None).with_items(vec![MenuItem::link(
                "Docs",
                LinkTarget::url("https://docs.example.com"),
            )])))
        });
        let svc = boot(theme, sidebars);

        let caller = Caller::new("jane@example.com", vec!["All".into(), "HR User".into()]);
        let info = svc.boot_info(&caller).await;
        assert_eq!(info.sidebar_role.as_deref(), Some("HR User"));
        assert_eq!(info.role_sidebar.unwrap().labels(), vec!["Docs"]);
        assert_eq!(info.theme_settings, ThemeSettings::defaults());
    }

    #[tokio::test]
    async fn test_boot_survives_theme_failure() {
        let mut theme = MockThemeRepository::new();
        theme
            .expect_load()
            .returning(|| Err(DomainError::DatabaseError("down".into())));
        let svc = boot(theme, MockSidebarRepository::new());

        let info = svc.boot_info(&Caller::guest()).await;
        assert!(info.theme_settings.is_empty());
        assert!(info.role_sidebar.is_none());
    }

    #[tokio::test]
    async fn test_boot_without_custom_role() {
        let mut theme = MockThemeRepository::new();
        theme.expect_load().returning(|| Ok(None));
        let mut sidebars = MockSidebarRepository::new();
        sidebars.expect_find_enabled_by_role().times(0);
        let svc = boot(theme, sidebars);

        let caller = Caller::new("admin@example.com", vec!["Administrator".into(), "All".into()]);
        let info = svc.boot_info(&caller).await;
        assert!(info.sidebar_role.is_none());
    }
}
