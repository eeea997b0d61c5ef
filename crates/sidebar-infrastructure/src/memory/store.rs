// ============================================================================
// Sidebar Infrastructure - In-Memory Store
// File: crates/sidebar-infrastructure/src/memory/store.rs
// Description: Record store held in process memory, optionally seeded from JSON
// ============================================================================

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Deserialize;
use tracing::info;

use sidebar_core::domain::{
    MenuItem, RecordKind, SidebarConfig, ThemeSettings, WorkspaceRecord, WorkspaceSidebar,
};
use sidebar_core::error::{DomainError, LookupError};
use sidebar_core::repositories::{
    PermissionRepository, RoleRepository, SidebarRepository, ThemeRepository,
    WorkspaceSidebarRepository,
};

/// JSON layout accepted by [`MemoryStore::from_seed`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub sidebars: Vec<SeedSidebar>,
    pub doctypes: Vec<SeedDocType>,
    pub pages: Vec<SeedRestricted>,
    pub reports: Vec<SeedRestricted>,
    pub modules: Vec<SeedRestricted>,
    pub workspaces: Vec<WorkspaceRecord>,
    pub users: Vec<SeedUser>,
    pub theme: Option<ThemeSettings>,
    pub workspace_sidebars: Vec<WorkspaceSidebar>,
}

#[derive(Debug, Deserialize)]
pub struct SeedSidebar {
    pub role: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

fn enabled_by_default() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct SeedDocType {
    pub name: String,
    /// Roles holding read at permission level 0.
    #[serde(default)]
    pub read_roles: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeedRestricted {
    pub name: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeedUser {
    pub user: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Default)]
struct StoreData {
    sidebars: HashMap<String, SidebarConfig>,
    /// (kind, name) -> restricted roles; DocType entries hold read grants instead.
    records: HashMap<(RecordKind, String), Vec<String>>,
    workspaces: HashMap<String, WorkspaceRecord>,
    user_roles: HashMap<String, BTreeSet<String>>,
    theme: Option<ThemeSettings>,
    workspace_sidebars: Vec<WorkspaceSidebar>,
}

/// Implements every repository port over a single lock-protected state.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<StoreData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: SeedData) -> Self {
        let store = Self::new();
        {
            let mut data = store.data.write();
            for sidebar in seed.sidebars {
                let mut config = SidebarConfig::new(sidebar.role, None).with_items(sidebar.items);
                config.enabled = sidebar.enabled;
                data.sidebars.insert(config.role.clone(), config);
            }
            for doctype in seed.doctypes {
                data.records
                    .insert((RecordKind::DocType, doctype.name), doctype.read_roles);
            }
            for (kind, entries) in [
                (RecordKind::Page, seed.pages),
                (RecordKind::Report, seed.reports),
                (RecordKind::ModuleDef, seed.modules),
            ] {
                for entry in entries {
                    data.records.insert((kind, entry.name), entry.roles);
                }
            }
            for workspace in seed.workspaces {
                data.records
                    .insert((RecordKind::Workspace, workspace.name.clone()), Vec::new());
                data.workspaces.insert(workspace.name.clone(), workspace);
            }
            for user in seed.users {
                data.user_roles
                    .entry(user.user)
                    .or_default()
                    .extend(user.roles);
            }
            data.theme = seed.theme;
            data.workspace_sidebars = seed.workspace_sidebars;
        }
        store
    }

    pub fn from_json(raw: &str) -> Result<Self, DomainError> {
        let seed: SeedData = serde_json::from_str(raw)?;
        Ok(Self::from_seed(seed))
    }

    pub fn load_seed(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DomainError::InternalError(format!("Cannot read seed file {}: {}", path.display(), e))
        })?;
        let store = Self::from_json(&raw)?;
        info!(
            "Loaded seed {} ({} sidebars)",
            path.display(),
            store.data.read().sidebars.len()
        );
        Ok(store)
    }

    pub fn assign_role(&self, user: &str, role: &str) {
        self.data
            .write()
            .user_roles
            .entry(user.to_string())
            .or_default()
            .insert(role.to_string());
    }

    /// Roles of a user, for issuing tokens in development.
    pub fn roles_of(&self, user: &str) -> Vec<String> {
        self.data
            .read()
            .user_roles
            .get(user)
            .map(|roles| roles.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SidebarRepository for MemoryStore {
    async fn find_by_role(&self, role: &str) -> Result<Option<SidebarConfig>, DomainError> {
        Ok(self.data.read().sidebars.get(role).cloned())
    }

    async fn find_enabled_by_role(&self, role: &str) -> Result<Option<SidebarConfig>, DomainError> {
        Ok(self
            .data
            .read()
            .sidebars
            .get(role)
            .filter(|config| config.enabled)
            .cloned())
    }

    async fn save(&self, config: &SidebarConfig) -> Result<SidebarConfig, DomainError> {
        let mut data = self.data.write();
        let mut saved = config.clone();
        if let Some(existing) = data.sidebars.get(&config.role) {
            saved.id = existing.id;
            saved.created_at = existing.created_at;
        }
        data.sidebars.insert(saved.role.clone(), saved.clone());
        Ok(saved)
    }

    async fn delete(&self, role: &str) -> Result<bool, DomainError> {
        Ok(self.data.write().sidebars.remove(role).is_some())
    }
}

#[async_trait]
impl PermissionRepository for MemoryStore {
    async fn exists(&self, kind: RecordKind, name: &str) -> Result<bool, LookupError> {
        Ok(self
            .data
            .read()
            .records
            .contains_key(&(kind, name.to_string())))
    }

    async fn has_read_grant(&self, doctype: &str, role: &str) -> Result<bool, LookupError> {
        Ok(self
            .data
            .read()
            .records
            .get(&(RecordKind::DocType, doctype.to_string()))
            .is_some_and(|roles| roles.iter().any(|r| r == role)))
    }

    async fn restricted_roles(&self, kind: RecordKind, name: &str) -> Result<Vec<String>, LookupError> {
        if kind == RecordKind::DocType {
            return Err(LookupError::Inconsistent(
                "DocType records carry read grants, not role restrictions".to_string(),
            ));
        }
        Ok(self
            .data
            .read()
            .records
            .get(&(kind, name.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn find_workspace(&self, name: &str) -> Result<Option<WorkspaceRecord>, LookupError> {
        Ok(self.data.read().workspaces.get(name).cloned())
    }
}

#[async_trait]
impl RoleRepository for MemoryStore {
    async fn users_with_role(&self, role: &str) -> Result<Vec<String>, DomainError> {
        let mut users: Vec<String> = self
            .data
            .read()
            .user_roles
            .iter()
            .filter(|(_, roles)| roles.contains(role))
            .map(|(user, _)| user.clone())
            .collect();
        users.sort();
        Ok(users)
    }
}

#[async_trait]
impl ThemeRepository for MemoryStore {
    async fn load(&self) -> Result<Option<ThemeSettings>, DomainError> {
        Ok(self.data.read().theme.clone())
    }

    async fn save(&self, settings: &ThemeSettings) -> Result<(), DomainError> {
        self.data.write().theme = Some(settings.clone());
        Ok(())
    }
}

#[async_trait]
impl WorkspaceSidebarRepository for MemoryStore {
    async fn list(&self, limit: usize) -> Result<Vec<WorkspaceSidebar>, DomainError> {
        Ok(self
            .data
            .read()
            .workspace_sidebars
            .iter()
            .take(limit)
            .cloned()
            .collect())
    }
}
