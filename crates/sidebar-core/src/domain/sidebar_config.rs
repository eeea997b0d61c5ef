// ============================================================================
// Sidebar Core - Sidebar Config Entity
// File: crates/sidebar-core/src/domain/sidebar_config.rs
// Description: Per-role ordered set of menu items
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sidebar_shared::{new_id, EntityId};

use super::menu_item::MenuItem;

/// Sidebar configuration of one role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidebarConfig {
    pub id: EntityId,
    pub role: String,
    pub enabled: bool,
    pub items: Vec<MenuItem>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<String>,
}

impl SidebarConfig {
    pub fn new(role: impl Into<String>, created_by: Option<String>) -> Self {
        Self {
            id: new_id(),
            role: role.into().trim().to_string(),
            enabled: true,
            items: Vec::new(),
            created_at: Utc::now(),
            created_by,
            modified_at: None,
            modified_by: None,
        }
    }

    pub fn with_items(mut self, items: Vec<MenuItem>) -> Self {
        self.items = items;
        self
    }

    pub fn replace_items(&mut self, items: Vec<MenuItem>, modified_by: &str) {
        self.items = items;
        self.modified_at = Some(Utc::now());
        self.modified_by = Some(modified_by.to_string());
    }

    pub fn active_items(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.iter().filter(|item| item.is_active)
    }
}
