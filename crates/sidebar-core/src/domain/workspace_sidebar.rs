//! Stock workspace sidebars shipped with the application, used as the menu catalog

use serde::{Deserialize, Serialize};

use super::menu_item::{ItemKind, LinkTarget, LinkType, MenuItem};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSidebarItem {
    pub label: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub link_type: Option<LinkType>,
    #[serde(default)]
    pub link_to: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSidebar {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub header_icon: Option<String>,
    #[serde(default)]
    pub items: Vec<WorkspaceSidebarItem>,
}

impl WorkspaceSidebar {
    pub fn display_name(&self) -> &str {
        self.label.as_deref().filter(|l| !l.is_empty()).unwrap_or(&self.name)
    }
}

/// Link item offered to the sidebar builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub label: String,
    pub icon: String,
    pub link_type: Option<LinkType>,
    pub link_to: Option<String>,
    pub url: String,
    pub source: String,
}

/// Item proposed as a starting point for a role's sidebar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultSidebarItem {
    pub label: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<LinkType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub sidebar_name: String,
    pub sequence: i32,
    pub is_active: bool,
    pub open_in_new_tab: bool,
}

impl From<DefaultSidebarItem> for MenuItem {
    fn from(item: DefaultSidebarItem) -> Self {
        let link = match item.kind {
            ItemKind::Link => Some(LinkTarget {
                link_type: item.link_type.unwrap_or_default(),
                link_to: item.link_to.unwrap_or_default(),
                url: None,
            }),
            ItemKind::SectionBreak => None,
        };
        MenuItem {
            name: None,
            label: item.label,
            icon: item.icon,
            kind: item.kind,
            sequence: Some(item.sequence),
            is_active: item.is_active,
            open_in_new_tab: item.open_in_new_tab,
            parent_ref: None,
            route: item.url.filter(|u| u != sidebar_shared::constants::FALLBACK_URL),
            link,
        }
    }
}
