//! Resolved sidebar shapes handed to the front-end renderer

use serde::{Deserialize, Serialize};

use super::menu_item::{ItemKind, LinkType};

/// One entry of the flattened sidebar.
///
/// Parents are followed directly by their children (`child = true`); Link
/// parents also carry a nested copy of those children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSidebarItem {
    pub label: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<LinkType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_to: Option<String>,
    pub open_in_new_tab: bool,
    pub collapsible: bool,
    pub child: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ResolvedSidebarItem>,
}

/// Cached unit: everything the renderer needs for one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSidebar {
    pub label: String,
    pub header_icon: String,
    pub items: Vec<ResolvedSidebarItem>,
}

impl ResolvedSidebar {
    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.label.as_str()).collect()
    }
}
