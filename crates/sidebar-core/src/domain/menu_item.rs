// ============================================================================
// Sidebar Core - Menu Item Entity
// File: crates/sidebar-core/src/domain/menu_item.rs
// Description: One navigation entry of a role sidebar configuration
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Presentation kind of a menu item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    #[default]
    Link,
    #[serde(rename = "Section Break", alias = "SectionBreak")]
    SectionBreak,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Link => "Link",
            ItemKind::SectionBreak => "Section Break",
        }
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "").as_str() {
            "link" => Ok(ItemKind::Link),
            "sectionbreak" => Ok(ItemKind::SectionBreak),
            other => Err(format!("unknown item kind: {}", other)),
        }
    }
}

/// Kind of record a link points at
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LinkType {
    #[default]
    DocType,
    Page,
    Report,
    Workspace,
    Dashboard,
    Url,
    Other(String),
}

impl LinkType {
    pub fn as_str(&self) -> &str {
        match self {
            LinkType::DocType => "DocType",
            LinkType::Page => "Page",
            LinkType::Report => "Report",
            LinkType::Workspace => "Workspace",
            LinkType::Dashboard => "Dashboard",
            LinkType::Url => "URL",
            LinkType::Other(raw) => raw,
        }
    }
}

impl From<&str> for LinkType {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "doctype" => LinkType::DocType,
            "page" => LinkType::Page,
            "report" => LinkType::Report,
            "workspace" => LinkType::Workspace,
            "dashboard" => LinkType::Dashboard,
            "url" => LinkType::Url,
            _ => LinkType::Other(s.trim().to_string()),
        }
    }
}

impl From<String> for LinkType {
    fn from(s: String) -> Self {
        LinkType::from(s.as_str())
    }
}

impl From<LinkType> for String {
    fn from(link_type: LinkType) -> Self {
        link_type.as_str().to_string()
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Navigation target of a Link item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkTarget {
    #[serde(default)]
    pub link_type: LinkType,
    #[serde(default)]
    pub link_to: String,
    /// Only meaningful when `link_type` is URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl LinkTarget {
    pub fn new(link_type: LinkType, link_to: impl Into<String>) -> Self {
        Self {
            link_type,
            link_to: link_to.into(),
            url: None,
        }
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self {
            link_type: LinkType::Url,
            link_to: String::new(),
            url: Some(url.into()),
        }
    }
}

fn default_active() -> bool {
    true
}

/// Menu item of a role sidebar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MenuItem {
    /// Stable identifier; the label stands in when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 140, message = "Menu label must be between 1 and 140 characters"))]
    pub label: String,

    #[serde(default)]
    pub icon: String,

    #[serde(default, rename = "type")]
    pub kind: ItemKind,

    #[serde(default)]
    pub sequence: Option<i32>,

    #[serde(default = "default_active")]
    pub is_active: bool,

    #[serde(default)]
    pub open_in_new_tab: bool,

    #[serde(default, alias = "parent_item", skip_serializing_if = "Option::is_none")]
    pub parent_ref: Option<String>,

    /// Explicit route; wins over everything else when resolving the URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkTarget>,
}

impl MenuItem {
    pub fn link(label: impl Into<String>, target: LinkTarget) -> Self {
        Self {
            name: None,
            label: label.into(),
            icon: String::new(),
            kind: ItemKind::Link,
            sequence: None,
            is_active: true,
            open_in_new_tab: false,
            parent_ref: None,
            route: None,
            link: Some(target),
        }
    }

    pub fn section(label: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::SectionBreak,
            link: None,
            ..Self::link(label, LinkTarget::default())
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_sequence(mut self, sequence: i32) -> Self {
        self.sequence = Some(sequence);
        self
    }

    pub fn with_parent(mut self, parent_ref: impl Into<String>) -> Self {
        self.parent_ref = Some(parent_ref.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Assigned name, or the label when no name is set.
    pub fn identifier(&self) -> &str {
        non_empty(self.name.as_deref()).unwrap_or(&self.label)
    }

    pub fn explicit_name(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }

    pub fn parent(&self) -> Option<&str> {
        non_empty(self.parent_ref.as_deref())
    }

    pub fn sort_key(&self) -> i32 {
        self.sequence.unwrap_or(0)
    }

    pub fn is_section_break(&self) -> bool {
        self.kind == ItemKind::SectionBreak
    }

    /// Link target that names a concrete record, if any.
    pub fn checked_target(&self) -> Option<&LinkTarget> {
        match (&self.kind, &self.link) {
            (ItemKind::Link, Some(target)) if !target.link_to.trim().is_empty() => Some(target),
            _ => None,
        }
    }
}

/// Treats blank strings the same as missing ones.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
