//! # Sidebar Core - Domain Module
//! 
//! Domain entities for the role sidebar service.

pub mod menu_item;
pub mod sidebar_config;
pub mod resolved;
pub mod caller;
pub mod permission;
pub mod theme;
pub mod workspace_sidebar;

// Re-export all entities and enums
pub use menu_item::{ItemKind, LinkTarget, LinkType, MenuItem};
pub use sidebar_config::SidebarConfig;
pub use resolved::{ResolvedSidebar, ResolvedSidebarItem};
pub use caller::Caller;
pub use permission::{RecordKind, WorkspaceRecord};
pub use theme::ThemeSettings;
pub use workspace_sidebar::{CatalogItem, DefaultSidebarItem, WorkspaceSidebar, WorkspaceSidebarItem};
