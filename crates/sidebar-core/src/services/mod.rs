//! Domain services

pub mod route;
pub mod validation;
pub mod permission_service;
pub mod sidebar_service;
pub mod theme_service;
pub mod catalog_service;
pub mod boot_service;

pub use permission_service::PermissionService;
pub use sidebar_service::{NotifyOutcome, SaveOutcome, SidebarService};
pub use theme_service::ThemeService;
pub use catalog_service::CatalogService;
pub use boot_service::{BootInfo, BootService};
