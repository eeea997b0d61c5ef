//! Repository traits (ports)

pub mod sidebar_repository;
pub mod permission_repository;
pub mod role_repository;
pub mod theme_repository;
pub mod workspace_sidebar_repository;

pub use sidebar_repository::SidebarRepository;
pub use permission_repository::PermissionRepository;
pub use role_repository::RoleRepository;
pub use theme_repository::ThemeRepository;
pub use workspace_sidebar_repository::WorkspaceSidebarRepository;

#[cfg(test)]
pub use sidebar_repository::MockSidebarRepository;
#[cfg(test)]
pub use permission_repository::MockPermissionRepository;
#[cfg(test)]
pub use role_repository::MockRoleRepository;
#[cfg(test)]
pub use theme_repository::MockThemeRepository;
#[cfg(test)]
pub use workspace_sidebar_repository::MockWorkspaceSidebarRepository;
