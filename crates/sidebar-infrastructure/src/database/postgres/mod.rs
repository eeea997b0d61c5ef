//! PostgreSQL repository implementations

pub mod sidebar_repo_impl;
pub mod permission_repo_impl;
pub mod role_repo_impl;
pub mod theme_repo_impl;
pub mod workspace_sidebar_repo_impl;

pub use sidebar_repo_impl::PgSidebarRepository;
pub use permission_repo_impl::PgPermissionRepository;
pub use role_repo_impl::PgRoleRepository;
pub use theme_repo_impl::PgThemeRepository;
pub use workspace_sidebar_repo_impl::PgWorkspaceSidebarRepository;
