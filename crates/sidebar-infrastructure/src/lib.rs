//! # Sidebar Infrastructure
//! 
//! Database, cache, and realtime implementations (adapters).

pub mod database;
pub mod memory;
pub mod cache;
pub mod realtime;

pub use database::{
    create_pool, run_migrations, PgPermissionRepository, PgRoleRepository, PgSidebarRepository,
    PgThemeRepository, PgWorkspaceSidebarRepository,
};
pub use memory::{MemoryStore, SeedData};
pub use cache::{MemoryCache, RedisCache};
pub use realtime::EventBus;
