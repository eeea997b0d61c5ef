//! Builds the application state from configuration

use std::sync::Arc;
use std::time::Duration;

use sidebar_api::AppState;
use sidebar_core::ports::CacheStore;
use sidebar_core::repositories::{
    PermissionRepository, RoleRepository, SidebarRepository, ThemeRepository,
    WorkspaceSidebarRepository,
};
use sidebar_core::services::{
    BootService, CatalogService, PermissionService, SidebarService, ThemeService,
};
use sidebar_infrastructure::{
    create_pool, run_migrations, EventBus, MemoryCache, MemoryStore, PgPermissionRepository,
    PgRoleRepository, PgSidebarRepository, PgThemeRepository, PgWorkspaceSidebarRepository,
    RedisCache,
};
use sidebar_security::JwtService;
use sidebar_shared::config::{AppConfig, CacheBackend, StoreBackend};
use sidebar_shared::AppError;
use tracing::info;

struct Repositories {
    sidebars: Arc<dyn SidebarRepository>,
    permissions: Arc<dyn PermissionRepository>,
    roles: Arc<dyn RoleRepository>,
    theme: Arc<dyn ThemeRepository>,
    workspaces: Arc<dyn WorkspaceSidebarRepository>,
}

async fn repositories(config: &AppConfig) -> Result<Repositories, AppError> {
    match config.store.backend {
        StoreBackend::Memory => {
            let store = match &config.store.seed_path {
                Some(path) => MemoryStore::load_seed(path)
                    .map_err(|e| AppError::InternalError(e.to_string()))?,
                None => MemoryStore::new(),
            };
            info!("Using in-memory record store");
            let store = Arc::new(store);
            Ok(Repositories {
                sidebars: store.clone(),
                permissions: store.clone(),
                roles: store.clone(),
                theme: store.clone(),
                workspaces: store,
            })
        }
        StoreBackend::Postgres => {
            info!("Connecting to database...");
            let pool = create_pool(&config.database)
                .await
                .map_err(|e| AppError::InternalError(format!("Database connection failed: {}", e)))?;
            if config.store.run_migrations {
                run_migrations(&pool)
                    .await
                    .map_err(|e| AppError::InternalError(format!("Migration failed: {}", e)))?;
            }
            info!("Database connection established.");
            Ok(Repositories {
                sidebars: Arc::new(PgSidebarRepository::new(pool.clone())),
                permissions: Arc::new(PgPermissionRepository::new(pool.clone())),
                roles: Arc::new(PgRoleRepository::new(pool.clone())),
                theme: Arc::new(PgThemeRepository::new(pool.clone())),
                workspaces: Arc::new(PgWorkspaceSidebarRepository::new(pool)),
            })
        }
    }
}

fn cache(config: &AppConfig) -> Result<Arc<dyn CacheStore>, AppError> {
    match config.cache.backend {
        CacheBackend::Memory => Ok(Arc::new(MemoryCache::new())),
        CacheBackend::Redis => {
            let cache = RedisCache::new(&config.redis)
                .map_err(|e| AppError::InternalError(e.to_string()))?;
            Ok(Arc::new(cache))
        }
    }
}

pub async fn build_state(config: &AppConfig) -> Result<AppState, AppError> {
    let repos = repositories(config).await?;
    let cache = cache(config)?;
    let event_bus = Arc::new(EventBus::new(config.realtime.capacity));

    let permissions = Arc::new(PermissionService::new(repos.permissions));
    let sidebar_service = Arc::new(SidebarService::new(
        repos.sidebars,
        repos.roles,
        permissions.clone(),
        cache.clone(),
        event_bus.clone(),
        Duration::from_secs(config.cache.sidebar_ttl_secs),
    ));
    let theme_service = Arc::new(ThemeService::new(
        repos.theme,
        cache,
        event_bus.clone(),
        Duration::from_secs(config.cache.theme_ttl_secs),
    ));
    let catalog_service = Arc::new(CatalogService::new(repos.workspaces, permissions));
    let boot_service = Arc::new(BootService::new(
        theme_service.clone(),
        sidebar_service.clone(),
    ));

    Ok(AppState {
        sidebar_service,
        theme_service,
        catalog_service,
        boot_service,
        jwt: Arc::new(JwtService::from_settings(&config.jwt)),
        event_bus,
    })
}
