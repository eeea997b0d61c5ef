use std::sync::Arc;

use axum::extract::FromRef;
use sidebar_core::services::{BootService, CatalogService, SidebarService, ThemeService};
use sidebar_infrastructure::EventBus;
use sidebar_security::JwtService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sidebar_service: Arc<SidebarService>,
    pub theme_service: Arc<ThemeService>,
    pub catalog_service: Arc<CatalogService>,
    pub boot_service: Arc<BootService>,
    pub jwt: Arc<JwtService>,
    pub event_bus: Arc<EventBus>,
}

impl FromRef<AppState> for Arc<SidebarService> {
    fn from_ref(state: &AppState) -> Self {
        state.sidebar_service.clone()
    }
}

impl FromRef<AppState> for Arc<ThemeService> {
    fn from_ref(state: &AppState) -> Self {
        state.theme_service.clone()
    }
}

impl FromRef<AppState> for Arc<CatalogService> {
    fn from_ref(state: &AppState) -> Self {
        state.catalog_service.clone()
    }
}

impl FromRef<AppState> for Arc<BootService> {
    fn from_ref(state: &AppState) -> Self {
        state.boot_service.clone()
    }
}

impl FromRef<AppState> for Arc<EventBus> {
    fn from_ref(state: &AppState) -> Self {
        state.event_bus.clone()
    }
}
