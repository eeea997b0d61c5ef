//! Route table

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{boot, catalog, events, health, sidebar, theme};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Role sidebars
        .route("/api/v1/sidebar", get(sidebar::get_my_sidebar))
        .route(
            "/api/v1/sidebar/{role}",
            get(sidebar::get_sidebar)
                .put(sidebar::save_sidebar)
                .delete(sidebar::delete_sidebar),
        )
        .route("/api/v1/sidebar/{role}/notify", post(sidebar::notify_role_update))
        .route("/api/v1/sidebar/{role}/defaults", get(catalog::default_items))
        .route("/api/v1/menu-items", get(catalog::list_menu_items))
        // Theme
        .route("/api/v1/theme", get(theme::get_theme).put(theme::update_theme))
        .route("/api/v1/theme/export", get(theme::export_theme))
        .route("/api/v1/theme/import", post(theme::import_theme))
        // Session
        .route("/api/v1/boot", get(boot::boot_info))
        .route("/api/v1/events", get(events::event_stream))
        .with_state(state)
}
