//! Menu catalog handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use sidebar_core::domain::{CatalogItem, DefaultSidebarItem};
use sidebar_core::services::CatalogService;

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::response::ApiResponse;

/// GET /api/v1/menu-items
pub async fn list_menu_items(
    State(service): State<Arc<CatalogService>>,
    CurrentUser(_caller): CurrentUser,
) -> Result<Json<ApiResponse<Vec<CatalogItem>>>, ApiError> {
    let items = service.available_menu_items().await?;
    Ok(Json(ApiResponse::success(items)))
}

/// GET /api/v1/sidebar/{role}/defaults
pub async fn default_items(
    State(service): State<Arc<CatalogService>>,
    CurrentUser(caller): CurrentUser,
    Path(role): Path<String>,
) -> Result<Json<ApiResponse<Vec<DefaultSidebarItem>>>, ApiError> {
    if !caller.is_administrator() {
        return Err(ApiError::Forbidden(
            "Only administrators can build role sidebars".to_string(),
        ));
    }
    let items = service.default_items_for_role(&role).await?;
    Ok(Json(ApiResponse::success(items)))
}
