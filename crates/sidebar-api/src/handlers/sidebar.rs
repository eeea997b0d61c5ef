// ============================================================================
// Sidebar API - Role Sidebar Handlers
// File: crates/sidebar-api/src/handlers/sidebar.rs
// ============================================================================
//! Role sidebar HTTP handlers (resolve, save, delete, notify)

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use sidebar_core::domain::{Caller, MenuItem, ResolvedSidebar};
use sidebar_core::services::{NotifyOutcome, SaveOutcome, SidebarService};

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::response::ApiResponse;

/// Save request payload
#[derive(Debug, Deserialize)]
pub struct SaveSidebarRequest {
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Serialize)]
pub struct DeleteSidebarResponse {
    pub deleted: bool,
}

/// Non-administrators may only read sidebars of roles they hold.
fn ensure_can_read(caller: &Caller, role: &str) -> Result<(), ApiError> {
    if caller.is_administrator() || caller.roles.iter().any(|r| r == role) {
        return Ok(());
    }
    Err(ApiError::Forbidden(format!(
        "User {} does not hold role {}",
        caller.user, role
    )))
}

/// GET /api/v1/sidebar
pub async fn get_my_sidebar(
    State(service): State<Arc<SidebarService>>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<ApiResponse<Option<ResolvedSidebar>>>, ApiError> {
    let sidebar = service.resolve(&caller, None).await?;
    Ok(Json(ApiResponse::success(sidebar)))
}

/// GET /api/v1/sidebar/{role}
pub async fn get_sidebar(
    State(service): State<Arc<SidebarService>>,
    CurrentUser(caller): CurrentUser,
    Path(role): Path<String>,
) -> Result<Json<ApiResponse<Option<ResolvedSidebar>>>, ApiError> {
    ensure_can_read(&caller, &role)?;
    let sidebar = service.resolve(&caller, Some(&role)).await?;
    Ok(Json(ApiResponse::success(sidebar)))
}

/// PUT /api/v1/sidebar/{role}
pub async fn save_sidebar(
    State(service): State<Arc<SidebarService>>,
    CurrentUser(caller): CurrentUser,
    Path(role): Path<String>,
    Json(payload): Json<SaveSidebarRequest>,
) -> Result<Json<ApiResponse<SaveOutcome>>, ApiError> {
    info!("Save sidebar request for role {} by {}", role, caller.user);
    let outcome = service.save_sidebar(&caller, &role, payload.items).await?;
    Ok(Json(ApiResponse::success(outcome)))
}

/// DELETE /api/v1/sidebar/{role}
pub async fn delete_sidebar(
    State(service): State<Arc<SidebarService>>,
    CurrentUser(caller): CurrentUser,
    Path(role): Path<String>,
) -> Result<Json<ApiResponse<DeleteSidebarResponse>>, ApiError> {
    let deleted = service.delete_sidebar(&caller, &role).await?;
    Ok(Json(ApiResponse::success(DeleteSidebarResponse { deleted })))
}

/// POST /api/v1/sidebar/{role}/notify
pub async fn notify_role_update(
    State(service): State<Arc<SidebarService>>,
    CurrentUser(caller): CurrentUser,
    Path(role): Path<String>,
) -> Result<Json<ApiResponse<NotifyOutcome>>, ApiError> {
    info!("Role update notification for {} requested by {}", role, caller.user);
    let outcome = service.notify_role_update(&role).await?;
    Ok(Json(ApiResponse::success(outcome)))
}
