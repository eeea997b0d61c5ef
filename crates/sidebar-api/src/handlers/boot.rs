use std::sync::Arc;

use axum::{extract::State, Json};

use sidebar_core::services::{BootInfo, BootService};

use crate::extract::CurrentUser;
use crate::response::ApiResponse;

/// GET /api/v1/boot
pub async fn boot_info(
    State(service): State<Arc<BootService>>,
    CurrentUser(caller): CurrentUser,
) -> Json<ApiResponse<BootInfo>> {
    Json(ApiResponse::success(service.boot_info(&caller).await))
}
