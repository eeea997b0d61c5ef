//! Theme settings handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use sidebar_core::domain::ThemeSettings;
use sidebar_core::services::ThemeService;

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::response::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct UpdateThemeRequest {
    pub settings: BTreeMap<String, String>,
    #[serde(default)]
    pub auto_generate_variants: bool,
}

#[derive(Debug, Deserialize)]
pub struct ImportThemeRequest {
    pub theme_json: String,
}

/// GET /api/v1/theme
pub async fn get_theme(
    State(service): State<Arc<ThemeService>>,
    CurrentUser(_caller): CurrentUser,
) -> Result<Json<ApiResponse<ThemeSettings>>, ApiError> {
    let settings = service.get_settings().await?;
    Ok(Json(ApiResponse::success(settings)))
}

/// PUT /api/v1/theme
pub async fn update_theme(
    State(service): State<Arc<ThemeService>>,
    CurrentUser(caller): CurrentUser,
    Json(payload): Json<UpdateThemeRequest>,
) -> Result<Json<ApiResponse<ThemeSettings>>, ApiError> {
    let settings = service
        .update_settings(&caller, payload.settings, payload.auto_generate_variants)
        .await?;
    Ok(Json(ApiResponse::success(settings)))
}

/// GET /api/v1/theme/export
pub async fn export_theme(
    State(service): State<Arc<ThemeService>>,
    CurrentUser(_caller): CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let body = service.export_theme().await?;
    Ok((
        [
            (CONTENT_TYPE, "application/json"),
            (CONTENT_DISPOSITION, "attachment; filename=\"theme_settings.json\""),
        ],
        body,
    ))
}

/// POST /api/v1/theme/import
pub async fn import_theme(
    State(service): State<Arc<ThemeService>>,
    CurrentUser(caller): CurrentUser,
    Json(payload): Json<ImportThemeRequest>,
) -> Result<Json<ApiResponse<ThemeSettings>>, ApiError> {
    let settings = service.import_theme(&caller, &payload.theme_json).await?;
    Ok(Json(ApiResponse::success(settings)))
}
