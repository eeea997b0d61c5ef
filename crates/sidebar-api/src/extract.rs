//! Caller identity from the bearer token

use axum::extract::{FromRequestParts, Query};
use axum::http::{header::AUTHORIZATION, request::Parts};
use serde::Deserialize;
use sidebar_core::domain::Caller;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller. Rejects the request with 401 when no valid token is present.
///
/// The token is read from `Authorization: Bearer <token>`, or from the
/// `access_token` query parameter for clients such as `EventSource` that
/// cannot set headers.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Caller);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .or_else(|| query_token(parts))
            .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

        let claims = state.jwt.validate_token(&token)?;
        Ok(CurrentUser(Caller::new(claims.sub, claims.roles)))
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    access_token: Option<String>,
}

fn query_token(parts: &Parts) -> Option<String> {
    let Query(query) = Query::<TokenQuery>::try_from_uri(&parts.uri).ok()?;
    query.access_token.filter(|token| !token.trim().is_empty())
}
