// ============================================================================
// Sidebar Infrastructure - PostgreSQL Theme Repository
// File: crates/sidebar-infrastructure/src/database/postgres/theme_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::error;

use sidebar_core::domain::ThemeSettings;
use sidebar_core::error::DomainError;
use sidebar_core::repositories::ThemeRepository;

pub struct PgThemeRepository {
    pool: PgPool,
}

impl PgThemeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ThemeRepository for PgThemeRepository {
    async fn load(&self) -> Result<Option<ThemeSettings>, DomainError> {
        let row: Option<Json<ThemeSettings>> =
            sqlx::query_scalar("SELECT settings FROM theme_settings WHERE id = 1")
                .fetch_optional(&self.pool)
                .await
                .map_err(|e: sqlx::Error| {
                    error!("Database error loading theme settings: {}", e);
                    DomainError::DatabaseError(e.to_string())
                })?;

        Ok(row.map(|Json(settings)| settings))
    }

    async fn save(&self, settings: &ThemeSettings) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO theme_settings (id, settings, modified_at)
            VALUES (1, $1, NOW())
            ON CONFLICT (id) DO UPDATE SET settings = EXCLUDED.settings, modified_at = NOW()
            "#,
        )
        .bind(Json(settings))
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error saving theme settings: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }
}
