// ============================================================================
// Sidebar Infrastructure - PostgreSQL Role Repository
// File: crates/sidebar-infrastructure/src/database/postgres/role_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

use sidebar_core::error::DomainError;
use sidebar_core::repositories::RoleRepository;

pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    async fn users_with_role(&self, role: &str) -> Result<Vec<String>, DomainError> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT user_id FROM user_roles WHERE role = $1 ORDER BY user_id",
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing users of role {}: {}", role, e);
            DomainError::DatabaseError(e.to_string())
        })
    }
}
