// ============================================================================
// Sidebar Infrastructure - PostgreSQL Workspace Sidebar Repository
// File: crates/sidebar-infrastructure/src/database/postgres/workspace_sidebar_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::error;

use sidebar_core::domain::{WorkspaceSidebar, WorkspaceSidebarItem};
use sidebar_core::error::DomainError;
use sidebar_core::repositories::WorkspaceSidebarRepository;

pub struct PgWorkspaceSidebarRepository {
    pool: PgPool,
}

impl PgWorkspaceSidebarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct WorkspaceSidebarRow {
    pub name: String,
    pub label: Option<String>,
    pub header_icon: Option<String>,
    pub items: Json<Vec<WorkspaceSidebarItem>>,
}

impl From<WorkspaceSidebarRow> for WorkspaceSidebar {
    fn from(row: WorkspaceSidebarRow) -> Self {
        WorkspaceSidebar {
            name: row.name,
            label: row.label,
            header_icon: row.header_icon,
            items: row.items.0,
        }
    }
}

#[async_trait]
impl WorkspaceSidebarRepository for PgWorkspaceSidebarRepository {
    async fn list(&self, limit: usize) -> Result<Vec<WorkspaceSidebar>, DomainError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<WorkspaceSidebarRow> = sqlx::query_as(
            "SELECT name, label, header_icon, items FROM workspace_sidebars ORDER BY name LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing workspace sidebars: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(WorkspaceSidebar::from).collect())
    }
}
