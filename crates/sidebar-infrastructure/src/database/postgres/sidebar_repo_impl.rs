// ============================================================================
// Sidebar Infrastructure - PostgreSQL Sidebar Repository
// File: crates/sidebar-infrastructure/src/database/postgres/sidebar_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use sidebar_core::domain::{ItemKind, LinkTarget, LinkType, MenuItem, SidebarConfig};
use sidebar_core::error::DomainError;
use sidebar_core::repositories::SidebarRepository;

pub struct PgSidebarRepository {
    pool: PgPool,
}

impl PgSidebarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find(&self, role: &str, enabled_only: bool) -> Result<Option<SidebarConfig>, DomainError> {
        let row: Option<SidebarRow> = sqlx::query_as(
            r#"
            SELECT id, role, enabled, created_at, created_by, modified_at, modified_by
            FROM role_sidebars
            WHERE role = $1 AND (enabled OR NOT $2)
            "#,
        )
        .bind(role)
        .bind(enabled_only)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding sidebar of role {}: {}", role, e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items: Vec<SidebarItemRow> = sqlx::query_as(
            r#"
            SELECT name, label, icon, item_type, sequence, is_active, open_in_new_tab,
                   parent_ref, route, link_type, link_to, url
            FROM role_sidebar_items
            WHERE sidebar_id = $1
            ORDER BY idx
            "#,
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error loading items of sidebar {}: {}", row.id, e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let mut config = SidebarConfig::from(row);
        config.items = items.into_iter().map(MenuItem::from).collect();
        Ok(Some(config))
    }
}

// Internal row types for SQLx mapping
#[derive(Debug, FromRow)]
struct SidebarRow {
    pub id: Uuid,
    pub role: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<String>,
}

impl From<SidebarRow> for SidebarConfig {
    fn from(row: SidebarRow) -> Self {
        SidebarConfig {
            id: row.id,
            role: row.role,
            enabled: row.enabled,
            items: Vec::new(),
            created_at: row.created_at,
            created_by: row.created_by,
            modified_at: row.modified_at,
            modified_by: row.modified_by,
        }
    }
}

#[derive(Debug, FromRow)]
struct SidebarItemRow {
    pub name: Option<String>,
    pub label: String,
    pub icon: String,
    pub item_type: String,
    pub sequence: Option<i32>,
    pub is_active: bool,
    pub open_in_new_tab: bool,
    pub parent_ref: Option<String>,
    pub route: Option<String>,
    pub link_type: Option<String>,
    pub link_to: Option<String>,
    pub url: Option<String>,
}

impl From<SidebarItemRow> for MenuItem {
    fn from(row: SidebarItemRow) -> Self {
        let kind: ItemKind = row.item_type.parse().unwrap_or_default();
        let link = match (kind, row.link_type) {
            (ItemKind::Link, Some(link_type)) => Some(LinkTarget {
                link_type: LinkType::from(link_type),
                link_to: row.link_to.unwrap_or_default(),
                url: row.url,
            }),
            _ => None,
        };
        MenuItem {
            name: row.name,
            label: row.label,
            icon: row.icon,
            kind,
            sequence: row.sequence,
            is_active: row.is_active,
            open_in_new_tab: row.open_in_new_tab,
            parent_ref: row.parent_ref,
            route: row.route,
            link,
        }
    }
}

#[async_trait]
impl SidebarRepository for PgSidebarRepository {
    async fn find_by_role(&self, role: &str) -> Result<Option<SidebarConfig>, DomainError> {
        self.find(role, false).await
    }

    async fn find_enabled_by_role(&self, role: &str) -> Result<Option<SidebarConfig>, DomainError> {
        self.find(role, true).await
    }

    async fn save(&self, config: &SidebarConfig) -> Result<SidebarConfig, DomainError> {
        let db_err = |e: sqlx::Error| {
            error!("Database error saving sidebar of role {}: {}", config.role, e);
            DomainError::DatabaseError(e.to_string())
        };

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO role_sidebars (id, role, enabled, created_at, created_by, modified_at, modified_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (role) DO UPDATE SET
                enabled = EXCLUDED.enabled,
                modified_at = EXCLUDED.modified_at,
                modified_by = EXCLUDED.modified_by
            RETURNING id
            "#,
        )
        .bind(config.id)
        .bind(&config.role)
        .bind(config.enabled)
        .bind(config.created_at)
        .bind(&config.created_by)
        .bind(config.modified_at)
        .bind(&config.modified_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err)?;

        sqlx::query("DELETE FROM role_sidebar_items WHERE sidebar_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        for (idx, item) in config.items.iter().enumerate() {
            let link = item.link.as_ref();
            sqlx::query(
                r#"
                INSERT INTO role_sidebar_items (
                    sidebar_id, idx, name, label, icon, item_type, sequence, is_active,
                    open_in_new_tab, parent_ref, route, link_type, link_to, url
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                "#,
            )
            .bind(id)
            .bind(idx as i32)
            .bind(&item.name)
            .bind(&item.label)
            .bind(&item.icon)
            .bind(item.kind.as_str())
            .bind(item.sequence)
            .bind(item.is_active)
            .bind(item.open_in_new_tab)
            .bind(&item.parent_ref)
            .bind(&item.route)
            .bind(link.map(|l| l.link_type.as_str().to_string()))
            .bind(link.map(|l| l.link_to.clone()))
            .bind(link.and_then(|l| l.url.clone()))
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)?;

        info!("Stored sidebar of role {} ({} items)", config.role, config.items.len());

        let mut saved = config.clone();
        saved.id = id;
        Ok(saved)
    }

    async fn delete(&self, role: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM role_sidebars WHERE role = $1")
            .bind(role)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting sidebar of role {}: {}", role, e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }
}
