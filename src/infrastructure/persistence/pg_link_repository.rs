//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::OnceCell;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, map_sqlx_error};

/// Idempotent schema definition for the `links` relation.
///
/// `IF NOT EXISTS` makes the statements safe to run concurrently and
/// repeatedly: two first-requests racing through the uninitialized window may
/// both execute them and both succeed. The in-process guard below only saves
/// round-trips.
const SCHEMA_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS links (
        id              BIGSERIAL PRIMARY KEY,
        code            VARCHAR(8) NOT NULL UNIQUE,
        url             TEXT NOT NULL,
        clicks          BIGINT NOT NULL DEFAULT 0,
        created_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
        last_clicked_at TIMESTAMPTZ
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_links_code ON links (code)",
];

/// PostgreSQL repository for link storage and retrieval.
///
/// Uses SQLx prepared statements for SQL injection protection. Every query
/// draws a connection from the pool and releases it on all exit paths; the
/// pool is bounded, so nothing here holds a connection across awaits that
/// don't need one.
pub struct PgLinkRepository {
    pool: PgPool,
    schema_ready: OnceCell<()>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            schema_ready: OnceCell::new(),
        }
    }

    /// Ensures the schema exists, running the DDL at most once per process.
    ///
    /// Called lazily at the start of every operation. The `OnceCell` collapses
    /// repeat calls; correctness under concurrent first calls comes from the
    /// DDL being idempotent, not from the guard.
    async fn ensure_schema(&self) -> Result<(), AppError> {
        self.schema_ready
            .get_or_try_init(|| async {
                for statement in SCHEMA_DDL {
                    sqlx::query(statement)
                        .execute(&self.pool)
                        .await
                        .map_err(|e| map_sqlx_error("ensure_schema", e))?;
                }
                tracing::debug!("links schema ready");
                Ok(())
            })
            .await
            .copied()
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        self.ensure_schema().await?;

        sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (code, url)
            VALUES ($1, $2)
            RETURNING id, code, url, clicks, created_at, last_clicked_at
            "#,
        )
        .bind(&new_link.code)
        .bind(&new_link.url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create", e))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        self.ensure_schema().await?;

        sqlx::query_as::<_, Link>(
            r#"
            SELECT id, code, url, clicks, created_at, last_clicked_at
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_code", e))
    }

    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        self.ensure_schema().await?;

        let found: Option<i32> = sqlx::query_scalar("SELECT 1 FROM links WHERE code = $1 LIMIT 1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("exists", e))?;

        Ok(found.is_some())
    }

    async fn delete_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        self.ensure_schema().await?;

        sqlx::query_as::<_, Link>(
            r#"
            DELETE FROM links
            WHERE code = $1
            RETURNING id, code, url, clicks, created_at, last_clicked_at
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("delete_by_code", e))
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        self.ensure_schema().await?;

        // id DESC keeps rows created in the same instant in insertion order.
        sqlx::query_as::<_, Link>(
            r#"
            SELECT id, code, url, clicks, created_at, last_clicked_at
            FROM links
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_all", e))
    }

    async fn record_visit(&self, code: &str) -> Result<bool, AppError> {
        self.ensure_schema().await?;

        // Atomic increment at the storage layer; concurrent visits never lose
        // counts. last_clicked_at is last-write-wins.
        let result = sqlx::query(
            r#"
            UPDATE links
            SET clicks = clicks + 1, last_clicked_at = now()
            WHERE code = $1
            "#,
        )
        .bind(code)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("record_visit", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ping", e))?;

        Ok(())
    }
}
