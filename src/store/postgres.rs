//! PostgreSQL-backed [`PostStore`]. Table DDL and database bootstrap live here too.

use super::{PostStore, StoreError};
use crate::model::{NewPost, Post, PostPatch};
use async_trait::async_trait;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use uuid::Uuid;

pub const DEFAULT_POSTS_TABLE: &str = "posts";

const COLUMNS: &str = "id, title, body, tags, published_date";

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
    table: String,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self::with_table(pool, DEFAULT_POSTS_TABLE)
    }

    pub fn with_table(pool: PgPool, table: &str) -> Self {
        Self {
            pool,
            table: quoted(table),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the posts table if missing. Ids are UUIDv7, so the primary key index doubles as recency order.
    pub async fn ensure_table(&self) -> Result<(), StoreError> {
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id UUID PRIMARY KEY,
                title TEXT NOT NULL,
                body TEXT NOT NULL,
                tags TEXT[] NOT NULL DEFAULT '{{}}',
                published_date TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            self.table
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn create(&self, post: NewPost) -> Result<Post, StoreError> {
        let sql = format!(
            "INSERT INTO {} (id, title, body, tags) VALUES ($1, $2, $3, $4) RETURNING {}",
            self.table, COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Post>(&sql)
            .bind(Uuid::now_v7())
            .bind(post.title)
            .bind(post.body)
            .bind(post.tags)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_page(&self, skip: u64, limit: u64) -> Result<Vec<Post>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY id DESC LIMIT $1 OFFSET $2",
            COLUMNS, self.table
        );
        tracing::debug!(sql = %sql, skip, limit, "query");
        let rows = sqlx::query_as::<_, Post>(&sql)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .bind(i64::try_from(skip).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.table);
        tracing::debug!(sql = %sql, "query");
        let (n,): (i64,) = sqlx::query_as(&sql).fetch_one(&self.pool).await?;
        Ok(n.max(0) as u64)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, self.table);
        tracing::debug!(sql = %sql, %id, "query");
        let row = sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id_and_delete(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1 RETURNING {}", self.table, COLUMNS);
        tracing::debug!(sql = %sql, %id, "query");
        let row = sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id_and_update(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, StoreError> {
        // NULL params keep the stored value.
        let sql = format!(
            "UPDATE {} SET title = COALESCE($2, title), body = COALESCE($3, body), tags = COALESCE($4, tags) \
             WHERE id = $1 RETURNING {}",
            self.table, COLUMNS
        );
        tracing::debug!(sql = %sql, %id, "query");
        let row = sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .bind(patch.title)
            .bind(patch.body)
            .bind(patch.tags)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Create the database named in `database_url` when it does not exist yet, via the `postgres` maintenance db.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url);
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split `database_url` into (maintenance url, database name). The path is looked up after the `scheme://` authority;
/// a url without one yields an empty name.
fn parse_db_name_from_url(url: &str) -> (String, String) {
    let authority_start = url.find("://").map(|i| i + 3).unwrap_or(0);
    let authority_end = url[authority_start..]
        .find(|c: char| c == '/' || c == '?')
        .map(|i| authority_start + i)
        .unwrap_or(url.len());
    let (base, tail) = url.split_at(authority_end);
    let (path, query) = match tail.find('?') {
        Some(i) => tail.split_at(i),
        None => (tail, ""),
    };
    let db_name = path.trim_start_matches('/').trim();
    (format!("{}/postgres{}", base, query), db_name.to_string())
}
