//! PostgreSQL store: one JSONB row per record in `<schema>.records`. Schema name from `DATA_SCHEMA` (default `data_api`).

use crate::error::StoreError;
use crate::record::{Record, RecordId};
use crate::store::RecordStore;
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

pub const DEFAULT_SCHEMA: &str = "data_api";

const RECORDS_TABLE: &str = "records";

#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
    schema: String,
}

impl PgRecordStore {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        Self {
            pool,
            schema: schema.into(),
        }
    }

    /// Connect a small pool to `database_url`, creating the database first when needed.
    pub async fn connect(database_url: &str, schema: &str) -> Result<Self, StoreError> {
        ensure_database_exists(database_url).await?;
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool, schema))
    }

    /// Schema-qualified, quoted table name (e.g. `"data_api"."records"`).
    fn qualified_table(&self) -> String {
        format!("{}.{}", quote_ident(&self.schema), quote_ident(RECORDS_TABLE))
    }

    /// Create the schema and the records table if missing.
    pub async fn ensure_tables(&self) -> Result<(), StoreError> {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(&self.schema)))
            .execute(&self.pool)
            .await?;
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id BIGINT PRIMARY KEY,
                payload JSONB NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            self.qualified_table()
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn list_all(&self) -> Result<Vec<Record>, StoreError> {
        let sql = format!("SELECT payload FROM {} ORDER BY id", self.qualified_table());
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<Json<Record>> = sqlx::query_scalar::<_, Json<Record>>(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|Json(r)| r).collect())
    }

    async fn create(&self, record: Record) -> Result<Record, StoreError> {
        let id = record.id().ok_or(StoreError::MissingId)?;
        let sql = format!(
            "INSERT INTO {} (id, payload, updated_at) VALUES ($1, $2, NOW()) ON CONFLICT (id) DO NOTHING",
            self.qualified_table()
        );
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(Json(&record))
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::Duplicate(id));
        }
        Ok(record)
    }

    async fn replace(&self, id: RecordId, record: Record) -> Result<bool, StoreError> {
        let target = record.id().unwrap_or(id);
        let sql = format!(
            "UPDATE {} SET id = $2, payload = $3, updated_at = NOW() WHERE id = $1",
            self.qualified_table()
        );
        tracing::debug!(sql = %sql, id, target, "query");
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(target)
            .bind(Json(&record))
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::Duplicate(target)
                } else {
                    StoreError::Db(e)
                }
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, id: RecordId) -> Result<bool, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.qualified_table());
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
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
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), StoreError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| StoreError::Unavailable("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_name_and_admin_url_are_split_from_url() {
        let (admin, name) = parse_db_name_from_url("postgres://u:p@localhost:5432/records?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(name, "records");
    }

    #[test]
    fn url_without_path_is_rejected() {
        assert!(parse_db_name_from_url("no-slashes-here").is_err());
    }

    #[test]
    fn non_database_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
        assert!(!is_unique_violation(&sqlx::Error::PoolTimedOut));
    }

    #[test]
    fn identifiers_are_double_quoted() {
        assert_eq!(quote_ident("data_api"), "\"data_api\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
