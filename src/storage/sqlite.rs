//! SQLite storage backend using sqlx.
//!
//! Provides `SqliteHandle`, a [`SqlHandle`] backed by `sqlx::SqlitePool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `sqlite` feature flag (enabled by default).
//!
//! # Differences from MySQL backend
//!
//! - `INTEGER PRIMARY KEY AUTOINCREMENT` instead of `BIGINT AUTO_INCREMENT`
//! - Generated ids come from `last_insert_rowid()`
//! - Column types are taken from the stored value (dynamic typing)
//!
//! Every pool opened on `sqlite::memory:` gets its own shared-cache
//! database: connections of one pool see the same tables, separate pools
//! never do. The database is dropped with the pool's last connection.

use crate::core::{BoxError, ExecOutcome, SqlHandle, SqlRow, SqlValue};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::BoxStream;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Column, Row, Sqlite, SqlitePool, TypeInfo, ValueRef};

/// Apply the `payment` table (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS payment (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            source_account TEXT NOT NULL,
            target_account TEXT NOT NULL,
            amount REAL NOT NULL,
            payment_method TEXT NOT NULL,
            status TEXT NOT NULL,
            order_number TEXT NOT NULL UNIQUE,
            created_time TEXT NOT NULL,
            completion_time TEXT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| anyhow!("Failed to create payment table: {}", e))?;

    Ok(())
}

/// [`SqlHandle`] over a SQLite connection pool
///
/// # Example
///
/// ```rust,ignore
/// use sqlx::sqlite::SqlitePoolOptions;
/// use payment_store::storage::SqliteHandle;
///
/// let pool = SqlitePoolOptions::new().max_connections(1).connect("sqlite::memory:").await?;
/// let repo = PaymentRepository::new(SqliteHandle::new(pool), Logger::global());
/// ```
#[derive(Clone, Debug)]
pub struct SqliteHandle {
    pool: SqlitePool,
}

impl SqliteHandle {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn bind_args<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    args: Vec<SqlValue>,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for arg in args {
        query = match arg {
            SqlValue::Null | SqlValue::Other { .. } => query.bind(None::<String>),
            SqlValue::Int(v) => query.bind(v),
            SqlValue::Float(v) => query.bind(v),
            SqlValue::Text(v) => query.bind(v),
        };
    }
    query
}

/// Convert a driver row into a [`SqlRow`] using each value's storage class.
///
/// Blobs and any other class are kept as [`SqlValue::Other`], so a column
/// holding the wrong kind of value is reported by the row decoder instead
/// of failing the cursor.
fn decode_row(row: &SqliteRow) -> Result<SqlRow, sqlx::Error> {
    let mut out = SqlRow::new();

    for (idx, column) in row.columns().iter().enumerate() {
        let raw = row.try_get_raw(idx)?;
        let value = if raw.is_null() {
            SqlValue::Null
        } else {
            let type_name = raw.type_info().name().to_ascii_uppercase();
            match type_name.as_str() {
                "INTEGER" | "BOOLEAN" => SqlValue::Int(row.try_get::<i64, _>(idx)?),
                "REAL" | "NUMERIC" => SqlValue::Float(row.try_get::<f64, _>(idx)?),
                "TEXT" => SqlValue::Text(row.try_get::<String, _>(idx)?),
                _ => SqlValue::other(type_name),
            }
        };
        out.push(column.name(), value);
    }

    Ok(out)
}

#[async_trait]
impl SqlHandle for SqliteHandle {
    fn query<'a>(
        &'a self,
        sql: &'a str,
        args: Vec<SqlValue>,
    ) -> BoxStream<'a, Result<SqlRow, BoxError>> {
        bind_args(sqlx::query(sql), args)
            .fetch(&self.pool)
            .map(|row| row.and_then(|r| decode_row(&r)).map_err(BoxError::from))
            .boxed()
    }

    async fn exec(&self, sql: &str, args: Vec<SqlValue>) -> Result<ExecOutcome, BoxError> {
        let result = bind_args(sqlx::query(sql), args)
            .execute(&self.pool)
            .await?;

        Ok(ExecOutcome {
            rows_affected: result.rows_affected(),
            last_insert_id: Some(result.last_insert_rowid()).filter(|id| *id != 0),
        })
    }
}
