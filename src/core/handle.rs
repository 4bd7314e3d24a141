//! Store capability consumed by the payment repository
//!
//! A [`SqlHandle`] is the minimal surface a relational backend has to offer:
//! open a cursor over a parameterized query, or execute a parameterized
//! statement. Backends (MySQL, SQLite, test fakes) implement it and are
//! injected into [`PaymentRepository`](crate::repository::PaymentRepository).

use crate::core::error::BoxError;
use async_trait::async_trait;
use futures::stream::BoxStream;

/// A bound parameter or a decoded column value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    /// A column value of a type the payment schema never uses (blobs,
    /// dates without a time, JSON, ...). Only produced by decoding; binds
    /// as NULL.
    Other { type_name: String },
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Wrap a driver column type that has no direct mapping
    pub fn other(type_name: impl Into<String>) -> Self {
        SqlValue::Other {
            type_name: type_name.into(),
        }
    }

    /// Short name of the value's kind, used in decode errors
    pub fn kind(&self) -> &'static str {
        match self {
            SqlValue::Null => "null",
            SqlValue::Int(_) => "integer",
            SqlValue::Float(_) => "float",
            SqlValue::Text(_) => "text",
            SqlValue::Other { .. } => "unsupported",
        }
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

/// One result row with its column names
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlRow {
    columns: Vec<String>,
    values: Vec<SqlValue>,
}

impl SqlRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column (builder style)
    pub fn with(mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.push(column, value);
        self
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<SqlValue>) {
        self.columns.push(column.into());
        self.values.push(value.into());
    }

    /// Value of the named column (case-insensitive, first match wins)
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(column))
            .map(|i| &self.values[i])
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Result of executing a non-query statement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    pub rows_affected: u64,
    /// Identifier generated by the store, if it reported one
    pub last_insert_id: Option<i64>,
}

/// Capability interface over a relational store.
///
/// Implementations must be safe to share between concurrent callers; the
/// repository adds no synchronization of its own.
#[async_trait]
pub trait SqlHandle: Send + Sync {
    /// Open a cursor over the rows of a parameterized query.
    ///
    /// Dropping the returned stream closes the cursor. A failure while
    /// iterating is yielded as an `Err` item.
    fn query<'a>(
        &'a self,
        sql: &'a str,
        args: Vec<SqlValue>,
    ) -> BoxStream<'a, Result<SqlRow, BoxError>>;

    /// Execute a parameterized statement that returns no rows.
    async fn exec(&self, sql: &str, args: Vec<SqlValue>) -> Result<ExecOutcome, BoxError>;
}
