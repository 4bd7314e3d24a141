//! SQL-backed payment repository.
//!
//! `PaymentRepository<H>` issues four fixed, parameterized statements against
//! an injected [`SqlHandle`] and decodes the resulting rows into [`Payment`]
//! values. Any backend implementing `SqlHandle` can be plugged in.
//!
//! # Schema
//!
//! ```sql
//! payment (
//!     id               integer, auto-increment primary key
//!     source_account   text
//!     target_account   text
//!     amount           double
//!     payment_method   text
//!     status           text
//!     order_number     text, unique
//!     created_time     text, TIMESTAMP_FORMAT
//!     completion_time  text, TIMESTAMP_FORMAT, NULL while unset
//! )
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use payment_store::prelude::*;
//!
//! let repo = PaymentRepository::new(handle, Logger::global());
//! let saved = repo.insert(payment).await?;
//! assert!(repo.find(saved.id).await?.is_some());
//! ```

use crate::core::{
    Logger, Payment, PaymentDataService, PaymentError, SqlHandle, SqlRow, SqlValue,
    format_timestamp, parse_timestamp,
};
use async_trait::async_trait;
use futures::TryStreamExt;

/// Column list shared by every read, in declaration order.
pub const PAYMENT_COLUMNS: &str = "id, source_account, target_account, amount, payment_method, \
                                   status, order_number, created_time, completion_time";

pub const QUERY_PAYMENT_BY_ID: &str = "SELECT id, source_account, target_account, amount, \
    payment_method, status, order_number, created_time, completion_time \
    FROM payment WHERE id = ?";

pub const QUERY_PAYMENT_BY_ORDER_NUMBER: &str = "SELECT id, source_account, target_account, \
    amount, payment_method, status, order_number, created_time, completion_time \
    FROM payment WHERE order_number = ?";

pub const QUERY_PAYMENT: &str = "SELECT id, source_account, target_account, amount, \
    payment_method, status, order_number, created_time, completion_time FROM payment";

pub const INSERT_PAYMENT: &str = "INSERT INTO payment (source_account, target_account, amount, \
    payment_method, status, order_number, created_time, completion_time) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)";

/// Payment data access over any [`SqlHandle`]
#[derive(Clone, Debug)]
pub struct PaymentRepository<H> {
    handle: H,
    logger: Logger,
}

impl<H: SqlHandle> PaymentRepository<H> {
    pub fn new(handle: H, logger: Logger) -> Self {
        Self { handle, logger }
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Run a single-row lookup; extra rows are left unread.
    async fn fetch_first(
        &self,
        sql: &str,
        arg: SqlValue,
        operation: &'static str,
    ) -> Result<Option<Payment>, PaymentError> {
        let mut rows = self.handle.query(sql, vec![arg]);
        let first = rows
            .try_next()
            .await
            .map_err(|e| PaymentError::store(operation, e))?;

        match first {
            Some(row) => Ok(Some(row_to_payment(&row)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl<H: SqlHandle> PaymentDataService for PaymentRepository<H> {
    async fn find(&self, id: i64) -> Result<Option<Payment>, PaymentError> {
        self.logger.scope(|| tracing::trace!(id, "querying payment by id"));

        self.fetch_first(QUERY_PAYMENT_BY_ID, SqlValue::Int(id), "query payment by id")
            .await
    }

    async fn find_by_order_number(
        &self,
        order_number: &str,
    ) -> Result<Option<Payment>, PaymentError> {
        self.logger
            .scope(|| tracing::trace!(order_number, "querying payment by order number"));

        self.fetch_first(
            QUERY_PAYMENT_BY_ORDER_NUMBER,
            SqlValue::from(order_number),
            "query payment by order number",
        )
        .await
    }

    async fn find_all(&self) -> Result<Vec<Payment>, PaymentError> {
        self.logger.scope(|| tracing::trace!("querying all payments"));

        let mut rows = self.handle.query(QUERY_PAYMENT, Vec::new());
        let mut payments = Vec::new();

        while let Some(row) = rows
            .try_next()
            .await
            .map_err(|e| PaymentError::store("list payments", e))?
        {
            payments.push(row_to_payment(&row)?);
        }

        // The whole result set is logged; keep this at debug level.
        self.logger.scope(|| {
            tracing::debug!(count = payments.len(), payments = ?payments, "found payment list")
        });

        Ok(payments)
    }

    async fn insert(&self, mut payment: Payment) -> Result<Payment, PaymentError> {
        let args = vec![
            SqlValue::from(payment.source_account.as_str()),
            SqlValue::from(payment.target_account.as_str()),
            SqlValue::Float(payment.amount),
            SqlValue::from(payment.payment_method.as_str()),
            SqlValue::from(payment.status.as_str()),
            SqlValue::from(payment.order_number.as_str()),
            SqlValue::Text(format_timestamp(&payment.created_time)),
            SqlValue::from(payment.completion_time.as_ref().map(format_timestamp)),
        ];

        let outcome = self
            .handle
            .exec(INSERT_PAYMENT, args)
            .await
            .map_err(|e| PaymentError::store("insert payment", e))?;

        let id = match outcome.last_insert_id {
            Some(id) if id > 0 => id,
            Some(id) => {
                return Err(PaymentError::InsertId {
                    message: format!("store reported invalid id {}", id),
                });
            }
            None => {
                return Err(PaymentError::InsertId {
                    message: "store reported no id".to_string(),
                });
            }
        };

        payment.id = id;
        self.logger.scope(|| {
            tracing::debug!(id, order_number = %payment.order_number, "payment inserted")
        });

        Ok(payment)
    }
}

// ---------------------------------------------------------------------------
// Row decoding
// ---------------------------------------------------------------------------

/// Decode a row into a payment by column name.
///
/// Fails on the first missing or mistyped column and on any malformed
/// timestamp; no partially populated payment is ever returned.
pub fn row_to_payment(row: &SqlRow) -> Result<Payment, PaymentError> {
    let created_text = text_column(row, "created_time")?;
    let created_time = parse_timestamp(&created_text).map_err(|source| PaymentError::Timestamp {
        column: "created_time",
        value: created_text.clone(),
        source,
    })?;

    let completion_time = match column(row, "completion_time")? {
        SqlValue::Null => None,
        SqlValue::Text(text) if text.trim().is_empty() => None,
        SqlValue::Text(text) => Some(parse_timestamp(text).map_err(|source| {
            PaymentError::Timestamp {
                column: "completion_time",
                value: text.clone(),
                source,
            }
        })?),
        other => return Err(mismatch("completion_time", "text", other)),
    };

    Ok(Payment {
        id: int_column(row, "id")?,
        source_account: account_column(row, "source_account")?,
        target_account: account_column(row, "target_account")?,
        amount: float_column(row, "amount")?,
        payment_method: text_column(row, "payment_method")?,
        status: text_column(row, "status")?,
        order_number: text_column(row, "order_number")?,
        created_time,
        completion_time,
    })
}

fn column<'r>(row: &'r SqlRow, name: &str) -> Result<&'r SqlValue, PaymentError> {
    row.get(name).ok_or_else(|| {
        PaymentError::decode(name, format!("column missing from row ({} columns)", row.len()))
    })
}

fn mismatch(name: &str, expected: &str, found: &SqlValue) -> PaymentError {
    let found = match found {
        SqlValue::Other { type_name } => format!("unsupported type {}", type_name),
        other => other.kind().to_string(),
    };
    PaymentError::decode(name, format!("expected {}, found {}", expected, found))
}

fn int_column(row: &SqlRow, name: &str) -> Result<i64, PaymentError> {
    match column(row, name)? {
        SqlValue::Int(v) => Ok(*v),
        other => Err(mismatch(name, "integer", other)),
    }
}

fn float_column(row: &SqlRow, name: &str) -> Result<f64, PaymentError> {
    match column(row, name)? {
        SqlValue::Float(v) => Ok(*v),
        SqlValue::Int(v) => Ok(*v as f64),
        other => Err(mismatch(name, "number", other)),
    }
}

fn text_column(row: &SqlRow, name: &str) -> Result<String, PaymentError> {
    match column(row, name)? {
        SqlValue::Text(v) => Ok(v.clone()),
        other => Err(mismatch(name, "text", other)),
    }
}

/// Account identifiers are text in most schemas but may be numeric.
fn account_column(row: &SqlRow, name: &str) -> Result<String, PaymentError> {
    match column(row, name)? {
        SqlValue::Text(v) => Ok(v.clone()),
        SqlValue::Int(v) => Ok(v.to_string()),
        other => Err(mismatch(name, "text or integer", other)),
    }
}
