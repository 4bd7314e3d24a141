//! Typed error handling for payment storage
//!
//! Every failure coming out of a store, a row decoder or the timestamp parser
//! is wrapped at its point of origin into a [`PaymentError`] variant, so that
//! callers can branch on the kind of failure rather than on message text.
//!
//! # Example
//!
//! ```rust,ignore
//! use payment_store::prelude::*;
//!
//! match service.find_existing(42).await {
//!     Ok(payment) => println!("found {}", payment.order_number),
//!     Err(PaymentError::NotFound { key }) => println!("{} does not exist", key),
//!     Err(e) => eprintln!("storage failure [{}]: {}", e.error_code(), e),
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Boxed error produced by a store handle
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Key a payment was looked up by
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentKey {
    Id(i64),
    OrderNumber(String),
}

impl fmt::Display for PaymentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentKey::Id(id) => write!(f, "payment id {}", id),
            PaymentKey::OrderNumber(number) => write!(f, "order number '{}'", number),
        }
    }
}

/// Errors raised by [`PaymentDataService`](crate::core::PaymentDataService) implementations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The store rejected or failed a statement (connection, syntax, execution,
    /// cursor failure, constraint violation)
    #[error("Failed to {operation}: {source}")]
    Store {
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    /// A row did not have the expected shape
    #[error("Failed to decode column '{column}': {message}")]
    Decode { column: String, message: String },

    /// A timestamp column held text that does not match the timestamp format
    #[error("Malformed timestamp '{value}' in column '{column}': {source}")]
    Timestamp {
        column: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The store did not report an identifier for an inserted payment
    #[error("Failed to retrieve id of inserted payment: {message}")]
    InsertId { message: String },

    /// Only produced by lookups that treat absence as an error
    #[error("Payment with {key} not found")]
    NotFound { key: PaymentKey },
}

impl PaymentError {
    pub fn store(operation: &'static str, source: impl Into<BoxError>) -> Self {
        PaymentError::Store {
            operation,
            source: source.into(),
        }
    }

    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            PaymentError::Store { .. } => "PAYMENT_STORE_ERROR",
            PaymentError::Decode { .. } => "PAYMENT_DECODE_ERROR",
            PaymentError::Timestamp { .. } => "PAYMENT_TIMESTAMP_ERROR",
            PaymentError::InsertId { .. } => "PAYMENT_INSERT_ID_ERROR",
            PaymentError::NotFound { .. } => "PAYMENT_NOT_FOUND",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PaymentError::NotFound { .. })
    }
}

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error while reading configuration
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Invalid value in configuration
    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// The configured backend was not compiled in
    #[error("Storage backend '{backend}' is not enabled; rebuild with feature '{feature}'")]
    BackendDisabled {
        backend: String,
        feature: &'static str,
    },
}
