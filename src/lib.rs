//! # payment-store
//!
//! Data-access layer for a single `payment` table.
//!
//! ## Features
//!
//! - **Four fixed operations**: find by id, find by order number, find all, insert
//! - **Pluggable stores**: the repository runs on any [`SqlHandle`](core::SqlHandle)
//!   (MySQL and SQLite via sqlx, or a test fake)
//! - **Typed errors**: callers branch on [`PaymentError`](core::PaymentError) kinds
//! - **Injected logging**: every component logs through a [`Logger`](core::Logger)
//!   handed to it, never through hidden global state
//! - **In-memory backend** for tests and development
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use payment_store::prelude::*;
//!
//! let config = StoreConfig::from_yaml_file("payment-store.yaml")?;
//! init_tracing(&config.log_level);
//! let payments = open_payment_service(&config, Logger::global()).await?;
//!
//! let saved = payments
//!     .insert(Payment::new("A1", "A2", 100.0, "CARD", "PENDING", "ORD-1", Utc::now()))
//!     .await?;
//! let found = payments.find_by_order_number("ORD-1").await?;
//! assert_eq!(found.map(|p| p.id), Some(saved.id));
//! ```

pub mod config;
pub mod core;
pub mod repository;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        BoxError, ConfigError, ExecOutcome, Logger, Payment, PaymentDataService, PaymentError,
        PaymentKey, SqlHandle, SqlRow, SqlValue, TIMESTAMP_FORMAT, format_timestamp,
        logging::init_tracing, parse_timestamp,
    };

    // === Repository ===
    pub use crate::repository::PaymentRepository;

    // === Storage ===
    pub use crate::storage::open_payment_service;
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryPaymentService;
    #[cfg(feature = "mysql")]
    pub use crate::storage::MysqlHandle;
    #[cfg(feature = "sqlite")]
    pub use crate::storage::SqliteHandle;

    // === Config ===
    pub use crate::config::{Backend, StoreConfig};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
}
