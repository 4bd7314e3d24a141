//! Storage implementations for different backends, and the wiring that
//! builds one from a [`StoreConfig`]

#[cfg(feature = "in-memory")]
pub mod in_memory;
#[cfg(feature = "mysql")]
pub mod mysql;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "in-memory")]
pub use in_memory::InMemoryPaymentService;
#[cfg(feature = "mysql")]
pub use mysql::MysqlHandle;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteHandle;

use crate::config::{Backend, StoreConfig};
use crate::core::{ConfigError, Logger, PaymentDataService};
#[cfg(any(feature = "mysql", feature = "sqlite"))]
use crate::repository::PaymentRepository;
#[cfg(any(feature = "mysql", feature = "sqlite"))]
use anyhow::Context;
use anyhow::Result;
use std::sync::Arc;

/// Build the payment service described by `config`.
///
/// SQL backends get a connection pool sized and timed out per the config,
/// and the `payment` table is created first when `ensure_schema` is set.
#[allow(unreachable_patterns)]
pub async fn open_payment_service(
    config: &StoreConfig,
    logger: Logger,
) -> Result<Arc<dyn PaymentDataService>> {
    config.validate()?;

    logger.scope(|| tracing::info!(backend = %config.backend, "opening payment store"));

    match config.backend {
        #[cfg(feature = "in-memory")]
        Backend::InMemory => Ok(Arc::new(InMemoryPaymentService::with_logger(logger))),

        #[cfg(feature = "sqlite")]
        Backend::Sqlite => {
            let pool = sqlx::sqlite::SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .acquire_timeout(config.acquire_timeout())
                .connect(config.url.as_deref().unwrap_or_default())
                .await
                .context("Failed to connect to SQLite")?;
            if config.ensure_schema {
                sqlite::ensure_schema(&pool).await?;
            }
            Ok(Arc::new(PaymentRepository::new(SqliteHandle::new(pool), logger)))
        }

        #[cfg(feature = "mysql")]
        Backend::Mysql => {
            let pool = sqlx::mysql::MySqlPoolOptions::new()
                .max_connections(config.max_connections)
                .acquire_timeout(config.acquire_timeout())
                .connect(config.url.as_deref().unwrap_or_default())
                .await
                .context("Failed to connect to MySQL")?;
            if config.ensure_schema {
                mysql::ensure_schema(&pool).await?;
            }
            Ok(Arc::new(PaymentRepository::new(MysqlHandle::new(pool), logger)))
        }

        other => {
            let _ = logger;
            Err(ConfigError::BackendDisabled {
                backend: other.to_string(),
                feature: other.feature(),
            }
            .into())
        }
    }
}
