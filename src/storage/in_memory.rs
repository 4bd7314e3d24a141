//! In-memory implementation of PaymentDataService for testing and development

use crate::core::{Logger, Payment, PaymentDataService, PaymentError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, Payment>,
    last_id: i64,
}

/// In-memory payment service implementation
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Ids are assigned from 1 upwards and `order_number` is kept unique, as the
/// SQL schema does.
#[derive(Clone, Default)]
pub struct InMemoryPaymentService {
    table: Arc<RwLock<Table>>,
    logger: Logger,
}

impl InMemoryPaymentService {
    /// Create a new in-memory payment service
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logger(logger: Logger) -> Self {
        Self {
            table: Arc::default(),
            logger,
        }
    }

    fn lock_error(operation: &'static str, e: impl std::fmt::Display) -> PaymentError {
        PaymentError::store(operation, format!("failed to acquire lock: {}", e))
    }
}

#[async_trait]
impl PaymentDataService for InMemoryPaymentService {
    async fn find(&self, id: i64) -> Result<Option<Payment>, PaymentError> {
        let table = self
            .table
            .read()
            .map_err(|e| Self::lock_error("query payment by id", e))?;

        Ok(table.rows.get(&id).cloned())
    }

    async fn find_by_order_number(
        &self,
        order_number: &str,
    ) -> Result<Option<Payment>, PaymentError> {
        let table = self
            .table
            .read()
            .map_err(|e| Self::lock_error("query payment by order number", e))?;

        Ok(table
            .rows
            .values()
            .find(|p| p.order_number == order_number)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Payment>, PaymentError> {
        let payments: Vec<Payment> = {
            let table = self
                .table
                .read()
                .map_err(|e| Self::lock_error("list payments", e))?;
            table.rows.values().cloned().collect()
        };

        self.logger.scope(|| {
            tracing::debug!(count = payments.len(), payments = ?payments, "found payment list")
        });

        Ok(payments)
    }

    async fn insert(&self, mut payment: Payment) -> Result<Payment, PaymentError> {
        let mut table = self
            .table
            .write()
            .map_err(|e| Self::lock_error("insert payment", e))?;

        if table
            .rows
            .values()
            .any(|p| p.order_number == payment.order_number)
        {
            return Err(PaymentError::store(
                "insert payment",
                format!("duplicate order number '{}'", payment.order_number),
            ));
        }

        table.last_id += 1;
        payment.id = table.last_id;
        table.rows.insert(payment.id, payment.clone());
        drop(table);

        self.logger.scope(|| {
            tracing::debug!(
                id = payment.id,
                order_number = %payment.order_number,
                "payment inserted"
            )
        });

        Ok(payment)
    }
}
