//! Service trait for payment data access

use crate::core::error::{PaymentError, PaymentKey};
use crate::core::payment::Payment;
use async_trait::async_trait;

/// Data-access contract for payments
///
/// Implementations provide the four fixed operations against a single
/// payment store. Absence is reported as `Ok(None)`, never as an error.
#[async_trait]
pub trait PaymentDataService: Send + Sync {
    /// Get a payment by its primary key
    async fn find(&self, id: i64) -> Result<Option<Payment>, PaymentError>;

    /// Get a payment by its order number
    ///
    /// If several payments share the order number, only the first one the
    /// store yields is returned.
    async fn find_by_order_number(
        &self,
        order_number: &str,
    ) -> Result<Option<Payment>, PaymentError>;

    /// List every payment (unfiltered, unpaginated)
    async fn find_all(&self) -> Result<Vec<Payment>, PaymentError>;

    /// Store a new payment and return it with its assigned id
    ///
    /// Every field except `id` must be filled in by the caller; timestamps
    /// are stored as given.
    async fn insert(&self, payment: Payment) -> Result<Payment, PaymentError>;

    /// Get a payment by id, treating absence as [`PaymentError::NotFound`]
    async fn find_existing(&self, id: i64) -> Result<Payment, PaymentError> {
        self.find(id).await?.ok_or(PaymentError::NotFound {
            key: PaymentKey::Id(id),
        })
    }
}
