//! The payment value object

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single row of the `payment` table.
///
/// `id` is assigned by the store on insert and is `0` until then.
/// `completion_time` stays `None` while the payment has not completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub source_account: String,
    pub target_account: String,
    pub amount: f64,
    pub payment_method: String,
    pub status: String,
    pub order_number: String,
    pub created_time: DateTime<Utc>,
    pub completion_time: Option<DateTime<Utc>>,
}

impl Payment {
    /// Build an unsaved payment (no id, no completion time).
    pub fn new(
        source_account: impl Into<String>,
        target_account: impl Into<String>,
        amount: f64,
        payment_method: impl Into<String>,
        status: impl Into<String>,
        order_number: impl Into<String>,
        created_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            source_account: source_account.into(),
            target_account: target_account.into(),
            amount,
            payment_method: payment_method.into(),
            status: status.into(),
            order_number: order_number.into(),
            created_time,
            completion_time: None,
        }
    }

    pub fn with_completion_time(mut self, completion_time: DateTime<Utc>) -> Self {
        self.completion_time = Some(completion_time);
        self
    }

    /// Whether the store has assigned an id to this payment
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}
