//! Core module containing the payment model, the data-access contract and
//! the store capability it is built on

pub mod error;
pub mod handle;
pub mod logging;
pub mod payment;
pub mod service;
pub mod timestamp;

pub use error::{BoxError, ConfigError, PaymentError, PaymentKey};
pub use handle::{ExecOutcome, SqlHandle, SqlRow, SqlValue};
pub use logging::Logger;
pub use payment::Payment;
pub use service::PaymentDataService;
pub use timestamp::{TIMESTAMP_FORMAT, format_timestamp, parse_timestamp};
