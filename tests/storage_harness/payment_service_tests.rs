//! Macro-generated test suite for `PaymentDataService` contract validation.
//!
//! The `payment_service_tests!` macro generates a test module that validates
//! any `PaymentDataService` implementation against the full contract:
//! lookups, scans, inserts, absence handling and concurrent access.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use payment_store::storage::InMemoryPaymentService;
//!
//! payment_service_tests!(InMemoryPaymentService::new());
//! ```
//!
//! # Generated Tests
//!
//! ## Lookups
//! - `test_find_missing_returns_none`: unknown id yields `Ok(None)`
//! - `test_find_by_order_number_missing_returns_none`
//! - `test_find_existing_missing_is_not_found`: absence as a typed error
//!
//! ## Insert
//! - `test_insert_assigns_nonzero_id`
//! - `test_insert_then_find_round_trip`: every field survives the store
//! - `test_insert_then_find_by_order_number`
//! - `test_completion_time_round_trip`
//! - `test_duplicate_order_number_rejected`
//!
//! ## Scan
//! - `test_find_all_empty`
//! - `test_find_all_returns_every_row`
//!
//! ## Edge Cases
//! - `test_concurrent_inserts`: parallel inserts from spawned tasks

/// Generate a full `PaymentDataService` conformance test suite.
///
/// `$factory` must be an expression that evaluates to a fresh, empty
/// `PaymentDataService + 'static`. It is re-evaluated for each test to
/// ensure isolation.
#[macro_export]
macro_rules! payment_service_tests {
    ($factory:expr) => {
        mod payment_service_contract_tests {
            use super::*;
            use payment_store::core::{Payment, PaymentDataService, PaymentError, PaymentKey};
            use std::sync::Arc;

            // ==================================================================
            // Lookups
            // ==================================================================

            #[tokio::test]
            async fn test_find_missing_returns_none() {
                let service = $factory;

                let result = service.find(999_999).await.unwrap();
                assert!(result.is_none(), "Unknown id should return None");
            }

            #[tokio::test]
            async fn test_find_by_order_number_missing_returns_none() {
                let service = $factory;
                service.insert(sample_payment("ORD-1")).await.unwrap();

                let result = service.find_by_order_number("ORD-404").await.unwrap();
                assert!(result.is_none());
            }

            #[tokio::test]
            async fn test_find_existing_missing_is_not_found() {
                let service = $factory;

                match service.find_existing(424_242).await {
                    Err(PaymentError::NotFound { key }) => {
                        assert_eq!(key, PaymentKey::Id(424_242))
                    }
                    other => panic!("Expected NotFound, got {:?}", other),
                }
            }

            // ==================================================================
            // Insert
            // ==================================================================

            #[tokio::test]
            async fn test_insert_assigns_nonzero_id() {
                let service = $factory;

                let saved = service.insert(sample_payment("ORD-1")).await.unwrap();
                assert_ne!(saved.id, 0, "Inserted payment should carry its new id");
                assert!(saved.is_persisted());
                assert_eq!(saved.order_number, "ORD-1");
            }

            #[tokio::test]
            async fn test_insert_then_find_round_trip() {
                let service = $factory;
                let original = sample_payment("ORD-1");

                let saved = service.insert(original.clone()).await.unwrap();
                let found = service
                    .find(saved.id)
                    .await
                    .unwrap()
                    .expect("Inserted payment should be found by id");

                assert_eq!(found, saved);
                assert_eq!(
                    Payment { id: 0, ..found },
                    original,
                    "Every field except id should match the input"
                );
            }

            #[tokio::test]
            async fn test_insert_then_find_by_order_number() {
                let service = $factory;
                let saved = service.insert(sample_payment("ORD-1")).await.unwrap();
                service.insert(sample_payment("ORD-2")).await.unwrap();

                let found = service
                    .find_by_order_number("ORD-1")
                    .await
                    .unwrap()
                    .expect("Payment should be found by order number");

                assert_eq!(found.id, saved.id);
                assert_eq!(found.source_account, "A1");
                assert_eq!(found.target_account, "A2");
                assert!((found.amount - 100.00).abs() < f64::EPSILON);
                assert_eq!(found.payment_method, "CARD");
                assert_eq!(found.status, "PENDING");
                assert_eq!(found.created_time, t0());
            }

            #[tokio::test]
            async fn test_completion_time_round_trip() {
                let service = $factory;
                let original = completed_payment("ORD-DONE");

                let saved = service.insert(original.clone()).await.unwrap();
                let found = service.find_existing(saved.id).await.unwrap();

                assert_eq!(found.completion_time, original.completion_time);
                assert_eq!(found.status, "COMPLETED");
            }

            #[tokio::test]
            async fn test_duplicate_order_number_rejected() {
                let service = $factory;
                service.insert(sample_payment("ORD-1")).await.unwrap();

                let err = service.insert(sample_payment("ORD-1")).await.unwrap_err();
                assert!(
                    matches!(err, PaymentError::Store { .. }),
                    "Duplicate order number should be a store error, got {:?}",
                    err
                );
                assert_eq!(service.find_all().await.unwrap().len(), 1);
            }

            // ==================================================================
            // Scan
            // ==================================================================

            #[tokio::test]
            async fn test_find_all_empty() {
                let service = $factory;

                let all = service.find_all().await.unwrap();
                assert!(all.is_empty(), "Empty store should return an empty vec");
            }

            #[tokio::test]
            async fn test_find_all_returns_every_row() {
                let service = $factory;
                let mut expected_ids = Vec::new();

                for i in 0..5 {
                    let saved = service
                        .insert(sample_payment(&format!("ORD-{}", i)))
                        .await
                        .unwrap();
                    expected_ids.push(saved.id);
                }

                let all = service.find_all().await.unwrap();
                assert_eq!(all.len(), 5, "Scan should return all 5 payments");

                let mut returned_ids: Vec<i64> = all.iter().map(|p| p.id).collect();
                returned_ids.sort();
                expected_ids.sort();
                assert_eq!(returned_ids, expected_ids);
            }

            // ==================================================================
            // Edge Cases
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_inserts() {
                let service = Arc::new($factory);
                let s1 = service.clone();
                let s2 = service.clone();

                let h1 = tokio::spawn(async move { s1.insert(sample_payment("ORD-A")).await });
                let h2 = tokio::spawn(async move { s2.insert(sample_payment("ORD-B")).await });

                let (r1, r2) = tokio::time::timeout(std::time::Duration::from_secs(30), async {
                    tokio::try_join!(h1, h2).unwrap()
                })
                .await
                .expect("Concurrent inserts timed out after 30s: possible deadlock");

                let id1 = r1.unwrap().id;
                let id2 = r2.unwrap().id;
                assert_ne!(id1, id2, "Each insert should get its own id");

                let all = service.find_all().await.unwrap();
                assert_eq!(all.len(), 2, "Both concurrent inserts should be present");
            }
        }
    };
}
