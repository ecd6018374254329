//! Macro-generated test suite for `DataService<Crew>` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use buildboard::storage::InMemoryDataService;
//!
//! data_service_tests!(InMemoryDataService::<Crew>::new());
//! ```
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_create_and_get`: create then retrieve, verify all fields
//! - `test_get_nonexistent`: unknown id returns None
//! - `test_list_preserves_insertion_order`
//! - `test_create_duplicate_id`: second insert fails with `DuplicateIdError`
//!
//! ## Merge patch
//! - `test_update_merges_fields`
//! - `test_update_nonexistent`: `NotFoundError`
//! - `test_update_rejects_bad_patches`: unknown field, immutable id, wrong type
//! - `test_update_does_not_affect_earlier_reads`
//!
//! ## Search & query
//! - `test_search_by_field`
//! - `test_query_runs_engine`
//!
//! ## Concurrency
//! - `test_concurrent_creates`

/// Generate a full `DataService<Crew>` conformance test suite.
///
/// `$factory` is re-evaluated for each test. For the concurrency test the
/// returned service must also be `Clone + 'static`.
#[macro_export]
macro_rules! data_service_tests {
    ($factory:expr) => {
        mod data_service_contract_tests {
            use super::*;
            use buildboard::core::entity::{Entity, Record};
            use buildboard::core::error::{BoardError, EntityError};
            use buildboard::core::field::FieldValue;
            use buildboard::core::filter::{FilterSet, FilterValue};
            use buildboard::core::query::{PageRequest, QueryRequest, SortSpec};
            use buildboard::core::service::DataService;
            use serde_json::json;

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let service = $factory;
                let crew = create_crew("crew-a", "Alice", 6, 4.5, true);

                let created = service.create(crew.clone()).await.unwrap();
                assert_eq!(created, crew);
                assert_eq!(created.entity_type(), "crew");

                let retrieved = service.get("crew-a").await.unwrap();
                assert_eq!(retrieved, Some(crew));
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let service = $factory;
                assert!(service.get("nope").await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_list_preserves_insertion_order() {
                let service = $factory;
                for crew in sample_crews(5).into_iter().rev() {
                    service.create(crew).await.unwrap();
                }

                let ids: Vec<String> = service
                    .list()
                    .await
                    .unwrap()
                    .iter()
                    .map(|c| c.id().to_string())
                    .collect();
                assert_eq!(ids, vec!["crew-4", "crew-3", "crew-2", "crew-1", "crew-0"]);
            }

            #[tokio::test]
            async fn test_create_duplicate_id() {
                let service = $factory;
                service
                    .create(create_crew("crew-a", "Alice", 6, 4.5, true))
                    .await
                    .unwrap();

                let err = service
                    .create(create_crew("crew-a", "Bob", 3, 3.0, false))
                    .await
                    .unwrap_err();
                assert_eq!(err.kind(), "DuplicateIdError");

                let kept = service.get("crew-a").await.unwrap().unwrap();
                assert_eq!(kept.foreman, "Alice");
            }

            // ==================================================================
            // Merge patch
            // ==================================================================

            #[tokio::test]
            async fn test_update_merges_fields() {
                let service = $factory;
                let crew = create_crew("crew-a", "Alice", 6, 4.5, true);
                service.create(crew.clone()).await.unwrap();

                let updated = service
                    .update("crew-a", json!({"size": 8, "notes": "night shift"}))
                    .await
                    .unwrap();
                assert_eq!(updated.size, 8);
                assert_eq!(updated.notes.as_deref(), Some("night shift"));
                assert_eq!(updated.foreman, "Alice");
                assert!(updated.updated_at() >= crew.updated_at());

                let stored = service.get("crew-a").await.unwrap().unwrap();
                assert_eq!(stored, updated);
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let service = $factory;
                let err = service
                    .update("ghost", json!({"size": 1}))
                    .await
                    .unwrap_err();
                assert!(matches!(
                    err,
                    BoardError::Entity(EntityError::NotFound { ref id, .. }) if id == "ghost"
                ));
            }

            #[tokio::test]
            async fn test_update_rejects_bad_patches() {
                let service = $factory;
                let crew = create_crew("crew-a", "Alice", 6, 4.5, true);
                service.create(crew.clone()).await.unwrap();

                for patch in [
                    json!({"colour": "blue"}),
                    json!({"id": "crew-b"}),
                    json!({"size": "large"}),
                    json!(["size", 4]),
                ] {
                    let err = service.update("crew-a", patch.clone()).await.unwrap_err();
                    assert_eq!(err.kind(), "InvalidPatchError", "patch {} was accepted", patch);
                }

                assert_eq!(service.get("crew-a").await.unwrap().unwrap(), crew);
            }

            #[tokio::test]
            async fn test_update_does_not_affect_earlier_reads() {
                let service = $factory;
                service
                    .create(create_crew("crew-a", "Alice", 6, 4.5, true))
                    .await
                    .unwrap();

                let before = service.get("crew-a").await.unwrap().unwrap();
                service
                    .update("crew-a", json!({"status": "inactive"}))
                    .await
                    .unwrap();
                assert_eq!(before.status(), "active");
            }

            // ==================================================================
            // Search & query
            // ==================================================================

            #[tokio::test]
            async fn test_search_by_field() {
                let service = $factory;
                for crew in sample_crews(6) {
                    service.create(crew).await.unwrap();
                }

                let insured = service
                    .search("insured", &FieldValue::Boolean(true))
                    .await
                    .unwrap();
                assert_eq!(insured.len(), 3);
                assert!(insured.iter().all(|c| c.insured));

                let none = service
                    .search("no_such_field", &FieldValue::Boolean(true))
                    .await
                    .unwrap();
                assert!(none.is_empty());
            }

            #[tokio::test]
            async fn test_query_runs_engine() {
                let service = $factory;
                for crew in sample_crews(6) {
                    service.create(crew).await.unwrap();
                }

                let request = QueryRequest::all()
                    .with_filters(FilterSet::new().with_filter("rating", FilterValue::at_least(3.5)))
                    .with_sort(SortSpec::desc("rating"))
                    .with_page(PageRequest::new(0, 2));
                let response = service.query(&request).await.unwrap();

                assert_eq!(response.total_count, 4);
                assert_eq!(response.items.len(), 2);
                assert_eq!(response.items[0].rating, 4.0);
                assert_eq!(response.items[0].name(), "Foreman 2 crew");
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_creates() {
                let service = $factory;
                let mut handles = Vec::new();

                for crew in sample_crews(20) {
                    let svc = service.clone();
                    handles.push(tokio::spawn(async move { svc.create(crew).await }));
                }

                for handle in handles {
                    handle.await.unwrap().unwrap();
                }

                assert_eq!(service.list().await.unwrap().len(), 20);
            }
        }
    };
}
