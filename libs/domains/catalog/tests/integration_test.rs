//! Integration tests for the catalog domain
//!
//! These tests drive the full dispatch → service → repository stack over the
//! in-memory store to ensure:
//! - The message patterns route to the right operations
//! - Soft-deleted products vanish from reads but stay in the store
//! - Pagination metadata stays consistent across pages
//! - Errors surface as structured catalog errors

use domain_catalog::*;

fn stack() -> (
    InMemoryProductRepository,
    CatalogDispatcher<InMemoryProductRepository>,
) {
    // The repository clone shares the same store as the one inside the
    // service, which lets tests inspect state behind the soft-delete filter.
    let repository = InMemoryProductRepository::new();
    let dispatcher = CatalogDispatcher::new(CatalogService::new(repository.clone()));
    (repository, dispatcher)
}

async fn create_product(
    dispatcher: &CatalogDispatcher<InMemoryProductRepository>,
    name: &str,
    price: f64,
) -> serde_json::Value {
    let payload = serde_json::json!({ "name": name, "price": price });
    dispatcher
        .dispatch(pattern::CREATE, &serde_json::to_vec(&payload).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_end_to_end_lifecycle() {
    let (_, dispatcher) = stack();

    // Create
    let created = create_product(&dispatcher, "A", 10.0).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["available"], true);

    // List shows the product
    let page = dispatcher
        .dispatch(pattern::FIND_ALL, br#"{"page": 1, "limit": 10}"#)
        .await
        .unwrap();
    assert_eq!(page["data"].as_array().unwrap().len(), 1);
    assert_eq!(page["data"][0]["id"], 1);
    assert_eq!(page["meta"]["total"], 1);
    assert_eq!(page["meta"]["page"], 1);
    assert_eq!(page["meta"]["lastPage"], 1);

    // Soft delete
    let removed = dispatcher
        .dispatch(pattern::REMOVE, br#"{"id": "1"}"#)
        .await
        .unwrap();
    assert_eq!(removed["available"], false);

    // Gone from single fetch
    let result = dispatcher.dispatch(pattern::FIND_ONE, br#"{"id": "1"}"#).await;
    assert!(matches!(result, Err(CatalogError::NotFound(1))));

    // Gone from listing and totals
    let page = dispatcher
        .dispatch(pattern::FIND_ALL, br#"{"page": 1, "limit": 10}"#)
        .await
        .unwrap();
    assert!(page["data"].as_array().unwrap().is_empty());
    assert_eq!(page["meta"]["total"], 0);
    assert_eq!(page["meta"]["lastPage"], 0);
}

#[tokio::test]
async fn test_pagination_walks_stable_id_order() {
    let (_, dispatcher) = stack();
    for i in 1..=5 {
        create_product(&dispatcher, &format!("Item {}", i), i as f64).await;
    }

    let ids_of = |page: &serde_json::Value| -> Vec<i64> {
        page["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_i64().unwrap())
            .collect()
    };

    let page1 = dispatcher
        .dispatch(pattern::FIND_ALL, br#"{"page": 1, "limit": 2}"#)
        .await
        .unwrap();
    assert_eq!(ids_of(&page1), vec![1, 2]);
    assert_eq!(page1["meta"]["total"], 5);
    assert_eq!(page1["meta"]["lastPage"], 3);

    let page2 = dispatcher
        .dispatch(pattern::FIND_ALL, br#"{"page": 2, "limit": 2}"#)
        .await
        .unwrap();
    assert_eq!(ids_of(&page2), vec![3, 4]);

    let page3 = dispatcher
        .dispatch(pattern::FIND_ALL, br#"{"page": 3, "limit": 2}"#)
        .await
        .unwrap();
    assert_eq!(ids_of(&page3), vec![5]);

    // Past the end: empty data, not an error
    let page4 = dispatcher
        .dispatch(pattern::FIND_ALL, br#"{"page": 4, "limit": 2}"#)
        .await
        .unwrap();
    assert!(page4["data"].as_array().unwrap().is_empty());
    assert_eq!(page4["meta"]["lastPage"], 3);
}

#[tokio::test]
async fn test_soft_deleted_products_drop_out_of_listings() {
    let (_, dispatcher) = stack();
    for name in ["First", "Second", "Third"] {
        create_product(&dispatcher, name, 1.0).await;
    }

    dispatcher
        .dispatch(pattern::REMOVE, br#"{"id": "2"}"#)
        .await
        .unwrap();

    let page = dispatcher
        .dispatch(pattern::FIND_ALL, br#"{"page": 1, "limit": 10}"#)
        .await
        .unwrap();
    let ids: Vec<i64> = page["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();

    assert_eq!(ids, vec![1, 3]);
    assert_eq!(page["meta"]["total"], 2);
}

#[tokio::test]
async fn test_update_leaves_unnamed_fields_alone() {
    let (_, dispatcher) = stack();
    create_product(&dispatcher, "Keyboard", 49.9).await;

    let updated = dispatcher
        .dispatch(pattern::UPDATE, br#"{"id": 1, "name": "Mechanical Keyboard"}"#)
        .await
        .unwrap();
    assert_eq!(updated["name"], "Mechanical Keyboard");
    assert_eq!(updated["price"], 49.9);
    assert_eq!(updated["available"], true);

    let updated = dispatcher
        .dispatch(pattern::UPDATE, br#"{"id": 1, "price": 59.9}"#)
        .await
        .unwrap();
    assert_eq!(updated["name"], "Mechanical Keyboard");
    assert_eq!(updated["price"], 59.9);
}

#[tokio::test]
async fn test_update_requires_an_active_product() {
    let (_, dispatcher) = stack();
    create_product(&dispatcher, "Keyboard", 49.9).await;

    dispatcher
        .dispatch(pattern::REMOVE, br#"{"id": "1"}"#)
        .await
        .unwrap();

    let result = dispatcher
        .dispatch(pattern::UPDATE, br#"{"id": 1, "price": 1.0}"#)
        .await;
    assert!(matches!(result, Err(CatalogError::NotFound(1))));

    let result = dispatcher
        .dispatch(pattern::UPDATE, br#"{"id": 99, "price": 1.0}"#)
        .await;
    assert!(matches!(result, Err(CatalogError::NotFound(99))));
}

#[tokio::test]
async fn test_remove_is_terminal_but_keeps_the_record() {
    let (repository, dispatcher) = stack();
    create_product(&dispatcher, "Keyboard", 49.9).await;

    dispatcher
        .dispatch(pattern::REMOVE, br#"{"id": "1"}"#)
        .await
        .unwrap();

    // Second remove fails: the record is already inactive
    let result = dispatcher.dispatch(pattern::REMOVE, br#"{"id": "1"}"#).await;
    assert!(matches!(result, Err(CatalogError::NotFound(1))));

    // The record itself is still in the store, still inactive
    let resurrected = repository
        .update(1, ProductChanges::default())
        .await
        .unwrap();
    assert_eq!(resurrected.name, "Keyboard");
    assert!(!resurrected.available);
}

#[tokio::test]
async fn test_create_with_explicit_availability_override() {
    let (_, dispatcher) = stack();

    let created = dispatcher
        .dispatch(
            pattern::CREATE,
            br#"{"name": "Hidden", "price": 5.0, "available": false}"#,
        )
        .await
        .unwrap();
    assert_eq!(created["available"], false);

    // Born soft-deleted: invisible to reads
    let result = dispatcher.dispatch(pattern::FIND_ONE, br#"{"id": "1"}"#).await;
    assert!(matches!(result, Err(CatalogError::NotFound(1))));

    let page = dispatcher
        .dispatch(pattern::FIND_ALL, br#"{}"#)
        .await
        .unwrap();
    assert_eq!(page["meta"]["total"], 0);
}
