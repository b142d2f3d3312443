mod common;

use std::sync::Arc;

use uuid::Uuid;

use common::MockOrderStore;
use orders_api::services::order_item_batch::OrderItemBatchService;
use orders_api::services::order_items::CreateOrderItemRequest;

fn request(product_name: &str, quantity: i32, unit_price: i32) -> CreateOrderItemRequest {
    CreateOrderItemRequest {
        order_id: Uuid::new_v4(),
        product_name: product_name.to_string(),
        quantity,
        unit_price,
    }
}

#[tokio::test]
async fn batch_stages_items_and_commits_once_with_derived_totals() {
    let store = Arc::new(MockOrderStore::new());
    let service = OrderItemBatchService::new(store.clone());

    let responses = service
        .create_order_items(vec![request("keyboard", 2, 45), request("mouse", 3, 20)])
        .await
        .unwrap();

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0].total_price, 90);
    assert_eq!(responses[1].total_price, 60);

    assert_eq!(store.commit_count(), 1);
    assert_eq!(store.committed_items().len(), 2);
}

#[tokio::test]
async fn failed_item_is_skipped_but_the_batch_still_commits() {
    let store = Arc::new(MockOrderStore::new());
    let service = OrderItemBatchService::new(store.clone());
    store.fail_inserts_for_product("broken");

    let responses = service
        .create_order_items(vec![
            request("keyboard", 1, 50),
            request("broken", 1, 10),
            request("mouse", 2, 20),
        ])
        .await
        .unwrap();

    let names: Vec<&str> = responses.iter().map(|r| r.product_name.as_str()).collect();
    assert_eq!(names, vec!["keyboard", "mouse"]);
    assert_eq!(store.commit_count(), 1);
    assert_eq!(store.committed_items().len(), 2);
}

#[tokio::test]
async fn invalid_items_are_skipped_without_failing_the_batch() {
    let store = Arc::new(MockOrderStore::new());
    let service = OrderItemBatchService::new(store.clone());

    let responses = service
        .create_order_items(vec![
            request("keyboard", 1, 50),
            request("", 1, 10),   // empty product name
            request("mouse", 0, 20), // non-positive quantity
        ])
        .await
        .unwrap();

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].product_name, "keyboard");
    assert_eq!(store.committed_items().len(), 1);
}

#[tokio::test]
async fn empty_batch_returns_empty_and_never_commits() {
    let store = Arc::new(MockOrderStore::new());
    let service = OrderItemBatchService::new(store.clone());

    let responses = service.create_order_items(Vec::new()).await.unwrap();

    assert!(responses.is_empty());
    assert_eq!(store.commit_count(), 0);
}
