mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{Datelike, Utc};
use uuid::Uuid;

use common::MockOrderStore;
use orders_api::errors::ServiceError;
use orders_api::sequence::{format_order_number, OrderNumberAllocator};
use orders_api::services::order_batch::OrderBatchService;
use orders_api::services::orders::CreateOrderRequest;

fn service_with(store: Arc<MockOrderStore>) -> OrderBatchService {
    OrderBatchService::new(store, Arc::new(OrderNumberAllocator::new()))
}

fn request(total_amount: i32) -> CreateOrderRequest {
    CreateOrderRequest {
        customer_id: Uuid::new_v4(),
        total_amount,
    }
}

#[tokio::test]
async fn batch_assigns_sequential_numbers_from_one_reservation() {
    let year = Utc::now().year();
    let store = Arc::new(MockOrderStore::with_numbers(&[&format_order_number(
        year, 4,
    )]));
    let service = service_with(store.clone());

    let responses = service
        .create_orders(vec![request(10), request(20), request(30)])
        .await
        .unwrap();

    let numbers: Vec<String> = responses.iter().map(|r| r.order_number.clone()).collect();
    assert_eq!(
        numbers,
        vec![
            format_order_number(year, 5),
            format_order_number(year, 6),
            format_order_number(year, 7),
        ]
    );
    // Results come back in input order.
    let amounts: Vec<i32> = responses.iter().map(|r| r.total_amount).collect();
    assert_eq!(amounts, vec![10, 20, 30]);

    assert_eq!(store.commit_count(), 1);
    assert_eq!(store.committed_orders().len(), 3);
}

#[tokio::test]
async fn empty_batch_returns_empty_and_never_commits() {
    let store = Arc::new(MockOrderStore::new());
    let service = service_with(store.clone());

    let responses = service.create_orders(Vec::new()).await.unwrap();

    assert!(responses.is_empty());
    assert_eq!(store.commit_count(), 0);
}

#[tokio::test]
async fn failed_staging_is_skipped_but_the_batch_still_commits() {
    let year = Utc::now().year();
    let store = Arc::new(MockOrderStore::new());
    let service = service_with(store.clone());

    let doomed = request(20);
    store.fail_inserts_for_customer(doomed.customer_id);

    let responses = service
        .create_orders(vec![request(10), doomed, request(30)])
        .await
        .unwrap();

    // Only the two successful orders come back, in input order.
    let amounts: Vec<i32> = responses.iter().map(|r| r.total_amount).collect();
    assert_eq!(amounts, vec![10, 30]);

    // The failed request still consumed its slot in the sequence run.
    let numbers: Vec<String> = responses.iter().map(|r| r.order_number.clone()).collect();
    assert_eq!(
        numbers,
        vec![format_order_number(year, 1), format_order_number(year, 3)]
    );

    assert_eq!(store.commit_count(), 1);
    assert_eq!(store.committed_orders().len(), 2);
}

#[tokio::test]
async fn commit_failure_is_surfaced_to_the_caller() {
    let store = Arc::new(MockOrderStore::new());
    let service = service_with(store.clone());
    store.fail_next_commit();

    let result = service.create_orders(vec![request(10)]).await;

    assert_matches!(result, Err(ServiceError::DatabaseError(_)));
    // Nothing became visible.
    assert!(store.committed_orders().is_empty());
}

#[tokio::test]
async fn concurrent_batches_never_produce_duplicate_numbers() {
    let store = Arc::new(MockOrderStore::new());
    let service = Arc::new(service_with(store.clone()));

    let callers = 4;
    let orders_per_caller = 5;

    let mut handles = Vec::new();
    for _ in 0..callers {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            let requests = (0..orders_per_caller).map(|i| request(i + 1)).collect();
            service.create_orders(requests).await.unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let mut numbers = store.committed_order_numbers();
    assert_eq!(numbers.len(), callers * orders_per_caller as usize);
    numbers.sort();
    numbers.dedup();
    assert_eq!(
        numbers.len(),
        callers * orders_per_caller as usize,
        "duplicate order numbers were committed"
    );
}
