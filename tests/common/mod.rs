#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use sea_orm::{DbErr, TryIntoModel};
use uuid::Uuid;

use orders_api::entities::{order, order_item};
use orders_api::errors::ServiceError;
use orders_api::repositories::OrderStore;
use orders_api::unit_of_work::{StagedWrite, UnitOfWork};

/// In-memory [`OrderStore`] used to exercise the batch workflows without a
/// database. Inserts can be made to fail per customer or per product, and
/// the commit call itself can be failed, to drive the best-effort batch
/// policy through its branches.
#[derive(Default)]
pub struct MockOrderStore {
    committed_numbers: Mutex<Vec<String>>,
    committed_orders: Mutex<Vec<order::Model>>,
    committed_items: Mutex<Vec<order_item::Model>>,
    fail_customers: Mutex<HashSet<Uuid>>,
    fail_products: Mutex<HashSet<String>>,
    fail_commit: AtomicBool,
    commits: AtomicUsize,
}

impl MockOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds already-committed order numbers, as if earlier orders existed.
    pub fn with_numbers(numbers: &[&str]) -> Self {
        let store = Self::default();
        store
            .committed_numbers
            .lock()
            .unwrap()
            .extend(numbers.iter().map(|s| s.to_string()));
        store
    }

    pub fn fail_inserts_for_customer(&self, customer_id: Uuid) {
        self.fail_customers.lock().unwrap().insert(customer_id);
    }

    pub fn fail_inserts_for_product(&self, product_name: &str) {
        self.fail_products
            .lock()
            .unwrap()
            .insert(product_name.to_string());
    }

    pub fn fail_next_commit(&self) {
        self.fail_commit.store(true, Ordering::SeqCst);
    }

    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn committed_order_numbers(&self) -> Vec<String> {
        self.committed_numbers.lock().unwrap().clone()
    }

    pub fn committed_orders(&self) -> Vec<order::Model> {
        self.committed_orders.lock().unwrap().clone()
    }

    pub fn committed_items(&self) -> Vec<order_item::Model> {
        self.committed_items.lock().unwrap().clone()
    }

    fn record_order(&self, model: order::Model) {
        self.committed_numbers
            .lock()
            .unwrap()
            .push(model.order_number.clone());
        self.committed_orders.lock().unwrap().push(model);
    }

    fn record_item(&self, model: order_item::Model) {
        self.committed_items.lock().unwrap().push(model);
    }
}

#[async_trait]
impl OrderStore for MockOrderStore {
    async fn order_numbers_for_year(&self, year: i32) -> Result<Vec<String>, ServiceError> {
        let prefix = format!("{year}_");
        Ok(self
            .committed_numbers
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.starts_with(&prefix))
            .cloned()
            .collect())
    }

    async fn insert_order(
        &self,
        uow: &mut UnitOfWork,
        order: order::Model,
    ) -> Result<order::Model, ServiceError> {
        if self
            .fail_customers
            .lock()
            .unwrap()
            .contains(&order.customer_id)
        {
            return Err(ServiceError::DatabaseError(DbErr::Custom(
                "order insert rejected".to_string(),
            )));
        }

        if uow.is_started() {
            uow.stage(StagedWrite::Order(order.clone().into()))?;
        } else {
            self.record_order(order.clone());
        }
        Ok(order)
    }

    async fn insert_order_item(
        &self,
        uow: &mut UnitOfWork,
        item: order_item::Model,
    ) -> Result<order_item::Model, ServiceError> {
        if self
            .fail_products
            .lock()
            .unwrap()
            .contains(&item.product_name)
        {
            return Err(ServiceError::DatabaseError(DbErr::Custom(
                "order item insert rejected".to_string(),
            )));
        }

        if uow.is_started() {
            uow.stage(StagedWrite::OrderItem(item.clone().into()))?;
        } else {
            self.record_item(item.clone());
        }
        Ok(item)
    }

    async fn commit_batch(&self, mut uow: UnitOfWork) -> Result<u64, ServiceError> {
        self.commits.fetch_add(1, Ordering::SeqCst);

        if self.fail_commit.swap(false, Ordering::SeqCst) {
            return Err(ServiceError::DatabaseError(DbErr::Custom(
                "commit failed".to_string(),
            )));
        }

        let staged = uow.finish();
        let mut affected = 0u64;
        for write in staged {
            match write {
                StagedWrite::Order(active) => {
                    let model = active
                        .try_into_model()
                        .map_err(ServiceError::DatabaseError)?;
                    self.record_order(model);
                }
                StagedWrite::OrderItem(active) => {
                    let model = active
                        .try_into_model()
                        .map_err(ServiceError::DatabaseError)?;
                    self.record_item(model);
                }
            }
            affected += 1;
        }
        Ok(affected)
    }
}
