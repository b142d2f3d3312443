pub mod country_repository;
pub mod customer_repository;
pub mod order_item_repository;
pub mod order_item_review_repository;
pub mod order_repository;
pub mod store;

use async_trait::async_trait;

use crate::entities::{order, order_item};
use crate::errors::ServiceError;
use crate::unit_of_work::UnitOfWork;

pub use store::SeaOrmOrderStore;

/// Persistence boundary consumed by the order creation workflows.
///
/// Inserts honour the caller's [`UnitOfWork`]: while it is batching they are
/// staged, otherwise they commit immediately. `commit_batch` flushes every
/// staged write in one transaction and consumes the unit of work.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Order numbers of every order placed in `year`.
    async fn order_numbers_for_year(&self, year: i32) -> Result<Vec<String>, ServiceError>;

    async fn insert_order(
        &self,
        uow: &mut UnitOfWork,
        order: order::Model,
    ) -> Result<order::Model, ServiceError>;

    async fn insert_order_item(
        &self,
        uow: &mut UnitOfWork,
        item: order_item::Model,
    ) -> Result<order_item::Model, ServiceError>;

    /// Flushes all staged writes atomically and returns how many landed.
    async fn commit_batch(&self, uow: UnitOfWork) -> Result<u64, ServiceError>;
}
