pub mod countries;
pub mod customers;
pub mod order_batch;
pub mod order_item_batch;
pub mod order_items;
pub mod orders;
pub mod reviews;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::repositories::{
    country_repository::CountryRepository, customer_repository::CustomerRepository,
    order_item_repository::OrderItemRepository,
    order_item_review_repository::OrderItemReviewRepository, order_repository::OrderRepository,
    SeaOrmOrderStore,
};
use crate::sequence::OrderNumberAllocator;

/// Service set shared by the HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub orders: Arc<orders::OrderService>,
    pub order_batches: Arc<order_batch::OrderBatchService>,
    pub order_items: Arc<order_items::OrderItemService>,
    pub order_item_batches: Arc<order_item_batch::OrderItemBatchService>,
    pub reviews: Arc<reviews::OrderItemReviewService>,
    pub customers: Arc<customers::CustomerService>,
    pub countries: Arc<countries::CountryService>,
}

impl AppServices {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        let store = Arc::new(SeaOrmOrderStore::new(db.clone()));
        // One allocator for the whole process; sharing it is what makes
        // sequence reservation race-free across concurrent requests.
        let allocator = Arc::new(OrderNumberAllocator::new());

        let order_repository = OrderRepository::new(db.clone());
        let item_repository = OrderItemRepository::new(db.clone());
        let review_repository = OrderItemReviewRepository::new(db.clone());
        let customer_repository = CustomerRepository::new(db.clone());
        let country_repository = CountryRepository::new(db.clone());

        Self {
            orders: Arc::new(orders::OrderService::new(
                store.clone(),
                allocator.clone(),
                order_repository,
            )),
            order_batches: Arc::new(order_batch::OrderBatchService::new(
                store.clone(),
                allocator,
            )),
            order_items: Arc::new(order_items::OrderItemService::new(
                store.clone(),
                item_repository.clone(),
            )),
            order_item_batches: Arc::new(order_item_batch::OrderItemBatchService::new(store)),
            reviews: Arc::new(reviews::OrderItemReviewService::new(
                review_repository,
                item_repository,
            )),
            customers: Arc::new(customers::CustomerService::new(
                customer_repository,
                country_repository.clone(),
            )),
            countries: Arc::new(countries::CountryService::new(country_repository)),
        }
    }
}
