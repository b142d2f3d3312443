use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::entities::order_item;
use crate::errors::ServiceError;
use crate::repositories::OrderStore;
use crate::services::order_items::{
    derived_total_price, CreateOrderItemRequest, OrderItemResponse,
};
use crate::unit_of_work::UnitOfWork;

/// Batched order item creation: stage everything, commit once.
/// Items that fail to stage are skipped, not fatal to the batch.
pub struct OrderItemBatchService {
    store: Arc<dyn OrderStore>,
}

impl OrderItemBatchService {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self, requests), fields(batch_size = requests.len()))]
    pub async fn create_order_items(
        &self,
        requests: Vec<CreateOrderItemRequest>,
    ) -> Result<Vec<OrderItemResponse>, ServiceError> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let mut uow = UnitOfWork::new();
        uow.start()?;

        let mut created = Vec::with_capacity(requests.len());
        for (index, request) in requests.into_iter().enumerate() {
            if let Err(err) = request.validate() {
                warn!(index, %err, "skipping invalid order item request in batch");
                continue;
            }

            let total_price = match derived_total_price(request.quantity, request.unit_price) {
                Ok(total) => total,
                Err(err) => {
                    warn!(index, %err, "skipping order item with out-of-range total");
                    continue;
                }
            };

            let model = order_item::Model {
                id: Uuid::new_v4(),
                order_id: request.order_id,
                product_name: request.product_name,
                quantity: request.quantity,
                unit_price: request.unit_price,
                total_price,
            };

            match self.store.insert_order_item(&mut uow, model).await {
                Ok(staged) => created.push(staged),
                Err(err) => {
                    warn!(index, %err, "skipping order item that failed to stage");
                }
            }
        }

        self.store.commit_batch(uow).await?;

        info!(created = created.len(), "order item batch committed");
        Ok(created.into_iter().map(OrderItemResponse::from).collect())
    }
}
