use std::sync::Arc;

use chrono::{Datelike, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::entities::order;
use crate::errors::ServiceError;
use crate::repositories::OrderStore;
use crate::sequence::{format_order_number, OrderNumberAllocator};
use crate::services::orders::{CreateOrderRequest, OrderResponse};
use crate::unit_of_work::UnitOfWork;

/// Creates whole batches of orders in a single deferred commit.
///
/// The sequence run for the batch is reserved once, before the loop; each
/// order takes `base + index` so no per-item store round-trip is needed.
/// Individual staging failures are skipped (best-effort batch); the commit
/// at the end covers whatever was staged.
pub struct OrderBatchService {
    store: Arc<dyn OrderStore>,
    allocator: Arc<OrderNumberAllocator>,
}

impl OrderBatchService {
    pub fn new(store: Arc<dyn OrderStore>, allocator: Arc<OrderNumberAllocator>) -> Self {
        Self { store, allocator }
    }

    #[instrument(skip(self, requests), fields(batch_size = requests.len()))]
    pub async fn create_orders(
        &self,
        requests: Vec<CreateOrderRequest>,
    ) -> Result<Vec<OrderResponse>, ServiceError> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let mut uow = UnitOfWork::new();
        uow.start()?;

        let now = Utc::now();
        let year = now.year();
        let base = self
            .allocator
            .reserve(self.store.as_ref(), year, requests.len() as u32)
            .await?;

        let mut created = Vec::with_capacity(requests.len());
        for (index, request) in requests.into_iter().enumerate() {
            // A skipped request still consumes its position in the run.
            let sequence = base + index as u32;

            if let Err(err) = request.validate() {
                warn!(index, %err, "skipping invalid order request in batch");
                continue;
            }

            let model = order::Model {
                id: Uuid::new_v4(),
                order_number: format_order_number(year, sequence),
                customer_id: request.customer_id,
                order_date: now,
                total_amount: request.total_amount,
            };

            match self.store.insert_order(&mut uow, model).await {
                Ok(staged) => created.push(staged),
                Err(err) => {
                    warn!(index, %err, "skipping order that failed to stage");
                }
            }
        }

        self.store.commit_batch(uow).await?;

        info!(created = created.len(), "order batch committed");
        Ok(created.into_iter().map(OrderResponse::from).collect())
    }
}
