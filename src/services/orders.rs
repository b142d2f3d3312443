use std::sync::Arc;

use chrono::{Datelike, DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::entities::order;
use crate::errors::ServiceError;
use crate::repositories::{order_repository::OrderRepository, OrderStore};
use crate::sequence::{format_order_number, OrderNumberAllocator};
use crate::unit_of_work::UnitOfWork;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub customer_id: Uuid,
    #[validate(range(min = 1, message = "Total amount must be a positive number"))]
    pub total_amount: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateOrderRequest {
    pub order_id: Uuid,
    pub customer_id: Uuid,
    #[validate(range(min = 1, message = "Total amount must be a positive number"))]
    pub total_amount: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub order_number: String,
    pub customer_id: Uuid,
    pub order_date: DateTime<Utc>,
    pub total_amount: i32,
}

impl From<order::Model> for OrderResponse {
    fn from(model: order::Model) -> Self {
        Self {
            id: model.id,
            order_number: model.order_number,
            customer_id: model.customer_id,
            order_date: model.order_date,
            total_amount: model.total_amount,
        }
    }
}

/// Single-order CRUD on top of the store and repository.
pub struct OrderService {
    store: Arc<dyn OrderStore>,
    allocator: Arc<OrderNumberAllocator>,
    repository: OrderRepository,
}

impl OrderService {
    pub fn new(
        store: Arc<dyn OrderStore>,
        allocator: Arc<OrderNumberAllocator>,
        repository: OrderRepository,
    ) -> Self {
        Self {
            store,
            allocator,
            repository,
        }
    }

    /// Creates one order with a freshly allocated order number. The unit of
    /// work stays idle, so the insert commits immediately.
    #[instrument(skip(self, request), fields(customer_id = %request.customer_id))]
    pub async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<OrderResponse, ServiceError> {
        request.validate()?;

        let now = Utc::now();
        let year = now.year();
        let sequence = self
            .allocator
            .next_sequence(self.store.as_ref(), year)
            .await?;

        let model = order::Model {
            id: Uuid::new_v4(),
            order_number: format_order_number(year, sequence),
            customer_id: request.customer_id,
            order_date: now,
            total_amount: request.total_amount,
        };

        let mut uow = UnitOfWork::new();
        let inserted = self.store.insert_order(&mut uow, model).await?;

        info!(order_id = %inserted.id, order_number = %inserted.order_number, "order created");
        Ok(inserted.into())
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: Uuid) -> Result<Option<OrderResponse>, ServiceError> {
        let order = self.repository.find_by_id(order_id).await?;
        Ok(order.map(OrderResponse::from))
    }

    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<OrderResponse>, ServiceError> {
        let orders = self.repository.find_all().await?;
        Ok(orders.into_iter().map(OrderResponse::from).collect())
    }

    /// Full replace of the mutable fields; the order number never changes.
    #[instrument(skip(self, request), fields(order_id = %request.order_id))]
    pub async fn update_order(
        &self,
        request: UpdateOrderRequest,
    ) -> Result<OrderResponse, ServiceError> {
        request.validate()?;

        let updated = self
            .repository
            .update(request.order_id, request.customer_id, request.total_amount)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Order {} not found", request.order_id))
            })?;

        info!(order_id = %updated.id, "order updated");
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_order(&self, order_id: Uuid) -> Result<(), ServiceError> {
        let deleted = self.repository.delete(order_id).await?;
        if !deleted {
            return Err(ServiceError::NotFound(format!(
                "Order {order_id} not found"
            )));
        }
        info!(order_id = %order_id, "order deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_mirrors_the_model() {
        let model = order::Model {
            id: Uuid::new_v4(),
            order_number: "2024_12".to_string(),
            customer_id: Uuid::new_v4(),
            order_date: Utc::now(),
            total_amount: 250,
        };

        let response = OrderResponse::from(model.clone());
        assert_eq!(response.id, model.id);
        assert_eq!(response.order_number, "2024_12");
        assert_eq!(response.total_amount, 250);
    }

    #[test]
    fn create_request_rejects_non_positive_amounts() {
        let request = CreateOrderRequest {
            customer_id: Uuid::new_v4(),
            total_amount: 0,
        };
        assert!(request.validate().is_err());
    }
}
