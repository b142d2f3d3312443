use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::entities::{order_item, order_item_review};
use crate::errors::ServiceError;
use crate::repositories::{order_item_repository::OrderItemRepository, OrderStore};
use crate::services::reviews::OrderItemReviewResponse;
use crate::unit_of_work::UnitOfWork;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrderItemRequest {
    pub order_id: Uuid,
    #[validate(length(min = 1, max = 50, message = "Product name must be 1 to 50 characters"))]
    pub product_name: String,
    #[validate(range(min = 1, message = "Quantity must be a positive number"))]
    pub quantity: i32,
    #[validate(range(min = 1, message = "Unit price must be a positive number"))]
    pub unit_price: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateOrderItemRequest {
    pub order_item_id: Uuid,
    #[validate(length(min = 1, max = 50, message = "Product name must be 1 to 50 characters"))]
    pub product_name: String,
    #[validate(range(min = 1, message = "Quantity must be a positive number"))]
    pub quantity: i32,
    #[validate(range(min = 1, message = "Unit price must be a positive number"))]
    pub unit_price: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: i32,
    pub total_price: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<OrderItemReviewResponse>,
}

impl OrderItemResponse {
    pub fn from_model(
        item: order_item::Model,
        review: Option<order_item_review::Model>,
    ) -> Self {
        Self {
            id: item.id,
            order_id: item.order_id,
            product_name: item.product_name,
            quantity: item.quantity,
            unit_price: item.unit_price,
            total_price: item.total_price,
            review: review.map(OrderItemReviewResponse::from),
        }
    }
}

impl From<order_item::Model> for OrderItemResponse {
    fn from(item: order_item::Model) -> Self {
        Self::from_model(item, None)
    }
}

/// The total price is derived, never taken from the wire.
pub(crate) fn derived_total_price(quantity: i32, unit_price: i32) -> Result<i32, ServiceError> {
    quantity.checked_mul(unit_price).ok_or_else(|| {
        ServiceError::ValidationError("Total price overflows the supported range".to_string())
    })
}

/// Single order item CRUD.
pub struct OrderItemService {
    store: Arc<dyn OrderStore>,
    repository: OrderItemRepository,
}

impl OrderItemService {
    pub fn new(store: Arc<dyn OrderStore>, repository: OrderItemRepository) -> Self {
        Self { store, repository }
    }

    #[instrument(skip(self, request), fields(order_id = %request.order_id))]
    pub async fn create_order_item(
        &self,
        request: CreateOrderItemRequest,
    ) -> Result<OrderItemResponse, ServiceError> {
        request.validate()?;

        let model = order_item::Model {
            id: Uuid::new_v4(),
            order_id: request.order_id,
            total_price: derived_total_price(request.quantity, request.unit_price)?,
            product_name: request.product_name,
            quantity: request.quantity,
            unit_price: request.unit_price,
        };

        let mut uow = UnitOfWork::new();
        let inserted = self.store.insert_order_item(&mut uow, model).await?;

        info!(order_item_id = %inserted.id, "order item created");
        Ok(inserted.into())
    }

    #[instrument(skip(self))]
    pub async fn get_order_item(
        &self,
        order_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<OrderItemResponse>, ServiceError> {
        let found = self.repository.find(order_id, item_id).await?;
        Ok(found.map(|(item, review)| OrderItemResponse::from_model(item, review)))
    }

    #[instrument(skip(self))]
    pub async fn list_order_items(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<OrderItemResponse>, ServiceError> {
        let items = self.repository.find_by_order(order_id).await?;
        Ok(items
            .into_iter()
            .map(|(item, review)| OrderItemResponse::from_model(item, review))
            .collect())
    }

    /// Full replace of the mutable fields; the total price is recomputed.
    #[instrument(skip(self, request), fields(order_item_id = %request.order_item_id))]
    pub async fn update_order_item(
        &self,
        order_id: Uuid,
        request: UpdateOrderItemRequest,
    ) -> Result<OrderItemResponse, ServiceError> {
        request.validate()?;

        let total_price = derived_total_price(request.quantity, request.unit_price)?;
        let updated = self
            .repository
            .update(
                order_id,
                request.order_item_id,
                request.product_name,
                request.quantity,
                request.unit_price,
                total_price,
            )
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Order item {} not found", request.order_item_id))
            })?;

        info!(order_item_id = %updated.id, "order item updated");
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_order_item(
        &self,
        order_id: Uuid,
        item_id: Uuid,
    ) -> Result<(), ServiceError> {
        let deleted = self.repository.delete(order_id, item_id).await?;
        if !deleted {
            return Err(ServiceError::NotFound(format!(
                "Order item {item_id} not found"
            )));
        }
        info!(order_item_id = %item_id, "order item deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn total_price_is_quantity_times_unit_price() {
        assert_eq!(derived_total_price(3, 40).unwrap(), 120);
        assert_eq!(derived_total_price(1, 1).unwrap(), 1);
    }

    #[test]
    fn total_price_overflow_is_a_validation_error() {
        assert_matches!(
            derived_total_price(i32::MAX, 2),
            Err(ServiceError::ValidationError(_))
        );
    }

    #[test]
    fn product_name_longer_than_50_chars_is_rejected() {
        let request = CreateOrderItemRequest {
            order_id: Uuid::new_v4(),
            product_name: "x".repeat(51),
            quantity: 1,
            unit_price: 1,
        };
        assert!(request.validate().is_err());
    }
}
