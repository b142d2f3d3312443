use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::entities::order_item_review;
use crate::errors::ServiceError;
use crate::repositories::{
    order_item_repository::OrderItemRepository,
    order_item_review_repository::OrderItemReviewRepository,
};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateReviewRequest {
    pub customer_id: Uuid,
    #[validate(range(min = 1, max = 5, message = "Score must be between 1 and 5"))]
    pub score: i32,
    #[validate(length(min = 1, message = "Review title is required"))]
    pub review_title: String,
    #[validate(length(min = 1, message = "Review description is required"))]
    pub review_description: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    pub customer_id: Uuid,
    #[validate(range(min = 1, max = 5, message = "Score must be between 1 and 5"))]
    pub score: i32,
    #[validate(length(min = 1, message = "Review title is required"))]
    pub review_title: String,
    #[validate(length(min = 1, message = "Review description is required"))]
    pub review_description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderItemReviewResponse {
    pub order_item_id: Uuid,
    pub customer_id: Uuid,
    pub score: i32,
    pub review_title: String,
    pub review_description: String,
}

impl From<order_item_review::Model> for OrderItemReviewResponse {
    fn from(model: order_item_review::Model) -> Self {
        Self {
            order_item_id: model.order_item_id,
            customer_id: model.customer_id,
            score: model.score,
            review_title: model.review_title,
            review_description: model.review_description,
        }
    }
}

/// Reviews are satellites of order items: at most one per item, gone when
/// the item goes.
pub struct OrderItemReviewService {
    repository: OrderItemReviewRepository,
    items: OrderItemRepository,
}

impl OrderItemReviewService {
    pub fn new(repository: OrderItemReviewRepository, items: OrderItemRepository) -> Self {
        Self { repository, items }
    }

    #[instrument(skip(self, request), fields(order_item_id = %order_item_id))]
    pub async fn create_review(
        &self,
        order_id: Uuid,
        order_item_id: Uuid,
        request: CreateReviewRequest,
    ) -> Result<OrderItemReviewResponse, ServiceError> {
        request.validate()?;

        let item = self.items.find(order_id, order_item_id).await?;
        let Some((_, existing_review)) = item else {
            return Err(ServiceError::NotFound(format!(
                "Order item {order_item_id} not found"
            )));
        };
        if existing_review.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Order item {order_item_id} already has a review"
            )));
        }

        let model = order_item_review::Model {
            order_item_id,
            customer_id: request.customer_id,
            score: request.score,
            review_title: request.review_title,
            review_description: request.review_description,
        };
        let inserted = self.repository.insert(model).await?;

        info!(order_item_id = %order_item_id, "review created");
        Ok(inserted.into())
    }

    #[instrument(skip(self))]
    pub async fn get_review(
        &self,
        order_item_id: Uuid,
    ) -> Result<Option<OrderItemReviewResponse>, ServiceError> {
        let review = self.repository.find_by_item(order_item_id).await?;
        Ok(review.map(OrderItemReviewResponse::from))
    }

    #[instrument(skip(self, request), fields(order_item_id = %order_item_id))]
    pub async fn update_review(
        &self,
        order_item_id: Uuid,
        request: UpdateReviewRequest,
    ) -> Result<OrderItemReviewResponse, ServiceError> {
        request.validate()?;

        let model = order_item_review::Model {
            order_item_id,
            customer_id: request.customer_id,
            score: request.score,
            review_title: request.review_title,
            review_description: request.review_description,
        };
        let updated = self.repository.update(model).await?.ok_or_else(|| {
            ServiceError::NotFound(format!("Review for order item {order_item_id} not found"))
        })?;

        info!(order_item_id = %order_item_id, "review updated");
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_review(&self, order_item_id: Uuid) -> Result<(), ServiceError> {
        let deleted = self.repository.delete(order_item_id).await?;
        if !deleted {
            return Err(ServiceError::NotFound(format!(
                "Review for order item {order_item_id} not found"
            )));
        }
        info!(order_item_id = %order_item_id, "review deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_outside_one_to_five_is_rejected() {
        for score in [0, 6, -1] {
            let request = CreateReviewRequest {
                customer_id: Uuid::new_v4(),
                score,
                review_title: "title".to_string(),
                review_description: "description".to_string(),
            };
            assert!(request.validate().is_err(), "score {score} should fail");
        }
    }

    #[test]
    fn empty_title_or_description_is_rejected() {
        let request = CreateReviewRequest {
            customer_id: Uuid::new_v4(),
            score: 3,
            review_title: String::new(),
            review_description: "description".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
