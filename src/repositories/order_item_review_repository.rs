use std::sync::Arc;

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Set};
use uuid::Uuid;

use crate::entities::order_item_review::{
    self, Entity as OrderItemReview, Model as ReviewModel,
};
use crate::errors::ServiceError;

/// CRUD access to order item reviews (one per item, keyed by the item id).
#[derive(Debug, Clone)]
pub struct OrderItemReviewRepository {
    db: Arc<DatabaseConnection>,
}

impl OrderItemReviewRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn find_by_item(
        &self,
        order_item_id: Uuid,
    ) -> Result<Option<ReviewModel>, ServiceError> {
        let review = OrderItemReview::find_by_id(order_item_id)
            .one(&*self.db)
            .await?;
        Ok(review)
    }

    pub async fn insert(&self, review: ReviewModel) -> Result<ReviewModel, ServiceError> {
        let active = order_item_review::ActiveModel {
            order_item_id: Set(review.order_item_id),
            customer_id: Set(review.customer_id),
            score: Set(review.score),
            review_title: Set(review.review_title),
            review_description: Set(review.review_description),
        };
        let inserted = active.insert(&*self.db).await?;
        Ok(inserted)
    }

    pub async fn update(&self, review: ReviewModel) -> Result<Option<ReviewModel>, ServiceError> {
        let existing = OrderItemReview::find_by_id(review.order_item_id)
            .one(&*self.db)
            .await?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: order_item_review::ActiveModel = existing.into();
        active.customer_id = Set(review.customer_id);
        active.score = Set(review.score);
        active.review_title = Set(review.review_title);
        active.review_description = Set(review.review_description);

        let updated = active.update(&*self.db).await?;
        Ok(Some(updated))
    }

    pub async fn delete(&self, order_item_id: Uuid) -> Result<bool, ServiceError> {
        let existing = OrderItemReview::find_by_id(order_item_id)
            .one(&*self.db)
            .await?;
        let Some(review) = existing else {
            return Ok(false);
        };
        review.delete(&*self.db).await?;
        Ok(true)
    }
}
