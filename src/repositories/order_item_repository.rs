use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::order_item::{self, Entity as OrderItem, Model as OrderItemModel};
use crate::entities::order_item_review::{
    Entity as OrderItemReview, Model as ReviewModel,
};
use crate::errors::ServiceError;

/// CRUD access to order items, including their optional review.
#[derive(Debug, Clone)]
pub struct OrderItemRepository {
    db: Arc<DatabaseConnection>,
}

impl OrderItemRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn find(
        &self,
        order_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<(OrderItemModel, Option<ReviewModel>)>, ServiceError> {
        let found = OrderItem::find_by_id(item_id)
            .filter(order_item::Column::OrderId.eq(order_id))
            .find_also_related(OrderItemReview)
            .one(&*self.db)
            .await?;
        Ok(found)
    }

    pub async fn find_by_order(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<(OrderItemModel, Option<ReviewModel>)>, ServiceError> {
        let items = OrderItem::find()
            .filter(order_item::Column::OrderId.eq(order_id))
            .find_also_related(OrderItemReview)
            .all(&*self.db)
            .await?;
        Ok(items)
    }

    /// Full replace of the mutable fields. `total_price` is supplied by the
    /// service, which always derives it from quantity and unit price.
    pub async fn update(
        &self,
        order_id: Uuid,
        item_id: Uuid,
        product_name: String,
        quantity: i32,
        unit_price: i32,
        total_price: i32,
    ) -> Result<Option<OrderItemModel>, ServiceError> {
        let existing = OrderItem::find_by_id(item_id)
            .filter(order_item::Column::OrderId.eq(order_id))
            .one(&*self.db)
            .await?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: order_item::ActiveModel = existing.into();
        active.product_name = Set(product_name);
        active.quantity = Set(quantity);
        active.unit_price = Set(unit_price);
        active.total_price = Set(total_price);

        let updated = active.update(&*self.db).await?;
        Ok(Some(updated))
    }

    /// Deletes the item; its review cascades.
    pub async fn delete(&self, order_id: Uuid, item_id: Uuid) -> Result<bool, ServiceError> {
        let existing = OrderItem::find_by_id(item_id)
            .filter(order_item::Column::OrderId.eq(order_id))
            .one(&*self.db)
            .await?;
        let Some(item) = existing else {
            return Ok(false);
        };
        item.delete(&*self.db).await?;
        Ok(true)
    }
}
