use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::order::{self, Entity as Order, Model as OrderModel};
use crate::errors::ServiceError;

/// CRUD access to orders.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    db: Arc<DatabaseConnection>,
}

impl OrderRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<OrderModel>, ServiceError> {
        let order = Order::find_by_id(id).one(&*self.db).await?;
        Ok(order)
    }

    pub async fn find_all(&self) -> Result<Vec<OrderModel>, ServiceError> {
        let orders = Order::find()
            .order_by_desc(order::Column::OrderDate)
            .all(&*self.db)
            .await?;
        Ok(orders)
    }

    /// Full replace of the mutable fields. The order date is reset to now,
    /// matching the update request semantics. Returns `None` when the order
    /// does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        customer_id: Uuid,
        total_amount: i32,
    ) -> Result<Option<OrderModel>, ServiceError> {
        let Some(existing) = Order::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };

        let mut active: order::ActiveModel = existing.into();
        active.customer_id = Set(customer_id);
        active.total_amount = Set(total_amount);
        active.order_date = Set(Utc::now());

        let updated = active.update(&*self.db).await?;
        Ok(Some(updated))
    }

    /// Deletes the order; its items (and their reviews) cascade. Returns
    /// whether anything was deleted.
    pub async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let Some(order) = Order::find_by_id(id).one(&*self.db).await? else {
            return Ok(false);
        };
        order.delete(&*self.db).await?;
        Ok(true)
    }
}
