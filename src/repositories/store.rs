use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect,
    Set, TransactionTrait,
};
use tracing::debug;

use crate::entities::order::{self, Entity as OrderEntity};
use crate::entities::order_item;
use crate::errors::ServiceError;
use crate::repositories::OrderStore;
use crate::unit_of_work::{StagedWrite, UnitOfWork};

/// [`OrderStore`] backed by SeaORM.
#[derive(Debug, Clone)]
pub struct SeaOrmOrderStore {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmOrderStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn order_active_model(m: order::Model) -> order::ActiveModel {
    order::ActiveModel {
        id: Set(m.id),
        order_number: Set(m.order_number),
        customer_id: Set(m.customer_id),
        order_date: Set(m.order_date),
        total_amount: Set(m.total_amount),
    }
}

fn order_item_active_model(m: order_item::Model) -> order_item::ActiveModel {
    order_item::ActiveModel {
        id: Set(m.id),
        order_id: Set(m.order_id),
        product_name: Set(m.product_name),
        quantity: Set(m.quantity),
        unit_price: Set(m.unit_price),
        total_price: Set(m.total_price),
    }
}

#[async_trait]
impl OrderStore for SeaOrmOrderStore {
    async fn order_numbers_for_year(&self, year: i32) -> Result<Vec<String>, ServiceError> {
        let numbers: Vec<String> = OrderEntity::find()
            .select_only()
            .column(order::Column::OrderNumber)
            .filter(order::Column::OrderNumber.starts_with(format!("{year}_")))
            .into_tuple::<String>()
            .all(&*self.db)
            .await?;
        Ok(numbers)
    }

    async fn insert_order(
        &self,
        uow: &mut UnitOfWork,
        order: order::Model,
    ) -> Result<order::Model, ServiceError> {
        if uow.is_started() {
            uow.stage(StagedWrite::Order(order_active_model(order.clone())))?;
            return Ok(order);
        }

        let inserted = order_active_model(order).insert(&*self.db).await?;
        Ok(inserted)
    }

    async fn insert_order_item(
        &self,
        uow: &mut UnitOfWork,
        item: order_item::Model,
    ) -> Result<order_item::Model, ServiceError> {
        if uow.is_started() {
            uow.stage(StagedWrite::OrderItem(order_item_active_model(
                item.clone(),
            )))?;
            return Ok(item);
        }

        let inserted = order_item_active_model(item).insert(&*self.db).await?;
        Ok(inserted)
    }

    async fn commit_batch(&self, mut uow: UnitOfWork) -> Result<u64, ServiceError> {
        let staged = uow.finish();
        if staged.is_empty() {
            return Ok(0);
        }

        let txn = self.db.begin().await?;
        let mut affected = 0u64;
        for write in staged {
            match write {
                StagedWrite::Order(model) => {
                    model.insert(&txn).await?;
                }
                StagedWrite::OrderItem(model) => {
                    model.insert(&txn).await?;
                }
            }
            affected += 1;
        }
        txn.commit().await?;

        debug!(affected, "batch committed");
        Ok(affected)
    }
}
