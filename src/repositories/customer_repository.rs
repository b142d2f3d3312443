use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::entities::country::{Entity as Country, Model as CountryModel};
use crate::entities::country_customer::{self, Entity as CountryCustomer};
use crate::entities::customer::{self, Entity as Customer, Model as CustomerModel};
use crate::errors::ServiceError;

/// CRUD access to customers and their country links.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    db: Arc<DatabaseConnection>,
}

impl CustomerRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<(CustomerModel, Vec<CountryModel>)>, ServiceError> {
        let Some(customer) = Customer::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };
        let countries = customer.find_related(Country).all(&*self.db).await?;
        Ok(Some((customer, countries)))
    }

    pub async fn find_all(&self) -> Result<Vec<(CustomerModel, Vec<CountryModel>)>, ServiceError> {
        let customers = Customer::find()
            .find_with_related(Country)
            .all(&*self.db)
            .await?;
        Ok(customers)
    }

    /// Inserts the customer and its country links in one transaction.
    pub async fn insert(
        &self,
        model: CustomerModel,
        country_ids: &[Uuid],
    ) -> Result<CustomerModel, ServiceError> {
        let txn = self.db.begin().await?;

        let active = customer::ActiveModel {
            id: Set(model.id),
            first_name: Set(model.first_name),
            last_name: Set(model.last_name),
            email: Set(model.email),
        };
        let inserted = active.insert(&txn).await?;

        for country_id in country_ids {
            let link = country_customer::ActiveModel {
                country_id: Set(*country_id),
                customer_id: Set(inserted.id),
            };
            link.insert(&txn).await?;
        }

        txn.commit().await?;
        Ok(inserted)
    }

    /// Full replace of name/email and the country links.
    pub async fn update(
        &self,
        model: CustomerModel,
        country_ids: &[Uuid],
    ) -> Result<Option<CustomerModel>, ServiceError> {
        let Some(existing) = Customer::find_by_id(model.id).one(&*self.db).await? else {
            return Ok(None);
        };

        let txn = self.db.begin().await?;

        let mut active: customer::ActiveModel = existing.into();
        active.first_name = Set(model.first_name);
        active.last_name = Set(model.last_name);
        active.email = Set(model.email);
        let updated = active.update(&txn).await?;

        CountryCustomer::delete_many()
            .filter(country_customer::Column::CustomerId.eq(updated.id))
            .exec(&txn)
            .await?;
        for country_id in country_ids {
            let link = country_customer::ActiveModel {
                country_id: Set(*country_id),
                customer_id: Set(updated.id),
            };
            link.insert(&txn).await?;
        }

        txn.commit().await?;
        Ok(Some(updated))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let Some(customer) = Customer::find_by_id(id).one(&*self.db).await? else {
            return Ok(false);
        };
        customer.delete(&*self.db).await?;
        Ok(true)
    }
}
