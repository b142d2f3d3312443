use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::country::{self, Entity as Country, Model as CountryModel};
use crate::errors::ServiceError;

/// CRUD access to countries.
#[derive(Debug, Clone)]
pub struct CountryRepository {
    db: Arc<DatabaseConnection>,
}

impl CountryRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CountryModel>, ServiceError> {
        let found = Country::find_by_id(id).one(&*self.db).await?;
        Ok(found)
    }

    pub async fn find_all(&self) -> Result<Vec<CountryModel>, ServiceError> {
        let countries = Country::find()
            .order_by_asc(country::Column::Name)
            .all(&*self.db)
            .await?;
        Ok(countries)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    pub async fn insert(&self, model: CountryModel) -> Result<CountryModel, ServiceError> {
        let active = country::ActiveModel {
            id: Set(model.id),
            name: Set(model.name),
        };
        let inserted = active.insert(&*self.db).await?;
        Ok(inserted)
    }

    pub async fn update(&self, model: CountryModel) -> Result<Option<CountryModel>, ServiceError> {
        let Some(existing) = Country::find_by_id(model.id).one(&*self.db).await? else {
            return Ok(None);
        };

        let mut active: country::ActiveModel = existing.into();
        active.name = Set(model.name);
        let updated = active.update(&*self.db).await?;
        Ok(Some(updated))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let Some(found) = Country::find_by_id(id).one(&*self.db).await? else {
            return Ok(false);
        };
        found.delete(&*self.db).await?;
        Ok(true)
    }
}
