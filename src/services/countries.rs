use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::entities::country;
use crate::errors::ServiceError;
use crate::repositories::country_repository::CountryRepository;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateCountryRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateCountryRequest {
    pub country_id: Uuid,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CountryResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<country::Model> for CountryResponse {
    fn from(model: country::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

pub struct CountryService {
    repository: CountryRepository,
}

impl CountryService {
    pub fn new(repository: CountryRepository) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, request))]
    pub async fn create_country(
        &self,
        request: CreateCountryRequest,
    ) -> Result<CountryResponse, ServiceError> {
        request.validate()?;

        let model = country::Model {
            id: Uuid::new_v4(),
            name: request.name,
        };
        let inserted = self.repository.insert(model).await?;

        info!(country_id = %inserted.id, "country created");
        Ok(inserted.into())
    }

    #[instrument(skip(self))]
    pub async fn get_country(
        &self,
        country_id: Uuid,
    ) -> Result<Option<CountryResponse>, ServiceError> {
        let found = self.repository.find_by_id(country_id).await?;
        Ok(found.map(CountryResponse::from))
    }

    #[instrument(skip(self))]
    pub async fn list_countries(&self) -> Result<Vec<CountryResponse>, ServiceError> {
        let countries = self.repository.find_all().await?;
        Ok(countries.into_iter().map(CountryResponse::from).collect())
    }

    #[instrument(skip(self, request), fields(country_id = %request.country_id))]
    pub async fn update_country(
        &self,
        request: UpdateCountryRequest,
    ) -> Result<CountryResponse, ServiceError> {
        request.validate()?;

        let model = country::Model {
            id: request.country_id,
            name: request.name,
        };
        let updated = self.repository.update(model).await?.ok_or_else(|| {
            ServiceError::NotFound(format!("Country {} not found", request.country_id))
        })?;

        info!(country_id = %updated.id, "country updated");
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_country(&self, country_id: Uuid) -> Result<(), ServiceError> {
        let deleted = self.repository.delete(country_id).await?;
        if !deleted {
            return Err(ServiceError::NotFound(format!(
                "Country {country_id} not found"
            )));
        }
        info!(country_id = %country_id, "country deleted");
        Ok(())
    }
}
