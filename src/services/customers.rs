use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::entities::{country, customer};
use crate::errors::ServiceError;
use crate::repositories::{
    country_repository::CountryRepository, customer_repository::CustomerRepository,
};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Email must be valid"))]
    pub email: String,
    #[serde(default)]
    pub country_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    pub customer_id: Uuid,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Email must be valid"))]
    pub email: String,
    #[serde(default)]
    pub country_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CustomerResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country_names: Vec<String>,
}

impl CustomerResponse {
    fn from_model(model: customer::Model, countries: Vec<country::Model>) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            country_names: countries.into_iter().map(|c| c.name).collect(),
        }
    }
}

pub struct CustomerService {
    repository: CustomerRepository,
    countries: CountryRepository,
}

impl CustomerService {
    pub fn new(repository: CustomerRepository, countries: CountryRepository) -> Self {
        Self {
            repository,
            countries,
        }
    }

    async fn check_countries_exist(&self, country_ids: &[Uuid]) -> Result<(), ServiceError> {
        for country_id in country_ids {
            if !self.countries.exists(*country_id).await? {
                return Err(ServiceError::NotFound(format!(
                    "Country {country_id} not found"
                )));
            }
        }
        Ok(())
    }

    #[instrument(skip(self, request))]
    pub async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<CustomerResponse, ServiceError> {
        request.validate()?;
        self.check_countries_exist(&request.country_ids).await?;

        let model = customer::Model {
            id: Uuid::new_v4(),
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
        };
        let inserted = self.repository.insert(model, &request.country_ids).await?;

        info!(customer_id = %inserted.id, "customer created");
        let (model, countries) = self
            .repository
            .find_by_id(inserted.id)
            .await?
            .unwrap_or((inserted, Vec::new()));
        Ok(CustomerResponse::from_model(model, countries))
    }

    #[instrument(skip(self))]
    pub async fn get_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Option<CustomerResponse>, ServiceError> {
        let found = self.repository.find_by_id(customer_id).await?;
        Ok(found.map(|(model, countries)| CustomerResponse::from_model(model, countries)))
    }

    #[instrument(skip(self))]
    pub async fn list_customers(&self) -> Result<Vec<CustomerResponse>, ServiceError> {
        let customers = self.repository.find_all().await?;
        Ok(customers
            .into_iter()
            .map(|(model, countries)| CustomerResponse::from_model(model, countries))
            .collect())
    }

    /// Full replace of the customer fields and country links.
    #[instrument(skip(self, request), fields(customer_id = %request.customer_id))]
    pub async fn update_customer(
        &self,
        request: UpdateCustomerRequest,
    ) -> Result<CustomerResponse, ServiceError> {
        request.validate()?;
        self.check_countries_exist(&request.country_ids).await?;

        let model = customer::Model {
            id: request.customer_id,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
        };
        let updated = self
            .repository
            .update(model, &request.country_ids)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Customer {} not found", request.customer_id))
            })?;

        info!(customer_id = %updated.id, "customer updated");
        let (model, countries) = self
            .repository
            .find_by_id(updated.id)
            .await?
            .unwrap_or((updated, Vec::new()));
        Ok(CustomerResponse::from_model(model, countries))
    }

    #[instrument(skip(self))]
    pub async fn delete_customer(&self, customer_id: Uuid) -> Result<(), ServiceError> {
        let deleted = self.repository.delete(customer_id).await?;
        if !deleted {
            return Err(ServiceError::NotFound(format!(
                "Customer {customer_id} not found"
            )));
        }
        info!(customer_id = %customer_id, "customer deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_email_is_rejected() {
        let request = CreateCustomerRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "not-an-email".to_string(),
            country_ids: Vec::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn response_collects_country_names() {
        let model = customer::Model {
            id: Uuid::new_v4(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        };
        let countries = vec![
            country::Model {
                id: Uuid::new_v4(),
                name: "Italy".to_string(),
            },
            country::Model {
                id: Uuid::new_v4(),
                name: "Norway".to_string(),
            },
        ];

        let response = CustomerResponse::from_model(model, countries);
        assert_eq!(response.country_names, vec!["Italy", "Norway"]);
    }
}
