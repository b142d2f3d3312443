use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::services::customers::{
    CreateCustomerRequest, CustomerResponse, UpdateCustomerRequest,
};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route(
            "/customers/:customer_id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerResponse>>, ServiceError> {
    Ok(Json(state.services.customers.list_customers().await?))
}

async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<CustomerResponse>, ServiceError> {
    let customer = state
        .services
        .customers
        .get_customer(customer_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Customer {customer_id} not found")))?;
    Ok(Json(customer))
}

async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), ServiceError> {
    let customer = state.services.customers.create_customer(payload).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

async fn update_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> Result<Json<CustomerResponse>, ServiceError> {
    if payload.customer_id != customer_id {
        return Err(ServiceError::BadRequest("Customer ID mismatch".to_string()));
    }
    Ok(Json(state.services.customers.update_customer(payload).await?))
}

async fn delete_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    state.services.customers.delete_customer(customer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
