use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::services::orders::{CreateOrderRequest, OrderResponse, UpdateOrderRequest};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/batch", post(create_orders_batch))
        .route(
            "/orders/:order_id",
            get(get_order).put(update_order).delete(delete_order),
        )
}

async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, ServiceError> {
    Ok(Json(state.services.orders.list_orders().await?))
}

async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderResponse>, ServiceError> {
    let order = state
        .services
        .orders
        .get_order(order_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Order {order_id} not found")))?;
    Ok(Json(order))
}

async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ServiceError> {
    if state
        .services
        .customers
        .get_customer(payload.customer_id)
        .await?
        .is_none()
    {
        return Err(ServiceError::NotFound(format!(
            "Customer {} not found",
            payload.customer_id
        )));
    }

    let order = state.services.orders.create_order(payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

async fn create_orders_batch(
    State(state): State<AppState>,
    Json(payload): Json<Vec<CreateOrderRequest>>,
) -> Result<(StatusCode, Json<Vec<OrderResponse>>), ServiceError> {
    let orders = state.services.order_batches.create_orders(payload).await?;
    Ok((StatusCode::CREATED, Json(orders)))
}

async fn update_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<UpdateOrderRequest>,
) -> Result<Json<OrderResponse>, ServiceError> {
    if payload.order_id != order_id {
        return Err(ServiceError::BadRequest("Order ID mismatch".to_string()));
    }
    if state
        .services
        .customers
        .get_customer(payload.customer_id)
        .await?
        .is_none()
    {
        return Err(ServiceError::NotFound(format!(
            "Customer {} not found",
            payload.customer_id
        )));
    }

    Ok(Json(state.services.orders.update_order(payload).await?))
}

async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    state.services.orders.delete_order(order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
