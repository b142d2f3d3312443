use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::services::order_items::{
    CreateOrderItemRequest, OrderItemResponse, UpdateOrderItemRequest,
};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/orders/:order_id/items",
            get(list_order_items).post(create_order_item),
        )
        .route("/order-items/batch", post(create_order_items_batch))
        .route(
            "/orders/:order_id/items/:item_id",
            get(get_order_item)
                .put(update_order_item)
                .delete(delete_order_item),
        )
}

/// Create payload without the order id, which comes from the path.
#[derive(Debug, Deserialize)]
struct CreateOrderItemBody {
    product_name: String,
    quantity: i32,
    unit_price: i32,
}

async fn ensure_order_exists(state: &AppState, order_id: Uuid) -> Result<(), ServiceError> {
    if state.services.orders.get_order(order_id).await?.is_none() {
        return Err(ServiceError::NotFound(format!(
            "Order {order_id} not found"
        )));
    }
    Ok(())
}

async fn list_order_items(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<Vec<OrderItemResponse>>, ServiceError> {
    ensure_order_exists(&state, order_id).await?;
    Ok(Json(
        state.services.order_items.list_order_items(order_id).await?,
    ))
}

async fn get_order_item(
    State(state): State<AppState>,
    Path((order_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<OrderItemResponse>, ServiceError> {
    let item = state
        .services
        .order_items
        .get_order_item(order_id, item_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Order item {item_id} not found")))?;
    Ok(Json(item))
}

async fn create_order_item(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<CreateOrderItemBody>,
) -> Result<(StatusCode, Json<OrderItemResponse>), ServiceError> {
    ensure_order_exists(&state, order_id).await?;

    let request = CreateOrderItemRequest {
        order_id,
        product_name: payload.product_name,
        quantity: payload.quantity,
        unit_price: payload.unit_price,
    };
    let item = state.services.order_items.create_order_item(request).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn create_order_items_batch(
    State(state): State<AppState>,
    Json(payload): Json<Vec<CreateOrderItemRequest>>,
) -> Result<(StatusCode, Json<Vec<OrderItemResponse>>), ServiceError> {
    let items = state
        .services
        .order_item_batches
        .create_order_items(payload)
        .await?;
    Ok((StatusCode::CREATED, Json(items)))
}

async fn update_order_item(
    State(state): State<AppState>,
    Path((order_id, item_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateOrderItemRequest>,
) -> Result<Json<OrderItemResponse>, ServiceError> {
    if payload.order_item_id != item_id {
        return Err(ServiceError::BadRequest(
            "Order item ID mismatch".to_string(),
        ));
    }

    Ok(Json(
        state
            .services
            .order_items
            .update_order_item(order_id, payload)
            .await?,
    ))
}

async fn delete_order_item(
    State(state): State<AppState>,
    Path((order_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ServiceError> {
    state
        .services
        .order_items
        .delete_order_item(order_id, item_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
