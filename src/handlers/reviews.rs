use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::services::reviews::{
    CreateReviewRequest, OrderItemReviewResponse, UpdateReviewRequest,
};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/orders/:order_id/items/:item_id/review",
        get(get_review)
            .post(create_review)
            .put(update_review)
            .delete(delete_review),
    )
}

async fn get_review(
    State(state): State<AppState>,
    Path((_order_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<OrderItemReviewResponse>, ServiceError> {
    let review = state
        .services
        .reviews
        .get_review(item_id)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(format!("Review for order item {item_id} not found"))
        })?;
    Ok(Json(review))
}

async fn create_review(
    State(state): State<AppState>,
    Path((order_id, item_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<OrderItemReviewResponse>), ServiceError> {
    let review = state
        .services
        .reviews
        .create_review(order_id, item_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(review)))
}

async fn update_review(
    State(state): State<AppState>,
    Path((_order_id, item_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateReviewRequest>,
) -> Result<Json<OrderItemReviewResponse>, ServiceError> {
    Ok(Json(
        state.services.reviews.update_review(item_id, payload).await?,
    ))
}

async fn delete_review(
    State(state): State<AppState>,
    Path((_order_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ServiceError> {
    state.services.reviews.delete_review(item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
