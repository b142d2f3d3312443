pub mod countries;
pub mod customers;
pub mod health;
pub mod order_items;
pub mod orders;
pub mod reviews;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

/// Builds the application router with tracing and CORS layers applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(orders::routes())
        .merge(order_items::routes())
        .merge(reviews::routes())
        .merge(customers::routes())
        .merge(countries::routes())
}
