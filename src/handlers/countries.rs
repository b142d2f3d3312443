use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::services::countries::{CountryResponse, CreateCountryRequest, UpdateCountryRequest};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/countries", get(list_countries).post(create_country))
        .route(
            "/countries/:country_id",
            get(get_country).put(update_country).delete(delete_country),
        )
}

async fn list_countries(
    State(state): State<AppState>,
) -> Result<Json<Vec<CountryResponse>>, ServiceError> {
    Ok(Json(state.services.countries.list_countries().await?))
}

async fn get_country(
    State(state): State<AppState>,
    Path(country_id): Path<Uuid>,
) -> Result<Json<CountryResponse>, ServiceError> {
    let country = state
        .services
        .countries
        .get_country(country_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Country {country_id} not found")))?;
    Ok(Json(country))
}

async fn create_country(
    State(state): State<AppState>,
    Json(payload): Json<CreateCountryRequest>,
) -> Result<(StatusCode, Json<CountryResponse>), ServiceError> {
    let country = state.services.countries.create_country(payload).await?;
    Ok((StatusCode::CREATED, Json(country)))
}

async fn update_country(
    State(state): State<AppState>,
    Path(country_id): Path<Uuid>,
    Json(payload): Json<UpdateCountryRequest>,
) -> Result<Json<CountryResponse>, ServiceError> {
    if payload.country_id != country_id {
        return Err(ServiceError::BadRequest("Country ID mismatch".to_string()));
    }
    Ok(Json(state.services.countries.update_country(payload).await?))
}

async fn delete_country(
    State(state): State<AppState>,
    Path(country_id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    state.services.countries.delete_country(country_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
