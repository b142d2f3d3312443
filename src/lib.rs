//! Order management API.
//!
//! Layered like the services it sits between: axum handlers parse HTTP,
//! services own the business rules (order numbering, batch creation,
//! derived totals), repositories and the [`repositories::OrderStore`] trait
//! talk to the database through SeaORM.

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod repositories;
pub mod sequence;
pub mod services;
pub mod unit_of_work;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

/// Shared application state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: services::AppServices,
}
