//! Diabetes Prediction API
//!
//! Two-operation web service: `POST /reload` refreshes the record store
//! from the external dataset source and retrains the classifier;
//! `POST /predict` scores one 8-feature sample against the last-trained
//! classifier.

pub mod classifier;
pub mod config;
pub mod db;
pub mod dataset;
pub mod error;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::SqlitePool,
    pub config: config::Config,
    pub dataset: dataset::DatasetClient,
    pub classifier: Arc<classifier::ClassifierSlot>,
}

impl AppState {
    pub fn new(pool: sqlx::SqlitePool, config: config::Config) -> Self {
        let dataset = dataset::DatasetClient::new(config.dataset_url.clone());
        Self {
            pool,
            config,
            dataset,
            classifier: Arc::new(classifier::ClassifierSlot::new()),
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/reload", post(handlers::reload::reload))
        .route("/predict", post(handlers::predict::predict))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
