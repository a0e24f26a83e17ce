//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::classifier::ClassifierError;
use crate::dataset::DatasetError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Predict called before any successful reload
    NotReady,

    // Validation errors
    MissingParameters,
    InvalidValues,

    // External service errors
    DataSource(String),

    // Database errors
    Database(String),

    // Generic errors
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotReady => (
                StatusCode::BAD_REQUEST,
                "The data has not been loaded. Please refresh the data by calling the '/reload' endpoint first.".to_string(),
            ),
            AppError::MissingParameters => (
                StatusCode::BAD_REQUEST,
                "Missing or invalid required parameters".to_string(),
            ),
            AppError::InvalidValues => (
                StatusCode::BAD_REQUEST,
                "Invalid numeric values for one or more parameters".to_string(),
            ),
            AppError::DataSource(msg) => {
                tracing::error!("Dataset source error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<DatasetError> for AppError {
    fn from(err: DatasetError) -> Self {
        AppError::DataSource(err.to_string())
    }
}

impl From<ClassifierError> for AppError {
    fn from(err: ClassifierError) -> Self {
        AppError::Internal(err.to_string())
    }
}
