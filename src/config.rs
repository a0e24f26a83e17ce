//! Configuration module

use std::env;

/// Default location of the Pima diabetes CSV when no `DATASET_URL` is set.
const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/plotly/datasets/master/diabetes.csv";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Server port
    pub port: u16,

    /// URL of the diabetes dataset CSV
    pub dataset_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://diabetes.db".to_string()),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            dataset_url: env::var("DATASET_URL")
                .unwrap_or_else(|_| DEFAULT_DATASET_URL.to_string()),
        }
    }
}
