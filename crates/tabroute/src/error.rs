use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabrouteError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Classification error: {0}")]
    Classify(#[from] crate::classify::ClassifyError),

    #[error("Model client error: {0}")]
    Model(#[from] crate::ai::ModelError),

    #[error("Prompt store error: {0}")]
    PromptStore(#[from] crate::prompts::PromptStoreError),

    #[error("Database error: {0}")]
    Database(#[from] crate::db::DatabaseError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Schema validation failed: {errors}")]
    SchemaValidation { errors: String },

    #[error("Invalid rule '{id}': {reason}")]
    InvalidRule { id: String, reason: String },
}

pub type Result<T> = std::result::Result<T, TabrouteError>;
