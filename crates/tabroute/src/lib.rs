pub mod ai;
pub mod audit;
pub mod classify;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod prompts;
pub mod service;

pub use ai::{HttpModelClient, ModelClient, ModelError};
pub use audit::AuditLogger;
pub use classify::{
    ClassificationState, ClassifyError, DataType, LlmClassifier, RuleClassifier, StorageType,
};
pub use config::{load_config, Config};
pub use error::{ConfigError, Result, TabrouteError};
pub use logging::init_logging;
pub use pipeline::{Pipeline, PipelineConfig};
pub use prompts::{Prompt, PromptStore, PromptStoreError, SqlitePromptStore};
pub use service::{IngestRequest, IngestService};
