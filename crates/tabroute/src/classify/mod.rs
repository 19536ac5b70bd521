//! Classification stages: deterministic rules first, LLM fallback second,
//! storage routing last. The composition lives in [`crate::pipeline`].

pub mod error;
pub mod llm;
pub mod router;
pub mod rules;
pub mod state;

pub use error::ClassifyError;
pub use llm::{LlmClassifier, INGESTION_ROLE};
pub use rules::RuleClassifier;
pub use state::{ClassificationState, DataType, StorageType, SAMPLE_ROW_LIMIT};
