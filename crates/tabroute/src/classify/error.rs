use thiserror::Error;

use crate::prompts::PromptStoreError;

/// Errors raised by the classification pipeline. All of them abort the run
/// before storage routing — a partially-classified state is never routed.
/// Nothing is retried inside the pipeline; retry, fallback-to-manual-review
/// and user notification are caller responsibilities.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// No active prompt is configured for the required role/type pair.
    /// Fatal configuration error for the run.
    #[error("no active prompt for role '{role}' type '{prompt_type}'")]
    PromptNotFound { role: String, prompt_type: String },

    /// The prompt store itself failed (as opposed to holding no prompt).
    #[error("prompt store failure: {0}")]
    PromptStore(#[from] PromptStoreError),

    /// Transport or provider failure calling the model.
    #[error("model inference unavailable: {0}")]
    Unavailable(String),

    /// The model returned output that does not conform to the required
    /// JSON contract. The pipeline never coerces invalid output.
    #[error("failed to parse model classification: {0}")]
    ResponseParse(String),
}
