//! Versioned, role-scoped prompt repository.
//!
//! The pipeline only ever reads through the [`PromptStore`] trait; the
//! administrative write path (new versions, re-activation) lives on the
//! SQLite-backed implementation and is applied out-of-band.

pub mod store;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use store::SqlitePromptStore;

/// Default prompt type when the caller does not specify one.
pub const DEFAULT_PROMPT_TYPE: &str = "system";

/// A single prompt version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub agent_role: String,
    pub prompt_type: String,
    pub prompt_text: String,
    pub version: i64,
    pub is_active: bool,
    pub created_at: String,
}

/// Errors from prompt store operations.
#[derive(Debug, Error)]
pub enum PromptStoreError {
    /// The backing store failed (connectivity, corruption, lock poisoning).
    #[error("prompt store backend failure: {0}")]
    Backend(String),

    /// The requested version does not exist for the role/type pair.
    #[error("no prompt version {version} for role '{role}' type '{prompt_type}'")]
    VersionNotFound {
        role: String,
        prompt_type: String,
        version: i64,
    },
}

/// Read seam used by the classification pipeline. Implemented by the
/// SQLite store in production and by in-memory fakes in tests.
pub trait PromptStore: Send + Sync {
    /// Returns the active prompt for the role/type pair, or `None` when no
    /// version is active.
    fn get_active(
        &self,
        agent_role: &str,
        prompt_type: &str,
    ) -> Result<Option<Prompt>, PromptStoreError>;
}
