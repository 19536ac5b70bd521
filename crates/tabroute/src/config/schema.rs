use serde::{Deserialize, Serialize};

use crate::classify::state::DataType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub version: String,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub classification: ClassificationConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Settings for the remote completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Name of the environment variable holding the API key. The key itself
    /// never appears in config files.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Bound on the outbound completion request. The pipeline itself never
    /// retries; this only keeps a hung provider from stalling a run.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_model() -> String {
    "openai/gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    "TABROUTE_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationConfig {
    /// Confidence at or above which the LLM fallback stage is skipped.
    #[serde(default = "default_acceptance_threshold")]
    pub acceptance_threshold: f64,
    #[serde(default = "default_rules")]
    pub rules: Vec<TriggerRule>,
}

fn default_acceptance_threshold() -> f64 {
    0.7
}

/// The built-in rule set: transaction exports are recognizable from their
/// column headers alone, which avoids a model call for the common case.
fn default_rules() -> Vec<TriggerRule> {
    vec![TriggerRule {
        id: "acquirer-transaction".to_string(),
        priority: 100,
        keywords: vec!["txn_id".to_string(), "amount".to_string()],
        file_pattern: None,
        data_type: DataType::AcquirerTransaction,
        confidence: 0.9,
        reasoning: "Columns match known acquirer transaction fields".to_string(),
    }]
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: default_acceptance_threshold(),
            rules: default_rules(),
        }
    }
}

/// A deterministic classification rule, checked before the LLM stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerRule {
    pub id: String,
    #[serde(default)]
    pub priority: i32,
    /// Column names that trigger this rule; a single (case-insensitive)
    /// intersection with the file's columns is enough.
    pub keywords: Vec<String>,
    /// Optional regex matched against the file name, required in addition
    /// to the keyword match when present.
    #[serde(default)]
    pub file_pattern: Option<String>,
    pub data_type: DataType,
    #[serde(default = "default_rule_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub reasoning: String,
}

fn default_rule_confidence() -> f64 {
    0.9
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database. Defaults to the per-user data directory
    /// when unset.
    #[serde(default)]
    pub path: Option<String>,
}
