use crate::config::schema::{Config, TriggerRule};

pub struct PipelineConfig {
    /// Confidence at or above which the LLM stage is skipped and below
    /// which the terminal state is flagged `low_confidence`.
    pub acceptance_threshold: f64,
    pub rules: Vec<TriggerRule>,
}

impl PipelineConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            acceptance_threshold: config.classification.acceptance_threshold,
            rules: config.classification.rules.clone(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let classification = crate::config::schema::ClassificationConfig::default();
        Self {
            acceptance_threshold: classification.acceptance_threshold,
            rules: classification.rules,
        }
    }
}
