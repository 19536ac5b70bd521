use std::sync::Arc;

use tracing::info_span;

use crate::ai::ModelClient;
use crate::classify::{router, ClassificationState, ClassifyError, LlmClassifier, RuleClassifier};
use crate::prompts::PromptStore;

use super::config::PipelineConfig;

/// The classification pipeline: a fixed three-step sequence with a single
/// internal skip (the LLM stage's acceptance gate). Stateless across runs;
/// each request threads its own [`ClassificationState`] through.
pub struct Pipeline {
    rule_classifier: RuleClassifier,
    llm_classifier: LlmClassifier,
    acceptance_threshold: f64,
}

impl Pipeline {
    /// Production constructor — builds the stages from config and the
    /// injected collaborators.
    pub fn from_config(
        config: &PipelineConfig,
        prompt_store: Arc<dyn PromptStore>,
        model: Arc<dyn ModelClient>,
    ) -> Self {
        let rule_classifier = RuleClassifier::new(config.rules.clone());
        let llm_classifier = LlmClassifier::new(prompt_store, model, config.acceptance_threshold);
        Self {
            rule_classifier,
            llm_classifier,
            acceptance_threshold: config.acceptance_threshold,
        }
    }

    /// Runs the full pipeline for one ingestion request.
    ///
    /// Errors from the LLM stage abort the run before storage routing —
    /// a partially-classified state is never routed to a store.
    pub fn run(&self, state: ClassificationState) -> Result<ClassificationState, ClassifyError> {
        let _pipeline_span =
            info_span!("classification_pipeline", file_name = %state.file_name).entered();

        let state = {
            let _step = info_span!("rule_classify").entered();
            self.rule_classifier.classify(state)
        };

        let state = {
            let _step = info_span!("llm_classify").entered();
            self.llm_classifier.classify(state)?
        };

        let state = {
            let _step = info_span!("route_storage").entered();
            router::route(state, self.acceptance_threshold)
        };

        Ok(state)
    }
}
