//! LLM fallback classifier.
//!
//! Invoked only when the rule stage left the state below the acceptance
//! threshold. Fetches the active prompt for the ingestion role, sends the
//! prompt plus a serialized preview of the file to the model, and parses
//! the structured JSON reply back into the state.

use std::sync::Arc;

use log::{debug, warn};
use serde::Deserialize;

use crate::ai::ModelClient;
use crate::prompts::{PromptStore, DEFAULT_PROMPT_TYPE};

use super::error::ClassifyError;
use super::state::{ClassificationState, DataType};

/// Prompt-store role the ingestion pipeline reads.
pub const INGESTION_ROLE: &str = "ingestion";

/// Cap on the serialized sample-row section of the prompt.
const SAMPLE_SECTION_LIMIT: usize = 2000;

/// Sanitizes caller-supplied text for safe inclusion in model prompts.
///
/// Escapes ChatML tokens (`<|...|>`) and common instruction tokens so
/// hostile cell values or file names cannot inject instructions.
fn sanitize_for_prompt(text: &str) -> String {
    text.replace("<|", "< |")
        .replace("|>", "| >")
        .replace("<s>", "< s >")
        .replace("</s>", "< / s >")
        .replace("[INST]", "[ INST ]")
        .replace("[/INST]", "[ / INST ]")
        .replace("<<SYS>>", "< < SYS > >")
        .replace("<</SYS>>", "< < / SYS > >")
}

/// Wire shape the model must reply with.
#[derive(Debug, Deserialize)]
struct WireClassification {
    data_type: String,
    confidence: f64,
    reasoning: String,
}

pub struct LlmClassifier {
    prompt_store: Arc<dyn PromptStore>,
    model: Arc<dyn ModelClient>,
    acceptance_threshold: f64,
}

impl LlmClassifier {
    pub fn new(
        prompt_store: Arc<dyn PromptStore>,
        model: Arc<dyn ModelClient>,
        acceptance_threshold: f64,
    ) -> Self {
        Self {
            prompt_store,
            model,
            acceptance_threshold,
        }
    }

    /// Runs the fallback stage. Returns the input unchanged when a prior
    /// stage already produced an accepted classification; the prompt
    /// lookup and model call only happen past that gate.
    pub fn classify(
        &self,
        state: ClassificationState,
    ) -> Result<ClassificationState, ClassifyError> {
        if state.accepted(self.acceptance_threshold) {
            debug!(
                "Skipping model call for '{}' (confidence {:.2} already accepted)",
                state.file_name, state.confidence
            );
            return Ok(state);
        }

        let prompt = self
            .prompt_store
            .get_active(INGESTION_ROLE, DEFAULT_PROMPT_TYPE)?
            .ok_or_else(|| ClassifyError::PromptNotFound {
                role: INGESTION_ROLE.to_string(),
                prompt_type: DEFAULT_PROMPT_TYPE.to_string(),
            })?;

        let payload = build_payload(&prompt.prompt_text, &state);
        debug!("Model payload for '{}':\n{}", state.file_name, payload);

        let response = self
            .model
            .complete(&payload)
            .map_err(|e| ClassifyError::Unavailable(e.to_string()))?;
        debug!("Model response for '{}':\n{}", state.file_name, response);

        let parsed = parse_classification(&response)?;
        if parsed.confidence < self.acceptance_threshold {
            warn!(
                "Model classified '{}' as {:?} below threshold ({:.2} < {:.2})",
                state.file_name, parsed.data_type, parsed.confidence, self.acceptance_threshold
            );
        }

        Ok(state.with_classification(parsed.data_type, parsed.confidence, parsed.reasoning))
    }
}

/// A validated model classification, ready to merge into the state.
#[derive(Debug)]
struct ParsedClassification {
    data_type: DataType,
    confidence: f64,
    reasoning: String,
}

/// Concatenates the active prompt template with a serialized preview of
/// the current state.
fn build_payload(template: &str, state: &ClassificationState) -> String {
    let columns = state
        .columns
        .iter()
        .map(|c| sanitize_for_prompt(c))
        .collect::<Vec<_>>()
        .join(", ");

    let mut rows = String::new();
    for row in &state.sample_rows {
        let line = serde_json::to_string(row).unwrap_or_default();
        rows.push_str(&sanitize_for_prompt(&line));
        rows.push('\n');
        if rows.len() > SAMPLE_SECTION_LIMIT {
            rows.truncate(SAMPLE_SECTION_LIMIT);
            break;
        }
    }

    format!(
        "{template}\n\n\
         File name: {file_name}\n\
         Columns: {columns}\n\
         Sample rows:\n{rows}\n\
         Respond ONLY with JSON of the form\n\
         {{\"data_type\": \"transaction\"|\"reference\"|\"document\", \"confidence\": 0.0-1.0, \"reasoning\": \"...\"}}",
        template = template,
        file_name = sanitize_for_prompt(&state.file_name),
        columns = columns,
        rows = rows,
    )
}

/// Parses and validates the model reply. Malformed JSON, unknown labels
/// and out-of-range confidence all fail the run.
fn parse_classification(response: &str) -> Result<ParsedClassification, ClassifyError> {
    let json_str = extract_json(response);

    let wire: WireClassification = serde_json::from_str(&json_str).map_err(|e| {
        ClassifyError::ResponseParse(format!(
            "invalid JSON: {}. Response was: {}",
            e,
            response.trim()
        ))
    })?;

    let data_type = match wire.data_type.as_str() {
        "transaction" => DataType::AcquirerTransaction,
        "reference" => DataType::Reference,
        "document" => DataType::Document,
        other => {
            return Err(ClassifyError::ResponseParse(format!(
                "unknown data_type label '{}'",
                other
            )))
        }
    };

    if !wire.confidence.is_finite() || !(0.0..=1.0).contains(&wire.confidence) {
        return Err(ClassifyError::ResponseParse(format!(
            "confidence {} out of range [0, 1]",
            wire.confidence
        )));
    }

    Ok(ParsedClassification {
        data_type,
        confidence: wire.confidence,
        reasoning: wire.reasoning,
    })
}

/// Extracts the first top-level JSON object from the response, tolerating
/// surrounding prose. Tracks string boundaries and escape sequences so
/// braces inside strings do not confuse the depth count.
fn extract_json(response: &str) -> String {
    let start = match response.find('{') {
        Some(idx) => idx,
        None => return response.to_string(),
    };

    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;
    let mut end = response.len();

    for (i, c) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => {
                escape_next = true;
            }
            '"' => {
                in_string = !in_string;
            }
            '{' if !in_string => {
                depth += 1;
            }
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    end = start + i + 1;
                    break;
                }
            }
            _ => {}
        }
    }

    response[start..end].to_string()
}
