//! Ingestion entry point.
//!
//! One logical request is one sequential pipeline run. The service creates
//! a fresh state per request, runs the pipeline, forwards the terminal
//! state to the audit logger and hands it back to the caller, who routes
//! the actual data to whichever store the decision selected.

use log::info;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::audit::AuditLogger;
use crate::classify::{ClassificationState, ClassifyError};
use crate::pipeline::Pipeline;

/// Caller-supplied preview of an uploaded tabular file.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestRequest {
    pub file_name: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub sample_rows: Vec<Map<String, Value>>,
}

pub struct IngestService {
    pipeline: Pipeline,
    audit: AuditLogger,
}

impl IngestService {
    pub fn new(pipeline: Pipeline, audit: AuditLogger) -> Self {
        Self { pipeline, audit }
    }

    /// Classifies one file preview and returns the terminal state.
    ///
    /// Pipeline errors propagate untouched; retry and safe-default
    /// policies belong to the caller. The audit write is best-effort and
    /// cannot fail the request.
    pub fn ingest(&self, request: IngestRequest) -> Result<ClassificationState, ClassifyError> {
        let run_id = uuid::Uuid::new_v4();
        info!(
            "Ingestion run {} started for '{}' ({} columns)",
            run_id,
            request.file_name,
            request.columns.len()
        );

        let state =
            ClassificationState::new(request.file_name, request.columns, request.sample_rows);

        let terminal = self.pipeline.run(state)?;
        self.audit.record(&terminal);

        info!(
            "Ingestion run {} finished: {:?} -> {:?} (confidence {:.2}{})",
            run_id,
            terminal.data_type,
            terminal.storage_type,
            terminal.confidence,
            if terminal.low_confidence {
                ", low confidence"
            } else {
                ""
            }
        );

        Ok(terminal)
    }
}
