use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Maximum number of sample rows carried through the pipeline. Rows are
/// only LLM context and are never persisted, so a small preview suffices.
pub const SAMPLE_ROW_LIMIT: usize = 3;

/// The classification assigned to an ingested file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    AcquirerTransaction,
    Reference,
    Document,
    /// Unset — no stage has classified the file yet.
    #[default]
    Unknown,
}

/// The store an ingested file is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageType {
    TransactionDb,
    VectorDb,
}

/// The single record threaded through the classification pipeline.
///
/// Each stage consumes a state and returns a new one; fields a stage does
/// not touch are carried over unchanged. The state has no identity or
/// persistence lifecycle of its own — it is created fresh per ingestion
/// request and handed back to the caller as the terminal state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationState {
    pub file_name: String,
    pub columns: Vec<String>,
    pub sample_rows: Vec<Map<String, Value>>,
    #[serde(default)]
    pub data_type: DataType,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub reasoning: String,
    /// Derived by the storage router, never set by the caller.
    #[serde(default)]
    pub storage_type: Option<StorageType>,
    /// True when the terminal confidence ended below the acceptance
    /// threshold. Unclassified data still routes to the vector store, but
    /// callers can use this flag to divert to manual review.
    #[serde(default)]
    pub low_confidence: bool,
}

impl ClassificationState {
    /// Creates a fresh state for one ingestion request. Sample rows beyond
    /// [`SAMPLE_ROW_LIMIT`] are discarded.
    pub fn new(
        file_name: impl Into<String>,
        columns: Vec<String>,
        mut sample_rows: Vec<Map<String, Value>>,
    ) -> Self {
        sample_rows.truncate(SAMPLE_ROW_LIMIT);
        Self {
            file_name: file_name.into(),
            columns,
            sample_rows,
            data_type: DataType::Unknown,
            confidence: 0.0,
            reasoning: String::new(),
            storage_type: None,
            low_confidence: false,
        }
    }

    /// Whether a prior stage has already produced an accepted
    /// classification. Once this holds, no later stage may override
    /// `data_type`, `confidence` or `reasoning`.
    pub fn accepted(&self, threshold: f64) -> bool {
        self.confidence >= threshold
    }

    /// Returns a new state with the classification fields replaced and all
    /// other fields carried over.
    pub fn with_classification(
        mut self,
        data_type: DataType,
        confidence: f64,
        reasoning: impl Into<String>,
    ) -> Self {
        self.data_type = data_type;
        self.confidence = confidence;
        self.reasoning = reasoning.into();
        self
    }
}
