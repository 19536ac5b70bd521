use super::state::{ClassificationState, DataType, StorageType};

/// Maps the final classification to a target store. Total and pure:
/// acquirer transactions go to the transaction database, everything else —
/// including `Unknown` — to the vector store. Unclassified data is stored
/// as searchable rather than as transactional records; the terminal
/// `low_confidence` flag tells callers when that fallback fired.
pub fn route(mut state: ClassificationState, acceptance_threshold: f64) -> ClassificationState {
    state.storage_type = Some(match state.data_type {
        DataType::AcquirerTransaction => StorageType::TransactionDb,
        _ => StorageType::VectorDb,
    });
    state.low_confidence = !state.accepted(acceptance_threshold);
    state
}
