//! Best-effort audit trail of terminal classification states.
//!
//! Recording must never block or fail an ingestion run: persistence
//! errors are logged and swallowed.

use chrono::Utc;
use log::warn;

use crate::classify::{ClassificationState, StorageType};
use crate::db::{audit_repo, Database, DatabaseError};

pub use crate::db::audit_repo::AuditRow;

pub struct AuditLogger {
    db: Database,
}

impl AuditLogger {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Records a terminal state. Failures are logged, never propagated.
    pub fn record(&self, state: &ClassificationState) {
        let data_type = serde_json::to_value(state.data_type)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| "UNKNOWN".to_string());
        let storage_type = match state.storage_type {
            Some(StorageType::TransactionDb) => "TRANSACTION_DB",
            Some(StorageType::VectorDb) | None => "VECTOR_DB",
        };

        if let Err(e) = audit_repo::insert(
            &self.db,
            &state.file_name,
            &data_type,
            state.confidence,
            storage_type,
            state.low_confidence,
            &Utc::now().to_rfc3339(),
        ) {
            warn!(
                "Failed to record audit entry for '{}': {}",
                state.file_name, e
            );
        }
    }

    /// Returns the most recent audit records, newest first.
    pub fn recent(&self, limit: u64) -> Result<Vec<AuditRow>, DatabaseError> {
        audit_repo::recent(&self.db, limit)
    }
}
