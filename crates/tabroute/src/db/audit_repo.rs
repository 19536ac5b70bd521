//! Audit repository — terminal classification states in the `audit_log`
//! table.

use rusqlite::{params, Row};

use super::{Database, DatabaseError};

/// A raw audit row from the database.
#[derive(Debug, Clone)]
pub struct AuditRow {
    pub id: i64,
    pub file_name: String,
    pub data_type: String,
    pub confidence: f64,
    pub storage_type: String,
    pub low_confidence: bool,
    pub created_at: String,
}

impl AuditRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            file_name: row.get("file_name")?,
            data_type: row.get("data_type")?,
            confidence: row.get("confidence")?,
            storage_type: row.get("storage_type")?,
            low_confidence: row.get::<_, i64>("low_confidence")? != 0,
            created_at: row.get("created_at")?,
        })
    }
}

/// Inserts a new audit record.
pub fn insert(
    db: &Database,
    file_name: &str,
    data_type: &str,
    confidence: f64,
    storage_type: &str,
    low_confidence: bool,
    created_at: &str,
) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO audit_log (file_name, data_type, confidence, storage_type, low_confidence, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                file_name,
                data_type,
                confidence,
                storage_type,
                low_confidence as i64,
                created_at,
            ],
        )?;
        Ok(())
    })
}

/// Returns the most recent audit records, newest first.
pub fn recent(db: &Database, limit: u64) -> Result<Vec<AuditRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT * FROM audit_log ORDER BY created_at DESC, id DESC LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit], AuditRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}
