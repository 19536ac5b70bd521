//! Prompt repository — versioned rows in the `prompts` table.
//!
//! Version writes are transactional: creating or activating a version
//! deactivates all prior versions for the same `(agent_role, prompt_type)`
//! pair in the same transaction, so readers never observe zero or two
//! active versions.

use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DatabaseError};

/// A raw prompt row from the database.
#[derive(Debug, Clone)]
pub struct PromptRow {
    pub id: i64,
    pub agent_role: String,
    pub prompt_type: String,
    pub prompt_text: String,
    pub version: i64,
    pub is_active: bool,
    pub created_at: String,
}

impl PromptRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            agent_role: row.get("agent_role")?,
            prompt_type: row.get("prompt_type")?,
            prompt_text: row.get("prompt_text")?,
            version: row.get("version")?,
            is_active: row.get::<_, i64>("is_active")? != 0,
            created_at: row.get("created_at")?,
        })
    }
}

/// Returns the active prompt for the given role/type pair, if any.
pub fn get_active(
    db: &Database,
    agent_role: &str,
    prompt_type: &str,
) -> Result<Option<PromptRow>, DatabaseError> {
    db.with_conn(|conn| {
        let row = conn
            .query_row(
                "SELECT * FROM prompts
                 WHERE agent_role = ?1 AND prompt_type = ?2 AND is_active = 1",
                params![agent_role, prompt_type],
                PromptRow::from_row,
            )
            .optional()?;
        Ok(row)
    })
}

/// Inserts a new prompt version as the active one, deactivating all prior
/// versions for the pair atomically. Returns the inserted row.
pub fn create_version(
    db: &Database,
    agent_role: &str,
    prompt_type: &str,
    prompt_text: &str,
) -> Result<PromptRow, DatabaseError> {
    db.with_conn(|conn| {
        let tx = conn.transaction()?;

        tx.execute(
            "UPDATE prompts SET is_active = 0
             WHERE agent_role = ?1 AND prompt_type = ?2 AND is_active = 1",
            params![agent_role, prompt_type],
        )?;

        let next_version: i64 = tx.query_row(
            "SELECT COALESCE(MAX(version), 0) + 1 FROM prompts
             WHERE agent_role = ?1 AND prompt_type = ?2",
            params![agent_role, prompt_type],
            |r| r.get(0),
        )?;

        let created_at = Utc::now().to_rfc3339();
        tx.execute(
            "INSERT INTO prompts (agent_role, prompt_type, prompt_text, version, is_active, created_at)
             VALUES (?1, ?2, ?3, ?4, 1, ?5)",
            params![agent_role, prompt_type, prompt_text, next_version, created_at],
        )?;
        let id = tx.last_insert_rowid();

        tx.commit()?;

        Ok(PromptRow {
            id,
            agent_role: agent_role.to_string(),
            prompt_type: prompt_type.to_string(),
            prompt_text: prompt_text.to_string(),
            version: next_version,
            is_active: true,
            created_at,
        })
    })
}

/// Re-activates an existing version, deactivating the current active one in
/// the same transaction. Returns the activated row, or `None` when the
/// version does not exist.
pub fn activate_version(
    db: &Database,
    agent_role: &str,
    prompt_type: &str,
    version: i64,
) -> Result<Option<PromptRow>, DatabaseError> {
    db.with_conn(|conn| {
        let tx = conn.transaction()?;

        let exists: bool = tx
            .query_row(
                "SELECT 1 FROM prompts
                 WHERE agent_role = ?1 AND prompt_type = ?2 AND version = ?3",
                params![agent_role, prompt_type, version],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        if !exists {
            return Ok(None);
        }

        tx.execute(
            "UPDATE prompts SET is_active = 0
             WHERE agent_role = ?1 AND prompt_type = ?2 AND is_active = 1",
            params![agent_role, prompt_type],
        )?;
        tx.execute(
            "UPDATE prompts SET is_active = 1
             WHERE agent_role = ?1 AND prompt_type = ?2 AND version = ?3",
            params![agent_role, prompt_type, version],
        )?;

        let row = tx.query_row(
            "SELECT * FROM prompts
             WHERE agent_role = ?1 AND prompt_type = ?2 AND version = ?3",
            params![agent_role, prompt_type, version],
            PromptRow::from_row,
        )?;

        tx.commit()?;
        Ok(Some(row))
    })
}

/// Lists all versions for a role/type pair, newest first.
pub fn list_versions(
    db: &Database,
    agent_role: &str,
    prompt_type: &str,
) -> Result<Vec<PromptRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT * FROM prompts
             WHERE agent_role = ?1 AND prompt_type = ?2
             ORDER BY version DESC",
        )?;
        let rows = stmt
            .query_map(params![agent_role, prompt_type], PromptRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}
