//! SQLite-backed prompt store.

use crate::db::{prompt_repo, Database, DatabaseError};

use super::{Prompt, PromptStore, PromptStoreError};

impl From<prompt_repo::PromptRow> for Prompt {
    fn from(row: prompt_repo::PromptRow) -> Self {
        Self {
            agent_role: row.agent_role,
            prompt_type: row.prompt_type,
            prompt_text: row.prompt_text,
            version: row.version,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

fn backend(e: DatabaseError) -> PromptStoreError {
    PromptStoreError::Backend(e.to_string())
}

/// Prompt store backed by the shared [`Database`] handle.
#[derive(Clone)]
pub struct SqlitePromptStore {
    db: Database,
}

impl SqlitePromptStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Creates a new version and makes it the active one. Prior versions
    /// for the pair are deactivated in the same transaction.
    pub fn create_version(
        &self,
        agent_role: &str,
        prompt_type: &str,
        prompt_text: &str,
    ) -> Result<Prompt, PromptStoreError> {
        let row = prompt_repo::create_version(&self.db, agent_role, prompt_type, prompt_text)
            .map_err(backend)?;
        log::info!(
            "Created prompt version {} for role '{}' type '{}'",
            row.version,
            agent_role,
            prompt_type
        );
        Ok(row.into())
    }

    /// Re-activates an older version, deactivating the current one
    /// atomically.
    pub fn activate_version(
        &self,
        agent_role: &str,
        prompt_type: &str,
        version: i64,
    ) -> Result<Prompt, PromptStoreError> {
        prompt_repo::activate_version(&self.db, agent_role, prompt_type, version)
            .map_err(backend)?
            .map(Prompt::from)
            .ok_or_else(|| PromptStoreError::VersionNotFound {
                role: agent_role.to_string(),
                prompt_type: prompt_type.to_string(),
                version,
            })
    }

    /// Lists all versions for a pair, newest first.
    pub fn list_versions(
        &self,
        agent_role: &str,
        prompt_type: &str,
    ) -> Result<Vec<Prompt>, PromptStoreError> {
        let rows = prompt_repo::list_versions(&self.db, agent_role, prompt_type)
            .map_err(backend)?;
        Ok(rows.into_iter().map(Prompt::from).collect())
    }
}

impl PromptStore for SqlitePromptStore {
    fn get_active(
        &self,
        agent_role: &str,
        prompt_type: &str,
    ) -> Result<Option<Prompt>, PromptStoreError> {
        let row = prompt_repo::get_active(&self.db, agent_role, prompt_type).map_err(backend)?;
        Ok(row.map(Prompt::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SqlitePromptStore {
        SqlitePromptStore::new(Database::open_in_memory().unwrap())
    }

    #[test]
    fn test_get_active_none() {
        let store = store();
        assert!(store.get_active("ingestion", "system").unwrap().is_none());
    }

    #[test]
    fn test_create_and_read_back() {
        let store = store();
        store
            .create_version("ingestion", "system", "classify the file")
            .unwrap();

        let active = store.get_active("ingestion", "system").unwrap().unwrap();
        assert_eq!(active.prompt_text, "classify the file");
        assert_eq!(active.version, 1);
        assert!(active.is_active);
    }

    #[test]
    fn test_new_version_supersedes_old() {
        let store = store();
        store.create_version("ingestion", "system", "v1").unwrap();
        store.create_version("ingestion", "system", "v2").unwrap();

        let active = store.get_active("ingestion", "system").unwrap().unwrap();
        assert_eq!(active.version, 2);

        let versions = store.list_versions("ingestion", "system").unwrap();
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].version, 2);
        assert_eq!(versions.iter().filter(|p| p.is_active).count(), 1);
    }

    #[test]
    fn test_activate_version_not_found() {
        let store = store();
        store.create_version("ingestion", "system", "v1").unwrap();

        let err = store.activate_version("ingestion", "system", 7).unwrap_err();
        assert!(matches!(
            err,
            PromptStoreError::VersionNotFound { version: 7, .. }
        ));
    }
}
