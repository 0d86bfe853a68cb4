// Save-record persistence contract shared by every store
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, IntentError, StorageError, StorageResult};
use crate::models::SaveData;

/// One stored game. `revision` increases by one on every write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecord {
    pub revision: u64,
    pub updated_at: DateTime<Utc>,
    pub save_data: SaveData,
}

#[async_trait]
pub trait SaveStore: Send + Sync {
    /// Player ids with a stored record, sorted
    async fn list_players(&self) -> StorageResult<Vec<String>>;

    async fn load(&self, player_id: &str) -> StorageResult<SaveRecord>;

    /// Write `save` for `player_id` and return the new revision.
    ///
    /// `expected_revision` is the revision the caller loaded, or `None` when
    /// creating a record that must not exist yet. A mismatch fails with
    /// [`StorageError::StaleWrite`] and leaves the stored record untouched.
    async fn store(&self, player_id: &str, save: &SaveData, expected_revision: Option<u64>) -> StorageResult<u64>;
}

/// Revision check shared by store implementations
pub(crate) fn check_revision(player_id: &str, expected: Option<u64>, current: Option<u64>) -> StorageResult<u64> {
    match (expected, current) {
        (None, None) => Ok(1),
        (Some(expected), Some(found)) if expected == found => Ok(found + 1),
        (expected, found) => Err(StorageError::StaleWrite {
            player_id: player_id.to_string(),
            expected: expected.unwrap_or(0),
            found: found.unwrap_or(0),
        }),
    }
}

/// Player ids become file names, so they are kept to a safe alphabet
pub(crate) fn check_player_id(player_id: &str) -> StorageResult<()> {
    let valid = !player_id.is_empty()
        && player_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidPlayerId(player_id.to_string()))
    }
}

/// Apply a user intent to a stored game: load, mutate, store.
///
/// The write carries the loaded revision, so an intent never silently
/// overwrites a tick (or another intent) that landed in between. A rejected
/// intent stores nothing.
pub async fn update_save<T, F>(store: &dyn SaveStore, player_id: &str, intent: F) -> Result<T, Error>
where
    F: FnOnce(&mut SaveData) -> Result<T, IntentError>,
{
    let record = store.load(player_id).await?;
    let mut save = record.save_data;

    let outcome = intent(&mut save)
        .inspect_err(|e| tracing::warn!("⚠️ Rejected intent for {}: {}", player_id, e))?;
    let revision = store.store(player_id, &save, Some(record.revision)).await?;
    tracing::debug!("💾 Stored intent for {} at revision {}", player_id, revision);

    Ok(outcome)
}
