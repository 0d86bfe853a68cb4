// In-process save store
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::error::{StorageError, StorageResult};
use crate::models::SaveData;
use crate::storage::save_store::{SaveRecord, SaveStore, check_player_id, check_revision};

#[derive(Default)]
pub struct MemorySaveStore {
    records: Mutex<BTreeMap<String, SaveRecord>>,
}

impl MemorySaveStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw record, bypassing revision checks
    pub async fn insert(&self, player_id: &str, record: SaveRecord) {
        self.records.lock().await.insert(player_id.to_string(), record);
    }
}

#[async_trait]
impl SaveStore for MemorySaveStore {
    async fn list_players(&self) -> StorageResult<Vec<String>> {
        Ok(self.records.lock().await.keys().cloned().collect())
    }

    async fn load(&self, player_id: &str) -> StorageResult<SaveRecord> {
        self.records
            .lock()
            .await
            .get(player_id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(player_id.to_string()))
    }

    async fn store(&self, player_id: &str, save: &SaveData, expected_revision: Option<u64>) -> StorageResult<u64> {
        check_player_id(player_id)?;
        let mut records = self.records.lock().await;

        let current = records.get(player_id).map(|r| r.revision);
        let revision = check_revision(player_id, expected_revision, current)?;
        records.insert(
            player_id.to_string(),
            SaveRecord {
                revision,
                updated_at: Utc::now(),
                save_data: save.clone(),
            },
        );

        Ok(revision)
    }
}
