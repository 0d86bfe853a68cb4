// Save records on disk, one pretty-printed JSON file per player
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::error::{StorageError, StorageResult};
use crate::models::SaveData;
use crate::storage::save_store::{SaveRecord, SaveStore, check_player_id, check_revision};

pub struct JsonDirectoryStore {
    storage_dir: PathBuf,
    // Serialises read-check-write so revision checks hold within a process
    write_lock: Mutex<()>,
}

impl JsonDirectoryStore {
    pub fn new(storage_dir: impl AsRef<Path>) -> Self {
        Self {
            storage_dir: storage_dir.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    fn record_path(&self, player_id: &str) -> PathBuf {
        self.storage_dir.join(format!("{}.json", player_id))
    }

    async fn read_record(&self, player_id: &str) -> StorageResult<Option<SaveRecord>> {
        let path = self.record_path(player_id);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl SaveStore for JsonDirectoryStore {
    async fn list_players(&self) -> StorageResult<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.storage_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut players = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if check_player_id(stem).is_ok() {
                    players.push(stem.to_string());
                }
            }
        }

        players.sort();
        Ok(players)
    }

    async fn load(&self, player_id: &str) -> StorageResult<SaveRecord> {
        check_player_id(player_id)?;
        self.read_record(player_id)
            .await?
            .ok_or_else(|| StorageError::NotFound(player_id.to_string()))
    }

    async fn store(&self, player_id: &str, save: &SaveData, expected_revision: Option<u64>) -> StorageResult<u64> {
        check_player_id(player_id)?;
        let _guard = self.write_lock.lock().await;

        let current = self.read_record(player_id).await?.map(|r| r.revision);
        let revision = check_revision(player_id, expected_revision, current)?;

        let record = SaveRecord {
            revision,
            updated_at: Utc::now(),
            save_data: save.clone(),
        };
        let content = serde_json::to_string_pretty(&record)?;

        tokio::fs::create_dir_all(&self.storage_dir).await?;
        // Write to a sibling file first so a crash never leaves half a record
        let path = self.record_path(player_id);
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, content).await?;
        tokio::fs::rename(&tmp_path, &path).await?;

        tracing::trace!("💾 Wrote {} revision {}", path.display(), revision);
        Ok(revision)
    }
}
