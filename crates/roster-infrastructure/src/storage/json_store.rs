// ============================================================================
// Roster Infrastructure - JSON File Store
// File: crates/roster-infrastructure/src/storage/json_store.rs
// ============================================================================
//! Two independently keyed JSON blobs in a data directory, one file per key:
//! `<participants_key>.json` holds the participant array and
//! `<config_key>.json` holds the group configuration.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use roster_core::domain::{GroupConfiguration, Participant, RosterState};
use roster_core::error::DomainError;
use roster_core::repositories::RosterStore;
use roster_shared::config::StorageSettings;

/// Each blob is rewritten only when it differs from what was last read or
/// written, so registering or clearing replaces one file and a config change
/// replaces the other. Only a save with both blobs changed (or unknown) can
/// leave them out of step if the second write fails.
pub struct JsonFileStore {
    data_dir: PathBuf,
    participants_key: String,
    config_key: String,
    on_disk_participants: Mutex<Option<Vec<Participant>>>,
    on_disk_config: Mutex<Option<GroupConfiguration>>,
}

impl JsonFileStore {
    pub fn new(
        data_dir: impl Into<PathBuf>,
        participants_key: impl Into<String>,
        config_key: impl Into<String>,
    ) -> Self {
        Self {
            data_dir: data_dir.into(),
            participants_key: participants_key.into(),
            config_key: config_key.into(),
            on_disk_participants: Mutex::new(None),
            on_disk_config: Mutex::new(None),
        }
    }

    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self::new(
            settings.data_dir.clone(),
            settings.participants_key.clone(),
            settings.config_key.clone(),
        )
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    /// `None` when the key has never been written.
    async fn read_key<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DomainError> {
        let path = self.path_for(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No blob at {}, using default", path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(DomainError::StorageError(format!("{}: {}", path.display(), e)));
            }
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| DomainError::SerializationError(format!("{}: {}", path.display(), e)))
    }

    /// Write to a sibling temp file, then rename over the key.
    async fn write_key<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), DomainError> {
        let path = self.path_for(key);
        let tmp_path = self.data_dir.join(format!("{}.json.tmp", key));

        let bytes = serde_json::to_vec_pretty(value)
            .map_err(|e| DomainError::SerializationError(e.to_string()))?;

        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| DomainError::StorageError(format!("{}: {}", self.data_dir.display(), e)))?;
        tokio::fs::write(&tmp_path, &bytes)
            .await
            .map_err(|e| DomainError::StorageError(format!("{}: {}", tmp_path.display(), e)))?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| DomainError::StorageError(format!("{}: {}", path.display(), e)))?;

        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

#[async_trait]
impl RosterStore for JsonFileStore {
    async fn load(&self) -> Result<RosterState, DomainError> {
        let stored_participants: Option<Vec<Participant>> =
            self.read_key(&self.participants_key).await?;
        let stored_config: Option<GroupConfiguration> = self.read_key(&self.config_key).await?;

        if let Some(participants) = &stored_participants {
            remember(&self.on_disk_participants, participants.clone());
        }
        if let Some(config) = &stored_config {
            remember(&self.on_disk_config, *config);
        }

        let participants = stored_participants.unwrap_or_default();
        let config = stored_config.map(|c| c.normalized()).unwrap_or_default();

        info!(
            "Loaded roster from {}: {} participants",
            self.data_dir.display(),
            participants.len()
        );
        Ok(RosterState {
            participants,
            config,
        })
    }

    async fn save(&self, state: &RosterState) -> Result<(), DomainError> {
        if recall(&self.on_disk_participants).as_ref() != Some(&state.participants) {
            self.write_key(&self.participants_key, &state.participants).await?;
            remember(&self.on_disk_participants, state.participants.clone());
        }

        if recall(&self.on_disk_config) != Some(state.config) {
            self.write_key(&self.config_key, &state.config).await?;
            remember(&self.on_disk_config, state.config);
        }
        Ok(())
    }
}

fn recall<T: Clone>(slot: &Mutex<Option<T>>) -> Option<T> {
    slot.lock().ok().and_then(|value| value.clone())
}

fn remember<T>(slot: &Mutex<Option<T>>, value: T) {
    if let Ok(mut guard) = slot.lock() {
        *guard = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::path::Path;

    fn participant(id: &str, name: &str) -> Participant {
        Participant {
            id: id.to_string(),
            name: name.to_string(),
            group_number: 1,
            timestamp: Utc::now(),
        }
    }

    fn store_in(dir: &Path) -> JsonFileStore {
        JsonFileStore::new(dir, "nova_students", "nova_config")
    }

    #[tokio::test]
    async fn test_missing_files_load_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let state = store_in(dir.path()).load().await.unwrap();

        assert!(state.participants.is_empty());
        assert_eq!(state.config, GroupConfiguration::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let state = RosterState {
            participants: vec![Participant {
                id: "ST-1234".to_string(),
                name: "ALEX RIVERA".to_string(),
                group_number: 2,
                timestamp: Utc::now(),
            }],
            config: GroupConfiguration::new(50, 7),
        };
        store.save(&state).await.unwrap();

        assert!(dir.path().join("nova_students.json").exists());
        assert!(dir.path().join("nova_config.json").exists());
        assert!(!dir.path().join("nova_students.json.tmp").exists());

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.participants.len(), 1);
        assert_eq!(loaded.participants[0].id, "ST-1234");
        assert_eq!(loaded.config.active_group_count, 8);
    }

    #[tokio::test]
    async fn test_creates_missing_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("roster").join("data");
        let store = store_in(&nested);

        store.save(&RosterState::default()).await.unwrap();
        assert!(nested.join("nova_config.json").exists());
    }

    #[tokio::test]
    async fn test_reads_blobs_written_by_browser_app() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("nova_students.json"),
            r#"[{"id":"ST-4821","name":"JORDAN LEE","registrationNumber":3,"groupId":null,"timestamp":1735689600000}]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("nova_config.json"),
            r#"{"expectedStudents":60,"targetGroupSize":12,"activeGroups":5}"#,
        )
        .unwrap();

        let state = store_in(dir.path()).load().await.unwrap();
        assert_eq!(state.participants[0].group_number, 3);
        assert_eq!(state.config, GroupConfiguration::new(60, 12));
    }

    #[tokio::test]
    async fn test_config_only_blob_keeps_empty_roster() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("nova_config.json"),
            r#"{"expectedParticipantCount":40,"targetGroupSize":4,"activeGroupCount":10}"#,
        )
        .unwrap();

        let state = store_in(dir.path()).load().await.unwrap();
        assert!(state.participants.is_empty());
        assert_eq!(state.config.active_group_count, 10);
    }

    #[tokio::test]
    async fn test_corrupt_blob_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("nova_students.json"), "not json").unwrap();

        let err = store_in(dir.path()).load().await.unwrap_err();
        assert!(matches!(err, DomainError::SerializationError(_)));
    }

    #[tokio::test]
    async fn test_registration_rewrites_only_participants() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let mut state = RosterState {
            participants: vec![participant("ST-1000", "CASEY")],
            config: GroupConfiguration::default(),
        };
        store.save(&state).await.unwrap();

        let config_path = dir.path().join("nova_config.json");
        std::fs::remove_file(&config_path).unwrap();

        state.participants.insert(0, participant("ST-2000", "ROBIN"));
        store.save(&state).await.unwrap();

        assert!(!config_path.exists());
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.participants.len(), 2);
    }

    #[tokio::test]
    async fn test_config_change_rewrites_only_config() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let mut state = RosterState {
            participants: vec![participant("ST-1000", "CASEY")],
            config: GroupConfiguration::default(),
        };
        store.save(&state).await.unwrap();

        let participants_path = dir.path().join("nova_students.json");
        std::fs::remove_file(&participants_path).unwrap();

        state.config = state.config.update_group_size(7);
        store.save(&state).await.unwrap();

        assert!(!participants_path.exists());
        assert_eq!(store.load().await.unwrap().config.active_group_count, 8);
    }

    #[tokio::test]
    async fn test_first_save_after_load_writes_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let mut state = store.load().await.unwrap();
        state.participants.push(participant("ST-1000", "CASEY"));
        store.save(&state).await.unwrap();

        assert!(dir.path().join("nova_students.json").exists());
        assert!(dir.path().join("nova_config.json").exists());
    }
}
