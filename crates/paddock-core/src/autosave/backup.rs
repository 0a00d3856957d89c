//! Local mirror of in-progress listing data.
//!
//! The backup lives in [`KeyValueStorage`] and is independent of the listing
//! store, so a draft survives a crash or a failed remote save. Storage
//! failures never reach the caller: they are logged and treated as "no
//! backup".

use jiff::Timestamp;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::storage::KeyValueStorage;
use crate::{
    error::{ListingError, Result},
    models::ListingData,
};

/// Storage key of the serialized listing data.
pub const BACKUP_KEY: &str = "listing_form_backup";
/// Storage key of the last backup time.
pub const BACKUP_TIMESTAMP_KEY: &str = "listing_form_backup_timestamp";
/// Version of the backup envelope written by this build.
pub const BACKUP_VERSION: u32 = 1;

const METADATA_KEY: &str = "_backup";

/// Metadata stored alongside the listing fields under `_backup`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupMetadata {
    pub draft_id: Option<u64>,
    pub saved_at: Timestamp,
    pub version: u32,
}

/// A backup read back from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct BackupEntry {
    pub data: ListingData,
    pub metadata: Option<BackupMetadata>,
}

/// Presence of a backup, as found on session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackupStatus {
    pub exists: bool,
    pub saved_at: Option<Timestamp>,
}

/// Reads and writes the local backup of one wizard session.
pub struct LocalBackup<K> {
    storage: K,
    has_backup: bool,
    last_backup_time: Option<Timestamp>,
}

impl<K: KeyValueStorage> LocalBackup<K> {
    pub fn new(storage: K) -> Self {
        Self {
            storage,
            has_backup: false,
            last_backup_time: None,
        }
    }

    pub fn has_backup(&self) -> bool {
        self.has_backup
    }

    pub fn last_backup_time(&self) -> Option<Timestamp> {
        self.last_backup_time
    }

    /// Overwrites the backup with `data`. Returns whether the write succeeded.
    pub fn save_backup(&mut self, data: &ListingData, draft_id: Option<u64>) -> bool {
        let saved_at = Timestamp::now();
        match self.write_backup(data, draft_id, saved_at) {
            Ok(()) => {
                debug!("Backed up listing data (draft {draft_id:?})");
                self.has_backup = true;
                self.last_backup_time = Some(saved_at);
                true
            }
            Err(e) => {
                warn!("Failed to write local backup: {e}");
                false
            }
        }
    }

    fn write_backup(
        &mut self,
        data: &ListingData,
        draft_id: Option<u64>,
        saved_at: Timestamp,
    ) -> Result<()> {
        let mut envelope = serde_json::to_value(data)?;
        let metadata = serde_json::to_value(BackupMetadata {
            draft_id,
            saved_at,
            version: BACKUP_VERSION,
        })?;
        match envelope.as_object_mut() {
            Some(object) => {
                object.insert(METADATA_KEY.to_string(), metadata);
            }
            None => return Err(ListingError::storage("listing data is not a JSON object")),
        }

        self.storage
            .set_item(BACKUP_KEY, &serde_json::to_string(&envelope)?)?;
        self.storage
            .set_item(BACKUP_TIMESTAMP_KEY, &saved_at.to_string())?;
        Ok(())
    }

    /// Returns the backed up data with metadata stripped, if any.
    pub fn load_backup(&self) -> Option<ListingData> {
        self.load_entry().map(|entry| entry.data)
    }

    /// Returns the backed up data together with its metadata.
    pub fn load_entry(&self) -> Option<BackupEntry> {
        let raw = match self.storage.get_item(BACKUP_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read local backup: {e}");
                return None;
            }
        };

        match Self::parse_entry(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Ignoring unreadable local backup: {e}");
                None
            }
        }
    }

    fn parse_entry(raw: &str) -> Result<BackupEntry> {
        let mut value: Value = serde_json::from_str(raw)?;
        let object = value
            .as_object_mut()
            .ok_or_else(|| ListingError::storage("backup is not a JSON object"))?;

        // Older or foreign envelopes may lack metadata; the data is still usable
        let metadata = object
            .remove(METADATA_KEY)
            .and_then(|meta| serde_json::from_value::<BackupMetadata>(meta).ok());
        let data = serde_json::from_value::<ListingData>(value)?;

        Ok(BackupEntry { data, metadata })
    }

    /// Removes the backup and resets the backup flags.
    pub fn clear_backup(&mut self) {
        for key in [BACKUP_KEY, BACKUP_TIMESTAMP_KEY] {
            if let Err(e) = self.storage.remove_item(key) {
                warn!("Failed to remove local backup key '{key}': {e}");
            }
        }
        self.has_backup = false;
        self.last_backup_time = None;
    }

    /// Reports whether a backup exists without loading it.
    pub fn check_existing(&mut self) -> BackupStatus {
        let exists = match self.storage.get_item(BACKUP_KEY) {
            Ok(value) => value.is_some(),
            Err(e) => {
                warn!("Failed to check local backup: {e}");
                false
            }
        };

        let saved_at = if exists {
            self.storage
                .get_item(BACKUP_TIMESTAMP_KEY)
                .ok()
                .flatten()
                .and_then(|raw| raw.parse::<Timestamp>().ok())
        } else {
            None
        };

        self.has_backup = exists;
        self.last_backup_time = saved_at;

        BackupStatus { exists, saved_at }
    }
}
