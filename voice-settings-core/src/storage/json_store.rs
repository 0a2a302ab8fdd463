use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::models::error::SettingsError;
use crate::traits::preference_store::PreferenceStore;

/// Preference store persisted as a flat JSON object.
///
/// ## File Format
/// ```text
/// {
///   "audioInputDevice": "<device id>",
///   "audioOutputDevice": "<device id>"
/// }
/// ```
///
/// The whole map is rewritten on every `set` through a temp file and a
/// rename, so a crash mid-write leaves the previous file intact.
#[derive(Debug)]
pub struct JsonPreferenceStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonPreferenceStore {
    /// Load the store at `path`. A missing file starts an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).map_err(|e| {
                SettingsError::StorageError(format!("failed to parse {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no preference file at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                return Err(SettingsError::StorageError(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    SettingsError::StorageError(format!("failed to create directory: {}", e))
                })?;
            }
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| SettingsError::StorageError(format!("failed to serialize preferences: {}", e)))?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .map_err(|e| SettingsError::StorageError(format!("failed to write preferences: {}", e)))?;
        fs::rename(&tmp_path, &self.path)
            .map_err(|e| SettingsError::StorageError(format!("failed to replace preferences: {}", e)))?;
        Ok(())
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        let mut entries = self.entries.lock();
        let previous = entries.insert(key.to_string(), value.to_string());

        if let Err(e) = self.persist(&entries) {
            // Keep memory and disk in agreement.
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}
