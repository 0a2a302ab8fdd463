use std::collections::HashMap;

use parking_lot::Mutex;

use crate::models::error::SettingsError;
use crate::traits::preference_store::PreferenceStore;

/// Process-local preference store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
