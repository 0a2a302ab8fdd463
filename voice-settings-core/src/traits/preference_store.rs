use crate::models::error::SettingsError;

/// Durable mapping from setting name to string value.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError>;
}
