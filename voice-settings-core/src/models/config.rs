use serde::{Deserialize, Serialize};

use super::device::Direction;

/// Capability request passed to [`CapabilityProvider::request_capture`].
///
/// [`CapabilityProvider::request_capture`]: crate::traits::capability_provider::CapabilityProvider::request_capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConstraints {
    pub audio: bool,
    pub video: bool,
}

impl CaptureConstraints {
    /// Audio capture only.
    pub const AUDIO_ONLY: Self = Self {
        audio: true,
        video: false,
    };

    pub fn is_empty(&self) -> bool {
        !self.audio && !self.video
    }
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self::AUDIO_ONLY
    }
}

/// Configuration for a [`PermissionDeviceController`].
///
/// [`PermissionDeviceController`]: crate::controller::PermissionDeviceController
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsConfig {
    /// Capability request issued on every permission attempt (default: audio only).
    pub constraints: CaptureConstraints,

    /// Name passed to the permission query (default: "microphone").
    pub permission_name: String,

    /// Preference key for the selected input device (default: "audioInputDevice").
    pub input_device_key: String,

    /// Preference key for the selected output device (default: "audioOutputDevice").
    pub output_device_key: String,

    /// Shown in place of a device label the platform withheld.
    pub unlabeled_device_label: String,
}

impl SettingsConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.constraints.audio {
            return Err("constraints must request audio capture".into());
        }
        if self.permission_name.trim().is_empty() {
            return Err("permission name must not be empty".into());
        }
        if self.input_device_key.is_empty() || self.output_device_key.is_empty() {
            return Err("preference keys must not be empty".into());
        }
        if self.input_device_key == self.output_device_key {
            return Err(format!(
                "input and output preference keys collide: {}",
                self.input_device_key
            ));
        }
        Ok(())
    }

    /// Preference key that stores the selection for `direction`.
    pub fn preference_key(&self, direction: Direction) -> &str {
        match direction {
            Direction::Input => &self.input_device_key,
            Direction::Output => &self.output_device_key,
        }
    }
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            constraints: CaptureConstraints::AUDIO_ONLY,
            permission_name: "microphone".into(),
            input_device_key: "audioInputDevice".into(),
            output_device_key: "audioOutputDevice".into(),
            unlabeled_device_label: "Unnamed device".into(),
        }
    }
}
