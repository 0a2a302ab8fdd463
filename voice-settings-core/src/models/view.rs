use serde::Serialize;

use super::device::DeviceDescriptor;
use super::error::{FailureStage, LastError};
use super::state::{AcquisitionState, PermissionState};

/// Contextual notice the presentation layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Notice {
    /// The platform refused the capability outright. Show a blocking notice
    /// pointing at OS settings, not a retry action.
    PermissionBlocked,
    /// The platform would still prompt, and the last attempt failed. Offer retry.
    PermissionPending,
    /// Listing devices failed. Offer retry.
    EnumerationFailed,
}

impl Notice {
    /// Derive the notices for the current error slot and permission state.
    ///
    /// A failed permission query never produces a notice by itself.
    pub fn collect(error: Option<&LastError>, permission: PermissionState) -> Vec<Notice> {
        let Some(error) = error else {
            return Vec::new();
        };

        let mut notices = Vec::new();
        if error.error.is_not_allowed() {
            notices.push(Notice::PermissionBlocked);
        }
        if permission == PermissionState::Prompt {
            notices.push(Notice::PermissionPending);
        } else if error.stage == FailureStage::Enumeration {
            notices.push(Notice::EnumerationFailed);
        }
        notices
    }

    pub fn offers_retry(&self) -> bool {
        !matches!(self, Self::PermissionBlocked)
    }
}

/// One entry in the input device picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceOption {
    pub device_id: String,
    pub label: String,
    pub selected: bool,
}

/// Snapshot of everything the settings pane renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaneView {
    pub acquisition: AcquisitionState,
    pub permission: PermissionState,
    /// Show the "grant permission" affordance.
    pub needs_grant: bool,
    pub input_devices: Vec<DeviceOption>,
    pub selected_input: Option<String>,
    pub selected_output: Option<String>,
    pub notices: Vec<Notice>,
    pub error: Option<LastError>,
}

impl PaneView {
    pub(crate) fn input_options(
        devices: Option<&[DeviceDescriptor]>,
        selected: Option<&str>,
        fallback_label: &str,
    ) -> Vec<DeviceOption> {
        devices
            .unwrap_or_default()
            .iter()
            .filter(|device| device.is_audio_input())
            .map(|device| DeviceOption {
                device_id: device.device_id.clone(),
                label: device.display_label(fallback_label).to_string(),
                selected: selected == Some(device.device_id.as_str()),
            })
            .collect()
    }
}
