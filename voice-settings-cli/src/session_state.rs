use voice_settings_core::{
    AcquisitionState, DeviceDescriptor, Direction, LastError, MediaKind, SettingsDelegate, SettingsError,
    VoicePipeline,
};

/// Voice pipeline stand-in for a process that has no voice session.
///
/// Never producing, so input selections are persisted without a restart.
pub struct DetachedPipeline;

impl VoicePipeline for DetachedPipeline {
    fn is_producing(&self, _kind: MediaKind) -> bool {
        false
    }

    fn start_producing(&self, kind: MediaKind) -> Result<(), SettingsError> {
        Err(SettingsError::PipelineError(format!(
            "no voice session to produce {:?} in",
            kind
        )))
    }

    fn stop_producing(&self, _kind: MediaKind) {}
}

/// SettingsDelegate that forwards controller events to the log.
#[derive(Default)]
pub struct LogDelegate;

impl SettingsDelegate for LogDelegate {
    fn on_acquisition_changed(&self, state: AcquisitionState) {
        log::debug!("acquisition state: {:?}", state);
    }

    fn on_devices_updated(&self, devices: &[DeviceDescriptor]) {
        log::debug!("{} device(s) available", devices.len());
    }

    fn on_error(&self, error: &LastError) {
        log::warn!("{:?} failed: {}", error.stage, error.error);
    }

    fn on_device_selected(&self, direction: Direction, device_id: &str) {
        log::debug!("{} device selected: {}", direction, device_id);
    }
}
