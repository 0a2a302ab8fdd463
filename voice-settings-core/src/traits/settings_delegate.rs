use crate::models::device::{DeviceDescriptor, Direction};
use crate::models::error::LastError;
use crate::models::state::AcquisitionState;

/// Event delegate for settings controller notifications.
///
/// Methods are called on whichever thread drove the controller operation.
/// Implementations should marshal to the UI thread if needed.
pub trait SettingsDelegate: Send + Sync {
    /// Called when the acquisition state machine moves.
    fn on_acquisition_changed(&self, state: AcquisitionState);

    /// Called after a successful device enumeration.
    fn on_devices_updated(&self, devices: &[DeviceDescriptor]);

    /// Called when a capture or enumeration failure is stored.
    fn on_error(&self, error: &LastError);

    /// Called after a device selection has been persisted.
    fn on_device_selected(&self, direction: Direction, device_id: &str);
}
