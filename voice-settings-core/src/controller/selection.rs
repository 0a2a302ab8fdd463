use crate::models::device::{Direction, MediaKind};
use crate::models::error::SettingsError;
use crate::traits::capability_provider::CapabilityProvider;

use super::permission_device::PermissionDeviceController;

impl<P: CapabilityProvider> PermissionDeviceController<P> {
    /// Persist `device_id` as the preferred device for `direction`.
    ///
    /// For input, a voice pipeline that is currently producing audio is
    /// stopped and started again so it reopens the new device. Selections
    /// are serialized, so two callers never interleave their stop/start
    /// pairs. Output selections are persisted only.
    pub fn select_device(&self, device_id: &str, direction: Direction) -> Result<(), SettingsError> {
        let _selection = self.selection.lock();

        let key = self.config.preference_key(direction);
        self.store.set(key, device_id)?;
        log::info!("{} device set to {}", direction, device_id);

        if let Some(ref delegate) = self.delegate {
            delegate.on_device_selected(direction, device_id);
        }

        match direction {
            Direction::Input => self.restart_audio_production(),
            Direction::Output => Ok(()),
        }
    }

    /// The persisted device id for `direction`, if any.
    pub fn selected_device(&self, direction: Direction) -> Option<String> {
        self.store.get(self.config.preference_key(direction))
    }

    fn restart_audio_production(&self) -> Result<(), SettingsError> {
        if !self.pipeline.is_producing(MediaKind::Audio) {
            return Ok(());
        }

        log::debug!("restarting audio production on the new input device");
        self.pipeline.stop_producing(MediaKind::Audio);
        self.pipeline.start_producing(MediaKind::Audio).map_err(|e| {
            log::error!("failed to restart audio production: {}", e);
            e
        })
    }
}
