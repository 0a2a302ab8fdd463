//! Audio device enumeration through the cpal host.
//!
//! cpal exposes device names but no stable identifiers, so the name doubles
//! as the device id. The host's default device is listed first under each
//! kind.

use cpal::traits::{DeviceTrait, HostTrait};

use voice_settings_core::{DeviceDescriptor, DeviceKind, PlatformError};

use crate::errors;

/// Lists input and output devices of the default cpal host.
pub struct DeviceEnumerator {
    host: cpal::Host,
}

impl DeviceEnumerator {
    pub fn new() -> Self {
        Self {
            host: cpal::default_host(),
        }
    }

    pub fn host_name(&self) -> &'static str {
        self.host.id().name()
    }

    /// List capture (microphone) devices.
    pub fn list_capture_devices(&self) -> Result<Vec<DeviceDescriptor>, PlatformError> {
        let default_name = self.host.default_input_device().and_then(|d| d.name().ok());
        let devices = self.host.input_devices().map_err(errors::from_devices_error)?;
        Ok(describe(devices, DeviceKind::AudioInput, default_name.as_deref()))
    }

    /// List render (speaker/headphone) devices.
    pub fn list_render_devices(&self) -> Result<Vec<DeviceDescriptor>, PlatformError> {
        let default_name = self.host.default_output_device().and_then(|d| d.name().ok());
        let devices = self.host.output_devices().map_err(errors::from_devices_error)?;
        Ok(describe(devices, DeviceKind::AudioOutput, default_name.as_deref()))
    }

    /// Capture devices followed by render devices.
    pub fn list_all(&self) -> Result<Vec<DeviceDescriptor>, PlatformError> {
        let mut devices = self.list_capture_devices()?;
        devices.extend(self.list_render_devices()?);
        Ok(devices)
    }
}

impl Default for DeviceEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

fn describe(
    devices: impl Iterator<Item = cpal::Device>,
    kind: DeviceKind,
    default_name: Option<&str>,
) -> Vec<DeviceDescriptor> {
    let mut descriptors: Vec<DeviceDescriptor> = devices
        .enumerate()
        .filter_map(|(i, device)| match device.name() {
            Ok(name) => Some(DeviceDescriptor::new(name.clone(), kind, name)),
            Err(e) => {
                log::debug!("skipping {} device {}: {}", kind.as_str(), i, e);
                None
            }
        })
        .collect();

    order_default_first(&mut descriptors, default_name);
    descriptors
}

fn order_default_first(descriptors: &mut [DeviceDescriptor], default_name: Option<&str>) {
    if let Some(name) = default_name {
        if let Some(pos) = descriptors.iter().position(|d| d.device_id == name) {
            descriptors[..=pos].rotate_right(1);
        }
    }
}
