//! `CapabilityProvider` for desktop hosts.

use std::sync::atomic::{AtomicU64, Ordering};

use voice_settings_core::{
    CapabilityProvider, CaptureConstraints, CaptureStream, DeviceDescriptor, ErrorKind, MediaTrack,
    PermissionState, PlatformError,
};

use crate::capture_track::HostCaptureTrack;
use crate::device_enumerator::DeviceEnumerator;
use crate::permissions;

/// Capability provider backed by the default cpal host.
///
/// Each granted request opens one microphone track. The input device is the
/// host default unless one was pinned with [`with_input_device`].
///
/// [`with_input_device`]: HostCapabilityProvider::with_input_device
#[derive(Debug, Default)]
pub struct HostCapabilityProvider {
    input_device: Option<String>,
    streams_opened: AtomicU64,
}

impl HostCapabilityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `name` instead of the default input. `None` keeps the default.
    pub fn with_input_device(mut self, name: Option<String>) -> Self {
        self.input_device = name;
        self
    }

    pub fn input_device(&self) -> Option<&str> {
        self.input_device.as_deref()
    }
}

/// Reject requests this provider cannot honour.
pub(crate) fn check_constraints(constraints: &CaptureConstraints) -> Result<(), PlatformError> {
    if constraints.is_empty() {
        return Err(PlatformError::new(
            ErrorKind::Type,
            "at least one of audio or video must be requested",
        ));
    }
    if constraints.video {
        return Err(PlatformError::new(ErrorKind::Overconstrained, "video capture is not supported"));
    }
    Ok(())
}

impl CapabilityProvider for HostCapabilityProvider {
    fn request_capture(&self, constraints: &CaptureConstraints) -> Result<CaptureStream, PlatformError> {
        check_constraints(constraints)?;

        let n = self.streams_opened.fetch_add(1, Ordering::SeqCst) + 1;
        let stream_id = format!("capture-{}-{}", n, uuid::Uuid::new_v4());
        let track = HostCaptureTrack::open(format!("{}/audio", stream_id), self.input_device.clone())?;

        let tracks: Vec<Box<dyn MediaTrack>> = vec![Box::new(track)];
        Ok(CaptureStream::new(stream_id, tracks))
    }

    fn query_permission(&self, name: &str) -> Result<PermissionState, PlatformError> {
        permissions::query_permission(name)
    }

    fn enumerate_devices(&self) -> Result<Vec<DeviceDescriptor>, PlatformError> {
        let enumerator = DeviceEnumerator::new();
        log::debug!("enumerating devices on the {} host", enumerator.host_name());
        enumerator.list_all()
    }
}
