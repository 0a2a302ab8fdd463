use crate::models::config::CaptureConstraints;
use crate::models::device::DeviceDescriptor;
use crate::models::error::PlatformError;
use crate::models::state::PermissionState;
use crate::models::stream::CaptureStream;

/// Platform media-device and permission capabilities.
///
/// Implemented by:
/// - `HostCapabilityProvider` (desktop, cpal)
/// - test doubles in this crate
///
/// Calls may block while the platform asks the user for consent.
pub trait CapabilityProvider: Send + Sync {
    /// Ask for a capture stream matching `constraints`.
    ///
    /// A refusal by the user or the OS is reported as
    /// [`ErrorKind::NotAllowed`](crate::models::error::ErrorKind::NotAllowed).
    fn request_capture(&self, constraints: &CaptureConstraints) -> Result<CaptureStream, PlatformError>;

    /// Query the current permission for the named capability (e.g. "microphone").
    ///
    /// Platforms that cannot answer return an error; callers treat that as
    /// [`PermissionState::Unknown`].
    fn query_permission(&self, name: &str) -> Result<PermissionState, PlatformError>;

    /// List all media devices. Labels may be empty when no stream is held.
    fn enumerate_devices(&self) -> Result<Vec<DeviceDescriptor>, PlatformError>;
}
