//! Microphone permission query.
//!
//! On Windows 10 1803+, microphone access is controlled by the privacy
//! settings at Settings > Privacy > Microphone. There is no per-app consent
//! dialog for unpackaged desktop apps, so the state is either granted or
//! denied, checked by activating the default capture endpoint.
//!
//! Other hosts have no query; callers get `NotSupportedError` and treat the
//! permission as unknown.

use voice_settings_core::{PermissionState, PlatformError};

/// Permission name accepted by [`query_permission`].
pub const MICROPHONE: &str = "microphone";

/// Query the named capability's permission.
pub fn query_permission(name: &str) -> Result<PermissionState, PlatformError> {
    if name != MICROPHONE {
        return Err(PlatformError::not_supported(format!("unknown permission name: {}", name)));
    }
    query_microphone_permission()
}

#[cfg(target_os = "windows")]
fn query_microphone_permission() -> Result<PermissionState, PlatformError> {
    windows_endpoint::check_default_capture_endpoint()
}

#[cfg(not(target_os = "windows"))]
fn query_microphone_permission() -> Result<PermissionState, PlatformError> {
    Err(PlatformError::not_supported(
        "microphone permission query is not available on this platform",
    ))
}

#[cfg(target_os = "windows")]
mod windows_endpoint {
    use windows::Win32::Foundation::E_ACCESSDENIED;
    use windows::Win32::Media::Audio::{
        eCapture, eConsole, IAudioClient, IMMDeviceEnumerator, MMDeviceEnumerator, AUDCLNT_E_DEVICE_IN_USE,
    };
    use windows::Win32::System::Com::{
        CoCreateInstance, CoInitializeEx, CoUninitialize, CLSCTX_ALL, COINIT_MULTITHREADED,
    };

    use voice_settings_core::{ErrorKind, PermissionState, PlatformError};

    /// Activate `IAudioClient` on the default capture endpoint.
    ///
    /// `E_ACCESSDENIED` means the privacy toggle is off. A device held
    /// exclusively by another app still proves access is allowed.
    pub(super) fn check_default_capture_endpoint() -> Result<PermissionState, PlatformError> {
        unsafe {
            // Already-initialized apartments report RPC_E_CHANGED_MODE; COM is usable either way.
            let _com_guard = CoInitializeEx(None, COINIT_MULTITHREADED)
                .is_ok()
                .then_some(CoUninitializeGuard);

            let enumerator: IMMDeviceEnumerator = CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL)
                .map_err(|e| {
                    PlatformError::new(ErrorKind::NotReadable, format!("failed to create enumerator: {}", e))
                })?;

            let device = enumerator
                .GetDefaultAudioEndpoint(eCapture, eConsole)
                .map_err(|_| PlatformError::new(ErrorKind::NotFound, "no capture endpoint"))?;

            match device.Activate::<IAudioClient>(CLSCTX_ALL, None) {
                Ok(_) => Ok(PermissionState::Granted),
                Err(e) if e.code() == E_ACCESSDENIED => Ok(PermissionState::Denied),
                Err(e) if e.code() == AUDCLNT_E_DEVICE_IN_USE => Ok(PermissionState::Granted),
                Err(e) => {
                    log::warn!("unexpected error probing microphone access: {}", e);
                    Err(PlatformError::new(ErrorKind::NotReadable, e.to_string()))
                }
            }
        }
    }

    struct CoUninitializeGuard;

    impl Drop for CoUninitializeGuard {
        fn drop(&mut self) {
            unsafe {
                CoUninitialize();
            }
        }
    }
}
