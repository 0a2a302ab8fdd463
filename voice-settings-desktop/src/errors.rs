//! Mapping from cpal errors to platform error kinds.
//!
//! cpal has no dedicated "permission refused" error. Hosts report it through
//! backend-specific messages (ALSA "Permission denied", WASAPI "Access is
//! denied", CoreAudio "not permitted"), so those are recognised by text.

use voice_settings_core::{ErrorKind, PlatformError};

const REFUSAL_MARKERS: &[&str] = &["denied", "not permitted", "not authorized", "unauthorized"];

pub(crate) fn classify_message(message: &str) -> ErrorKind {
    let lower = message.to_lowercase();
    if REFUSAL_MARKERS.iter().any(|marker| lower.contains(marker)) {
        ErrorKind::NotAllowed
    } else {
        ErrorKind::NotReadable
    }
}

pub(crate) fn from_build_error(e: cpal::BuildStreamError) -> PlatformError {
    let kind = match &e {
        cpal::BuildStreamError::DeviceNotAvailable => ErrorKind::NotFound,
        cpal::BuildStreamError::StreamConfigNotSupported => ErrorKind::Overconstrained,
        cpal::BuildStreamError::InvalidArgument => ErrorKind::Type,
        other => classify_message(&other.to_string()),
    };
    PlatformError::new(kind, format!("failed to open input stream: {}", e))
}

pub(crate) fn from_config_error(e: cpal::DefaultStreamConfigError) -> PlatformError {
    let kind = match &e {
        cpal::DefaultStreamConfigError::DeviceNotAvailable => ErrorKind::NotFound,
        cpal::DefaultStreamConfigError::StreamTypeNotSupported => ErrorKind::Overconstrained,
        other => classify_message(&other.to_string()),
    };
    PlatformError::new(kind, format!("failed to read input config: {}", e))
}

pub(crate) fn from_play_error(e: cpal::PlayStreamError) -> PlatformError {
    let kind = match &e {
        cpal::PlayStreamError::DeviceNotAvailable => ErrorKind::NotFound,
        other => classify_message(&other.to_string()),
    };
    PlatformError::new(kind, format!("failed to start input stream: {}", e))
}

pub(crate) fn from_devices_error(e: cpal::DevicesError) -> PlatformError {
    PlatformError::new(ErrorKind::NotReadable, format!("failed to enumerate devices: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refusal_messages_map_to_not_allowed() {
        assert_eq!(classify_message("ALSA function 'snd_pcm_open' failed: Permission denied"), ErrorKind::NotAllowed);
        assert_eq!(classify_message("Access is denied. (0x80070005)"), ErrorKind::NotAllowed);
        assert_eq!(classify_message("Operation not permitted"), ErrorKind::NotAllowed);
    }

    #[test]
    fn other_messages_map_to_not_readable() {
        assert_eq!(classify_message("Device or resource busy"), ErrorKind::NotReadable);
    }

    #[test]
    fn device_not_available_is_not_found() {
        let err = from_build_error(cpal::BuildStreamError::DeviceNotAvailable);
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = from_config_error(cpal::DefaultStreamConfigError::StreamTypeNotSupported);
        assert_eq!(err.kind, ErrorKind::Overconstrained);
    }
}
