use crate::models::device::MediaKind;
use crate::models::error::SettingsError;

/// The voice/media pipeline that transmits captured media.
///
/// The controller only needs enough of it to restart audio production so a
/// new input device takes effect.
pub trait VoicePipeline: Send + Sync {
    /// Whether `kind` is currently being transmitted.
    fn is_producing(&self, kind: MediaKind) -> bool;

    /// Start transmitting `kind`, opening the currently selected device.
    fn start_producing(&self, kind: MediaKind) -> Result<(), SettingsError>;

    fn stop_producing(&self, kind: MediaKind);
}
