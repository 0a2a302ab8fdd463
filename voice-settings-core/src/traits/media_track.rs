use crate::models::device::MediaKind;

/// One track of a capture stream, as handed out by a platform backend.
///
/// `stop` releases the underlying device. [`CaptureStream`] guarantees it is
/// called at most once per track.
///
/// [`CaptureStream`]: crate::models::stream::CaptureStream
pub trait MediaTrack: Send {
    fn id(&self) -> &str;

    fn kind(&self) -> MediaKind;

    /// Human-readable device label; may be empty.
    fn label(&self) -> &str;

    fn stop(&mut self);
}
