use std::fmt;

use crate::models::device::MediaKind;
use crate::traits::media_track::MediaTrack;

/// Handle to an active capture stream.
///
/// Owns its tracks. Every track is stopped exactly once, either through
/// [`stop`](CaptureStream::stop) or when the handle is dropped, so a stream
/// can never outlive its handle with the device still open.
pub struct CaptureStream {
    id: String,
    tracks: Vec<Box<dyn MediaTrack>>,
    released: bool,
}

impl CaptureStream {
    pub fn new(id: impl Into<String>, tracks: Vec<Box<dyn MediaTrack>>) -> Self {
        Self {
            id: id.into(),
            tracks,
            released: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn has_kind(&self, kind: MediaKind) -> bool {
        self.tracks.iter().any(|track| track.kind() == kind)
    }

    /// Stop every track and release the stream.
    pub fn stop(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        for track in self.tracks.iter_mut() {
            log::debug!("stopping track {} ({})", track.id(), track.label());
            track.stop();
        }
        log::info!("capture stream {} released", self.id);
    }
}

impl Drop for CaptureStream {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for CaptureStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureStream")
            .field("id", &self.id)
            .field("tracks", &self.tracks.len())
            .field("released", &self.released)
            .finish()
    }
}
