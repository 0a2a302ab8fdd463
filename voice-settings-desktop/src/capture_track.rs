//! Microphone track backed by a cpal input stream.
//!
//! cpal streams are not `Send`, so the stream is built, played and dropped
//! on a dedicated thread. The track only holds the thread's stop flag and
//! join handle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use voice_settings_core::{ErrorKind, MediaKind, MediaTrack, PlatformError};

use crate::errors;

/// How often the capture thread checks its stop flag.
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// A live microphone track.
pub struct HostCaptureTrack {
    id: String,
    label: String,
    running: Arc<AtomicBool>,
    capture_handle: Option<thread::JoinHandle<()>>,
}

impl HostCaptureTrack {
    /// Open an input device and start capturing.
    ///
    /// `device_name` selects a device by its cpal name; `None` uses the
    /// host's default input. Blocks until the stream is playing or has
    /// failed to open.
    pub fn open(id: String, device_name: Option<String>) -> Result<Self, PlatformError> {
        let running = Arc::new(AtomicBool::new(true));
        let (ready_tx, ready_rx) = mpsc::channel::<Result<String, PlatformError>>();

        let thread_running = Arc::clone(&running);
        let handle = thread::Builder::new()
            .name("voice-settings-capture".into())
            .spawn(move || capture_loop(thread_running, device_name, ready_tx))
            .map_err(|e| PlatformError::new(ErrorKind::Abort, format!("failed to spawn capture thread: {}", e)))?;

        match ready_rx.recv() {
            Ok(Ok(label)) => {
                log::info!("capture track {} open on \"{}\"", id, label);
                Ok(Self {
                    id,
                    label,
                    running,
                    capture_handle: Some(handle),
                })
            }
            Ok(Err(e)) => {
                let _ = handle.join();
                Err(e)
            }
            Err(_) => {
                let _ = handle.join();
                Err(PlatformError::new(ErrorKind::Abort, "capture thread exited before the stream opened"))
            }
        }
    }
}

impl MediaTrack for HostCaptureTrack {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> MediaKind {
        MediaKind::Audio
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.capture_handle.take() {
            if handle.join().is_err() {
                log::error!("capture thread for track {} panicked", self.id);
            }
            log::debug!("capture track {} stopped", self.id);
        }
    }
}

impl Drop for HostCaptureTrack {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Runs on the capture thread.
///
/// Sequence:
/// 1. Resolve the input device (named or default)
/// 2. Read its default input config
/// 3. Build an input stream in the device's native sample format
/// 4. Play, report readiness, then idle until stopped
fn capture_loop(
    running: Arc<AtomicBool>,
    device_name: Option<String>,
    ready: mpsc::Sender<Result<String, PlatformError>>,
) {
    let stream = match open_input_stream(device_name.as_deref()) {
        Ok((stream, label)) => {
            let _ = ready.send(Ok(label));
            stream
        }
        Err(e) => {
            running.store(false, Ordering::SeqCst);
            let _ = ready.send(Err(e));
            return;
        }
    };

    while running.load(Ordering::SeqCst) {
        thread::sleep(STOP_POLL_INTERVAL);
    }

    if let Err(e) = stream.pause() {
        log::debug!("pausing input stream failed: {}", e);
    }
    drop(stream);
}

fn open_input_stream(device_name: Option<&str>) -> Result<(cpal::Stream, String), PlatformError> {
    let host = cpal::default_host();

    let device = match device_name {
        Some(name) => host
            .input_devices()
            .map_err(errors::from_devices_error)?
            .find(|d| d.name().map(|n| n == name).unwrap_or(false))
            .ok_or_else(|| PlatformError::new(ErrorKind::NotFound, format!("input device not found: {}", name)))?,
        None => host
            .default_input_device()
            .ok_or_else(|| PlatformError::new(ErrorKind::NotFound, "no default input device"))?,
    };

    let label = device.name().unwrap_or_default();
    let supported = device.default_input_config().map_err(errors::from_config_error)?;
    let config: cpal::StreamConfig = supported.config();

    let stream = match supported.sample_format() {
        cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config),
        cpal::SampleFormat::I32 => build_stream::<i32>(&device, &config),
        cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config),
        cpal::SampleFormat::F64 => build_stream::<f64>(&device, &config),
        _ => build_stream::<f32>(&device, &config),
    }
    .map_err(errors::from_build_error)?;

    stream.play().map_err(errors::from_play_error)?;
    Ok((stream, label))
}

/// Samples are discarded: the stream exists to hold the device open and
/// to make the platform grant access.
fn build_stream<T: cpal::SizedSample>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
) -> Result<cpal::Stream, cpal::BuildStreamError> {
    device.build_input_stream(
        config,
        |_data: &[T], _: &cpal::InputCallbackInfo| {},
        |err| log::error!("input stream error: {}", err),
        None,
    )
}
