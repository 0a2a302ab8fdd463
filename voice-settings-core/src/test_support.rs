//! Hand-written doubles for the collaborator traits.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};

use parking_lot::Mutex;

use crate::models::config::CaptureConstraints;
use crate::models::device::{DeviceDescriptor, DeviceKind, Direction, MediaKind};
use crate::models::error::{LastError, PlatformError, SettingsError};
use crate::models::state::{AcquisitionState, PermissionState};
use crate::models::stream::CaptureStream;
use crate::traits::capability_provider::CapabilityProvider;
use crate::traits::media_track::MediaTrack;
use crate::traits::settings_delegate::SettingsDelegate;
use crate::traits::voice_pipeline::VoicePipeline;

/// Records which track ids have been stopped, in order.
#[derive(Debug, Clone, Default)]
pub(crate) struct StopCounter {
    stopped: Arc<Mutex<Vec<String>>>,
}

impl StopCounter {
    pub(crate) fn stops_of(&self, id: &str) -> usize {
        self.stopped.lock().iter().filter(|s| s.as_str() == id).count()
    }

    pub(crate) fn total(&self) -> usize {
        self.stopped.lock().len()
    }
}

pub(crate) struct CountingTrack {
    id: String,
    counter: StopCounter,
}

impl CountingTrack {
    pub(crate) fn audio(id: &str, counter: &StopCounter) -> Self {
        Self {
            id: id.to_string(),
            counter: counter.clone(),
        }
    }
}

impl MediaTrack for CountingTrack {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> MediaKind {
        MediaKind::Audio
    }

    fn label(&self) -> &str {
        "Test Microphone"
    }

    fn stop(&mut self) {
        self.counter.stopped.lock().push(self.id.clone());
    }
}

/// Blocks `request_capture` until the test releases it.
pub(crate) struct CaptureGate {
    entered: Mutex<Option<mpsc::Sender<()>>>,
    release: Mutex<Option<mpsc::Receiver<()>>>,
}

impl CaptureGate {
    /// Returns the gate, a receiver signalled when capture is entered, and
    /// the sender that lets capture continue.
    pub(crate) fn new() -> (Self, mpsc::Receiver<()>, mpsc::Sender<()>) {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let gate = Self {
            entered: Mutex::new(Some(entered_tx)),
            release: Mutex::new(Some(release_rx)),
        };
        (gate, entered_rx, release_tx)
    }

    fn pass(&self) {
        if let Some(tx) = self.entered.lock().take() {
            tx.send(()).ok();
        }
        let release = self.release.lock().take();
        if let Some(rx) = release {
            rx.recv().ok();
        }
    }
}

/// Scriptable capability provider.
pub(crate) struct FakeProvider {
    capture_script: Mutex<VecDeque<Result<(), PlatformError>>>,
    permission: Mutex<Result<PermissionState, PlatformError>>,
    devices: Mutex<Result<Vec<DeviceDescriptor>, PlatformError>>,
    gate: Option<CaptureGate>,
    pub(crate) counter: StopCounter,
    pub(crate) streams_issued: AtomicUsize,
    pub(crate) enumerate_calls: AtomicUsize,
    pub(crate) query_calls: AtomicUsize,
}

impl FakeProvider {
    pub(crate) fn new() -> Self {
        Self {
            capture_script: Mutex::new(VecDeque::new()),
            permission: Mutex::new(Ok(PermissionState::Granted)),
            devices: Mutex::new(Ok(sample_devices())),
            gate: None,
            counter: StopCounter::default(),
            streams_issued: AtomicUsize::new(0),
            enumerate_calls: AtomicUsize::new(0),
            query_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_gate(mut self, gate: CaptureGate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Queue the outcome of the next capture request. Unscripted requests succeed.
    pub(crate) fn push_capture(&self, outcome: Result<(), PlatformError>) {
        self.capture_script.lock().push_back(outcome);
    }

    pub(crate) fn set_permission(&self, outcome: Result<PermissionState, PlatformError>) {
        *self.permission.lock() = outcome;
    }

    pub(crate) fn set_devices(&self, outcome: Result<Vec<DeviceDescriptor>, PlatformError>) {
        *self.devices.lock() = outcome;
    }
}

impl CapabilityProvider for FakeProvider {
    fn request_capture(&self, _constraints: &CaptureConstraints) -> Result<CaptureStream, PlatformError> {
        if let Some(gate) = &self.gate {
            gate.pass();
        }

        let outcome = self.capture_script.lock().pop_front().unwrap_or(Ok(()));
        outcome?;

        let n = self.streams_issued.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(CaptureStream::new(
            format!("stream-{}", n),
            vec![Box::new(CountingTrack::audio(&format!("track-{}", n), &self.counter))],
        ))
    }

    fn query_permission(&self, _name: &str) -> Result<PermissionState, PlatformError> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        self.permission.lock().clone()
    }

    fn enumerate_devices(&self) -> Result<Vec<DeviceDescriptor>, PlatformError> {
        self.enumerate_calls.fetch_add(1, Ordering::SeqCst);
        self.devices.lock().clone()
    }
}

pub(crate) fn sample_devices() -> Vec<DeviceDescriptor> {
    vec![
        DeviceDescriptor::new("default", DeviceKind::AudioInput, "Default - Built-in Microphone"),
        DeviceDescriptor::new("dev-42", DeviceKind::AudioInput, "USB Headset"),
        DeviceDescriptor::new("dev-7", DeviceKind::AudioOutput, "Speakers"),
    ]
}

/// Voice pipeline that records every call it receives.
#[derive(Default)]
pub(crate) struct RecordingPipeline {
    producing: AtomicBool,
    fail_start: AtomicBool,
    pub(crate) calls: Mutex<Vec<String>>,
}

impl RecordingPipeline {
    pub(crate) fn producing() -> Self {
        let pipeline = Self::default();
        pipeline.producing.store(true, Ordering::SeqCst);
        pipeline
    }

    pub(crate) fn fail_next_start(&self) {
        self.fail_start.store(true, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl VoicePipeline for RecordingPipeline {
    fn is_producing(&self, _kind: MediaKind) -> bool {
        self.producing.load(Ordering::SeqCst)
    }

    fn start_producing(&self, kind: MediaKind) -> Result<(), SettingsError> {
        self.calls.lock().push(format!("start:{:?}", kind));
        if self.fail_start.swap(false, Ordering::SeqCst) {
            return Err(SettingsError::PipelineError("device busy".into()));
        }
        self.producing.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop_producing(&self, kind: MediaKind) {
        self.calls.lock().push(format!("stop:{:?}", kind));
        self.producing.store(false, Ordering::SeqCst);
    }
}

/// Delegate that records events as short strings.
#[derive(Default)]
pub(crate) struct RecordingDelegate {
    pub(crate) events: Mutex<Vec<String>>,
}

impl RecordingDelegate {
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }
}

impl SettingsDelegate for RecordingDelegate {
    fn on_acquisition_changed(&self, state: AcquisitionState) {
        self.events.lock().push(format!("state:{:?}", state));
    }

    fn on_devices_updated(&self, devices: &[DeviceDescriptor]) {
        self.events.lock().push(format!("devices:{}", devices.len()));
    }

    fn on_error(&self, error: &LastError) {
        self.events.lock().push(format!("error:{}", error.kind()));
    }

    fn on_device_selected(&self, direction: Direction, device_id: &str) {
        self.events.lock().push(format!("selected:{}:{}", direction, device_id));
    }
}
