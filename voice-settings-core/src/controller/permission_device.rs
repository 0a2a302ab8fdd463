use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::config::SettingsConfig;
use crate::models::device::{DeviceDescriptor, Direction};
use crate::models::error::{FailureStage, LastError, PlatformError, SettingsError};
use crate::models::state::{AcquisitionState, PermissionState};
use crate::models::stream::CaptureStream;
use crate::models::view::{Notice, PaneView};
use crate::traits::capability_provider::CapabilityProvider;
use crate::traits::preference_store::PreferenceStore;
use crate::traits::settings_delegate::SettingsDelegate;
use crate::traits::voice_pipeline::VoicePipeline;

/// Transient controller state, protected by `parking_lot::Mutex`.
#[derive(Default)]
struct ControllerState {
    stream: Option<CaptureStream>,
    devices: Option<Vec<DeviceDescriptor>>,
    permission: PermissionState,
    error: Option<LastError>,
    acquisition: AcquisitionState,
}

/// Clears the in-flight flag on every exit path of a request.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Microphone permission, device enumeration and device selection.
///
/// Generic over the platform backend via the `CapabilityProvider` trait.
/// Holds at most one capture stream; the stream is released when replaced,
/// when [`dispose`](Self::dispose) is called, or when the controller is dropped.
///
/// ```text
/// request_permission_and_stream()
///   ├→ [CapabilityProvider::request_capture] → stream held → enumerate_devices
///   └→ [CapabilityProvider::query_permission] → permission (Unknown on failure)
///
/// select_device(id, input)
///   └→ [PreferenceStore::set] → [VoicePipeline] stop + start if producing audio
/// ```
pub struct PermissionDeviceController<P: CapabilityProvider> {
    provider: P,
    pub(super) store: Arc<dyn PreferenceStore>,
    pub(super) pipeline: Arc<dyn VoicePipeline>,
    pub(super) config: SettingsConfig,
    pub(super) delegate: Option<Arc<dyn SettingsDelegate>>,
    pub(super) selection: Mutex<()>,
    state: Mutex<ControllerState>,
    in_flight: AtomicBool,
}

impl<P: CapabilityProvider> PermissionDeviceController<P> {
    pub fn new(provider: P, store: Arc<dyn PreferenceStore>, pipeline: Arc<dyn VoicePipeline>) -> Self {
        Self {
            provider,
            store,
            pipeline,
            config: SettingsConfig::default(),
            delegate: None,
            selection: Mutex::new(()),
            state: Mutex::new(ControllerState::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_config(
        provider: P,
        store: Arc<dyn PreferenceStore>,
        pipeline: Arc<dyn VoicePipeline>,
        config: SettingsConfig,
    ) -> Result<Self, SettingsError> {
        config.validate().map_err(SettingsError::ConfigurationFailed)?;
        let mut controller = Self::new(provider, store, pipeline);
        controller.config = config;
        Ok(controller)
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn SettingsDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn config(&self) -> &SettingsConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Request a capture stream and query the microphone permission.
    ///
    /// The two platform calls are independent: a failed permission query
    /// leaves the permission `Unknown` without touching the error slot, and
    /// a failed capture stores the error without touching the permission.
    /// Any previously stored error is cleared first, so this is also the
    /// retry action.
    ///
    /// Only one request runs at a time; a concurrent call returns
    /// [`SettingsError::RequestInFlight`] and changes nothing.
    pub fn request_permission_and_stream(&self) -> Result<AcquisitionState, SettingsError> {
        let Some(_in_flight) = InFlightGuard::acquire(&self.in_flight) else {
            log::debug!("permission request ignored, another one is in flight");
            return Err(SettingsError::RequestInFlight);
        };

        self.state.lock().error = None;
        self.set_acquisition(AcquisitionState::Requesting);

        let stream_acquired = match self.provider.request_capture(&self.config.constraints) {
            Ok(stream) => {
                log::info!("capture stream {} acquired with {} track(s)", stream.id(), stream.track_count());
                self.replace_stream(stream);
                true
            }
            Err(e) => {
                log::warn!("capture request failed: {}", e);
                self.store_error(FailureStage::Capture, e);
                false
            }
        };

        if stream_acquired {
            self.enumerate_for_stream();
        }

        let query_supported = match self.provider.query_permission(&self.config.permission_name) {
            Ok(permission) => {
                log::debug!("{} permission: {:?}", self.config.permission_name, permission);
                self.state.lock().permission = permission;
                true
            }
            Err(e) => {
                log::debug!("permission query unavailable: {}", e);
                self.state.lock().permission = PermissionState::Unknown;
                false
            }
        };

        let outcome = AcquisitionState::resolve(stream_acquired, query_supported);
        self.set_acquisition(outcome);
        Ok(outcome)
    }

    /// Re-list devices. Runs only while a stream is held, since labels are
    /// withheld without one. Returns whether enumeration ran.
    pub fn refresh_devices(&self) -> bool {
        self.enumerate_for_stream()
    }

    pub fn acquisition_state(&self) -> AcquisitionState {
        self.state.lock().acquisition
    }

    pub fn permission(&self) -> PermissionState {
        self.state.lock().permission
    }

    pub fn has_stream(&self) -> bool {
        self.state.lock().stream.is_some()
    }

    pub fn stream_id(&self) -> Option<String> {
        self.state.lock().stream.as_ref().map(|s| s.id().to_string())
    }

    /// Every enumerated device, or `None` before the first successful enumeration.
    pub fn devices(&self) -> Option<Vec<DeviceDescriptor>> {
        self.state.lock().devices.clone()
    }

    pub fn input_devices(&self) -> Vec<DeviceDescriptor> {
        self.state
            .lock()
            .devices
            .iter()
            .flatten()
            .filter(|d| d.is_audio_input())
            .cloned()
            .collect()
    }

    pub fn last_error(&self) -> Option<LastError> {
        self.state.lock().error.clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        let s = self.state.lock();
        Notice::collect(s.error.as_ref(), s.permission)
    }

    /// Snapshot for the presentation layer.
    pub fn view(&self) -> PaneView {
        let selected_input = self.selected_device(Direction::Input);
        let selected_output = self.selected_device(Direction::Output);

        let s = self.state.lock();
        PaneView {
            acquisition: s.acquisition,
            permission: s.permission,
            needs_grant: !s.permission.is_known() && s.stream.is_none(),
            input_devices: PaneView::input_options(
                s.devices.as_deref(),
                selected_input.as_deref(),
                &self.config.unlabeled_device_label,
            ),
            selected_input,
            selected_output,
            notices: Notice::collect(s.error.as_ref(), s.permission),
            error: s.error.clone(),
        }
    }

    /// Release the held stream and drop the controller.
    pub fn dispose(self) {
        log::debug!("disposing permission/device controller");
    }

    // --- Internal helpers ---

    /// Stop the previous stream's tracks, then hold `stream`.
    fn replace_stream(&self, stream: CaptureStream) {
        let previous = self.state.lock().stream.take();
        if let Some(previous) = previous {
            log::debug!("replacing capture stream {}", previous.id());
            previous.stop();
        }
        self.state.lock().stream = Some(stream);
    }

    fn enumerate_for_stream(&self) -> bool {
        if !self.has_stream() {
            log::debug!("skipping device enumeration, no capture stream held");
            return false;
        }

        match self.provider.enumerate_devices() {
            Ok(devices) => {
                log::info!("enumerated {} media device(s)", devices.len());
                self.state.lock().devices = Some(devices.clone());
                if let Some(ref delegate) = self.delegate {
                    delegate.on_devices_updated(&devices);
                }
            }
            Err(e) => {
                log::warn!("device enumeration failed: {}", e);
                self.store_error(FailureStage::Enumeration, e);
            }
        }
        true
    }

    fn store_error(&self, stage: FailureStage, error: PlatformError) {
        let last = LastError { stage, error };
        self.state.lock().error = Some(last.clone());
        if let Some(ref delegate) = self.delegate {
            delegate.on_error(&last);
        }
    }

    fn set_acquisition(&self, new_state: AcquisitionState) {
        self.state.lock().acquisition = new_state;
        if let Some(ref delegate) = self.delegate {
            delegate.on_acquisition_changed(new_state);
        }
    }
}

impl<P: CapabilityProvider> Drop for PermissionDeviceController<P> {
    fn drop(&mut self) {
        if let Some(stream) = self.state.get_mut().stream.take() {
            log::info!("releasing capture stream {} on teardown", stream.id());
            stream.stop();
        }
    }
}
