//! # voice-settings-core
//!
//! Platform-agnostic core for the voice input settings pane.
//!
//! Requests microphone access, lists media devices once a capture stream is
//! held, and persists the preferred input/output device. Platform backends
//! implement the `CapabilityProvider` trait and plug into the generic
//! `PermissionDeviceController`.
//!
//! ## Architecture
//!
//! ```text
//! voice-settings-core (this crate)
//! ├── traits/       ← CapabilityProvider, MediaTrack, PreferenceStore, VoicePipeline, SettingsDelegate
//! ├── models/       ← SettingsConfig, DeviceDescriptor, PermissionState, AcquisitionState, CaptureStream, errors, PaneView
//! ├── controller/   ← PermissionDeviceController (permission workflow + device selection)
//! └── storage/      ← MemoryPreferenceStore, JsonPreferenceStore
//! ```

pub mod controller;
pub mod models;
pub mod storage;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export key types at crate root for convenience.
pub use controller::PermissionDeviceController;
pub use models::config::{CaptureConstraints, SettingsConfig};
pub use models::device::{DeviceDescriptor, DeviceKind, Direction, MediaKind};
pub use models::error::{ErrorKind, FailureStage, LastError, PlatformError, SettingsError};
pub use models::state::{AcquisitionState, PermissionState};
pub use models::stream::CaptureStream;
pub use models::view::{DeviceOption, Notice, PaneView};
pub use storage::json_store::JsonPreferenceStore;
pub use storage::memory_store::MemoryPreferenceStore;
pub use traits::capability_provider::CapabilityProvider;
pub use traits::media_track::MediaTrack;
pub use traits::preference_store::PreferenceStore;
pub use traits::settings_delegate::SettingsDelegate;
pub use traits::voice_pipeline::VoicePipeline;
