//! # voice-settings-desktop
//!
//! Desktop backend for voice-settings.
//!
//! Provides:
//! - `HostCapabilityProvider`: `CapabilityProvider` over the default cpal host
//! - `HostCaptureTrack`: microphone track owning a cpal input stream on its own thread
//! - `DeviceEnumerator`: input/output device listing via cpal
//! - `permissions`: microphone permission query (Windows privacy settings; unsupported elsewhere)
//!
//! ## Usage
//! ```ignore
//! use std::sync::Arc;
//! use voice_settings_core::{MemoryPreferenceStore, PermissionDeviceController};
//! use voice_settings_desktop::HostCapabilityProvider;
//!
//! let controller = PermissionDeviceController::new(
//!     HostCapabilityProvider::new(),
//!     Arc::new(MemoryPreferenceStore::new()),
//!     pipeline,
//! );
//! controller.request_permission_and_stream()?;
//! ```

pub mod capture_track;
pub mod device_enumerator;
mod errors;
pub mod host_provider;
pub mod permissions;

pub use capture_track::HostCaptureTrack;
pub use device_enumerator::DeviceEnumerator;
pub use host_provider::HostCapabilityProvider;
