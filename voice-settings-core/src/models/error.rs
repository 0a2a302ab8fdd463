use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error kinds reported by the platform capability layer.
///
/// Names follow the platform's own error names so they can be matched
/// against what the host reports (e.g. `NotAllowedError`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The user or the OS refused access to the capability.
    NotAllowed,
    /// No device satisfies the request.
    NotFound,
    /// A device exists but could not be opened.
    NotReadable,
    Overconstrained,
    Security,
    Abort,
    /// The request itself was malformed.
    Type,
    /// The platform does not implement the call.
    NotSupported,
    Other(String),
}

impl ErrorKind {
    pub fn name(&self) -> &str {
        match self {
            Self::NotAllowed => "NotAllowedError",
            Self::NotFound => "NotFoundError",
            Self::NotReadable => "NotReadableError",
            Self::Overconstrained => "OverconstrainedError",
            Self::Security => "SecurityError",
            Self::Abort => "AbortError",
            Self::Type => "TypeError",
            Self::NotSupported => "NotSupportedError",
            Self::Other(name) => name,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "NotAllowedError" => Self::NotAllowed,
            "NotFoundError" => Self::NotFound,
            "NotReadableError" => Self::NotReadable,
            "OverconstrainedError" => Self::Overconstrained,
            "SecurityError" => Self::Security,
            "AbortError" => Self::Abort,
            "TypeError" => Self::Type,
            "NotSupportedError" => Self::NotSupported,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error descriptor returned by a capability provider call.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct PlatformError {
    pub kind: ErrorKind,
    pub message: String,
}

impl PlatformError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_allowed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotAllowed, message)
    }

    pub fn not_supported(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotSupported, message)
    }

    pub fn is_not_allowed(&self) -> bool {
        self.kind == ErrorKind::NotAllowed
    }
}

/// Which controller step produced the stored error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureStage {
    Capture,
    Enumeration,
}

/// The controller's single error slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastError {
    pub stage: FailureStage,
    pub error: PlatformError,
}

impl LastError {
    pub fn kind(&self) -> &ErrorKind {
        &self.error.kind
    }
}

/// Errors returned by controller and collaborator operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("a permission request is already in flight")]
    RequestInFlight,

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("voice pipeline error: {0}")]
    PipelineError(String),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_match_platform_names() {
        for name in [
            "NotAllowedError",
            "NotFoundError",
            "NotReadableError",
            "OverconstrainedError",
            "SecurityError",
            "AbortError",
            "TypeError",
            "NotSupportedError",
        ] {
            assert_eq!(ErrorKind::from_name(name).name(), name);
        }

        let custom = ErrorKind::from_name("QuotaExceededError");
        assert_eq!(custom, ErrorKind::Other("QuotaExceededError".into()));
        assert_eq!(custom.name(), "QuotaExceededError");
    }

    #[test]
    fn platform_error_display_includes_kind() {
        let err = PlatformError::not_allowed("permission denied by user");
        assert!(err.is_not_allowed());
        assert_eq!(err.to_string(), "NotAllowedError: permission denied by user");
    }
}
