use serde::{Deserialize, Serialize};

/// Microphone permission as reported by the platform permission query.
///
/// `Unknown` covers both "not queried yet" and "the platform cannot answer".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    Granted,
    Denied,
    Prompt,
    #[default]
    Unknown,
}

impl PermissionState {
    /// Parse the platform's permission string (`granted`, `denied`, `prompt`).
    pub fn from_platform(value: &str) -> Self {
        match value {
            "granted" => Self::Granted,
            "denied" => Self::Denied,
            "prompt" => Self::Prompt,
            _ => Self::Unknown,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Permission and stream acquisition state machine.
///
/// State transitions:
/// ```text
/// idle → requesting → granted
///             ↑     ↘ denied ──┐
///             │     ↘ unsupported
///             └────────────────┘ (retry)
/// ```
///
/// No state is terminal; every outcome may re-enter `Requesting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcquisitionState {
    #[default]
    Idle,
    Requesting,
    /// A capture stream is held and enumeration has been triggered.
    Granted,
    /// The stream request failed for any reason while the permission query
    /// still answered. The error slot holds the kind: `NotAllowedError` for
    /// a refusal, otherwise whatever the platform reported (e.g. `NotFoundError`).
    Denied,
    /// The stream request failed and the platform could not report a
    /// permission state either.
    Unsupported,
}

impl AcquisitionState {
    /// Resolve the outcome of one request.
    pub fn resolve(stream_acquired: bool, permission_query_supported: bool) -> Self {
        match (stream_acquired, permission_query_supported) {
            (true, _) => Self::Granted,
            (false, true) => Self::Denied,
            (false, false) => Self::Unsupported,
        }
    }

    pub fn is_requesting(&self) -> bool {
        matches!(self, Self::Requesting)
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Whether the user may start another request from this state.
    pub fn can_retry(&self) -> bool {
        !self.is_requesting()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_platform_permission_strings() {
        assert_eq!(PermissionState::from_platform("granted"), PermissionState::Granted);
        assert_eq!(PermissionState::from_platform("denied"), PermissionState::Denied);
        assert_eq!(PermissionState::from_platform("prompt"), PermissionState::Prompt);
        assert_eq!(PermissionState::from_platform("maybe"), PermissionState::Unknown);
        assert!(!PermissionState::default().is_known());
    }

    #[test]
    fn resolve_prefers_a_held_stream() {
        assert_eq!(AcquisitionState::resolve(true, false), AcquisitionState::Granted);
        assert_eq!(AcquisitionState::resolve(false, true), AcquisitionState::Denied);
        assert_eq!(AcquisitionState::resolve(false, false), AcquisitionState::Unsupported);
    }

    #[test]
    fn only_requesting_blocks_retry() {
        assert!(AcquisitionState::Idle.can_retry());
        assert!(AcquisitionState::Denied.can_retry());
        assert!(!AcquisitionState::Requesting.can_retry());
    }
}
