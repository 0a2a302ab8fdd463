use serde::{Deserialize, Serialize};

/// Kind of media carried by a track or produced by the voice pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
}

/// Kind of hardware endpoint reported by device enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceKind {
    #[serde(rename = "audioinput")]
    AudioInput,
    #[serde(rename = "audiooutput")]
    AudioOutput,
    #[serde(rename = "videoinput")]
    VideoInput,
}

impl DeviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AudioInput => "audioinput",
            Self::AudioOutput => "audiooutput",
            Self::VideoInput => "videoinput",
        }
    }
}

/// Metadata about one input or output device.
///
/// Labels are redacted (empty) by most platforms until a capture stream
/// has been granted, so callers should go through [`display_label`].
///
/// [`display_label`]: DeviceDescriptor::display_label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDescriptor {
    pub device_id: String,
    pub kind: DeviceKind,
    pub label: String,
    pub group_id: Option<String>,
}

impl DeviceDescriptor {
    pub fn new(device_id: impl Into<String>, kind: DeviceKind, label: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            kind,
            label: label.into(),
            group_id: None,
        }
    }

    pub fn is_audio_input(&self) -> bool {
        self.kind == DeviceKind::AudioInput
    }

    pub fn is_labeled(&self) -> bool {
        !self.label.trim().is_empty()
    }

    /// The label, or `fallback` when the platform withheld it.
    pub fn display_label<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.is_labeled() {
            &self.label
        } else {
            fallback
        }
    }
}

/// Which side of the voice path a device selection applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "input" => Ok(Self::Input),
            "output" => Ok(Self::Output),
            other => Err(format!("unknown device direction: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_label_falls_back_when_redacted() {
        let redacted = DeviceDescriptor::new("abc", DeviceKind::AudioInput, "");
        assert_eq!(redacted.display_label("Unnamed device"), "Unnamed device");

        let blank = DeviceDescriptor::new("abc", DeviceKind::AudioInput, "   ");
        assert!(!blank.is_labeled());

        let named = DeviceDescriptor::new("abc", DeviceKind::AudioInput, "USB Mic");
        assert_eq!(named.display_label("Unnamed device"), "USB Mic");
    }

    #[test]
    fn device_kind_uses_platform_names() {
        let json = serde_json::to_string(&DeviceKind::AudioOutput).unwrap();
        assert_eq!(json, "\"audiooutput\"");
        assert_eq!(DeviceKind::AudioInput.as_str(), "audioinput");
    }

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("Input".parse::<Direction>().unwrap(), Direction::Input);
        assert_eq!(" output ".parse::<Direction>().unwrap(), Direction::Output);
        assert!("sideways".parse::<Direction>().is_err());
    }
}
