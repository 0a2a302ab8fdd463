use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use voice_settings_core::{
    DeviceDescriptor, Direction, JsonPreferenceStore, Notice, PaneView, PermissionDeviceController,
    PreferenceStore, SettingsConfig,
};
use voice_settings_desktop::HostCapabilityProvider;

use crate::session_state::{DetachedPipeline, LogDelegate};
use crate::{Cli, Command};

type Controller = PermissionDeviceController<HostCapabilityProvider>;

fn default_store_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("voice-settings")
        .join("preferences.json")
}

fn build_controller(store: Option<PathBuf>) -> Result<Controller, String> {
    let path = store.unwrap_or_else(default_store_path);
    log::debug!("using preference file {}", path.display());

    let store = JsonPreferenceStore::open(path).map_err(|e| e.to_string())?;
    let config = SettingsConfig::default();

    // Capture on the stored input device, if any.
    let preferred_input = store.get(config.preference_key(Direction::Input));
    if let Some(ref name) = preferred_input {
        log::debug!("capturing on preferred input {}", name);
    }
    let provider = HostCapabilityProvider::new().with_input_device(preferred_input);

    let mut controller = PermissionDeviceController::with_config(
        provider,
        Arc::new(store),
        Arc::new(DetachedPipeline),
        config,
    )
    .map_err(|e| e.to_string())?;
    controller.set_delegate(Arc::new(LogDelegate));
    Ok(controller)
}

pub fn run(cli: Cli) -> Result<(), String> {
    let controller = build_controller(cli.store)?;

    match cli.command {
        Command::Show { json } => {
            controller.request_permission_and_stream().map_err(|e| e.to_string())?;
            let view = controller.view();
            if json {
                println!("{}", to_json(&view)?);
            } else {
                print!("{}", render_view(&view));
            }
        }
        Command::Devices { json } => {
            controller.request_permission_and_stream().map_err(|e| e.to_string())?;
            let devices = controller.devices().unwrap_or_default();
            if json {
                println!("{}", to_json(&devices)?);
            } else {
                print!("{}", render_devices(&devices));
            }
            if let Some(error) = controller.last_error() {
                return Err(error.error.to_string());
            }
        }
        Command::Select { direction, device_id } => {
            controller.select_device(&device_id, direction).map_err(|e| e.to_string())?;
            println!("{} device set to {}", direction, device_id);
        }
        Command::Get { direction } => match controller.selected_device(direction) {
            Some(id) => println!("{}", id),
            None => println!("(system default)"),
        },
    }

    controller.dispose();
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| e.to_string())
}

fn notice_text(notice: Notice) -> &'static str {
    match notice {
        Notice::PermissionBlocked => {
            "! Microphone access is blocked. Allow it in your system privacy settings."
        }
        Notice::PermissionPending => "? Microphone access was not granted. Run again to retry.",
        Notice::EnumerationFailed => "? Could not list audio devices. Run again to retry.",
    }
}

pub fn render_view(view: &PaneView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Input device");
    if view.needs_grant {
        let _ = writeln!(out, "  Microphone access is needed to list devices by name.");
    }
    if view.input_devices.is_empty() {
        let _ = writeln!(out, "  (no input devices)");
    }
    for option in &view.input_devices {
        let marker = if option.selected { "*" } else { " " };
        let _ = writeln!(out, "  {} {}  [{}]", marker, option.label, option.device_id);
    }
    let _ = writeln!(
        out,
        "Output device: {}",
        view.selected_output.as_deref().unwrap_or("(system default)")
    );
    for notice in &view.notices {
        let _ = writeln!(out, "{}", notice_text(*notice));
    }
    out
}

pub fn render_devices(devices: &[DeviceDescriptor]) -> String {
    let mut out = String::new();
    for device in devices {
        let _ = writeln!(
            out,
            "{:<12} {}",
            device.kind.as_str(),
            device.display_label(&device.device_id)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use voice_settings_core::{AcquisitionState, DeviceKind, DeviceOption, PermissionState};

    fn view() -> PaneView {
        PaneView {
            acquisition: AcquisitionState::Granted,
            permission: PermissionState::Granted,
            needs_grant: false,
            input_devices: vec![
                DeviceOption {
                    device_id: "mic-1".into(),
                    label: "Desk Mic".into(),
                    selected: true,
                },
                DeviceOption {
                    device_id: "mic-2".into(),
                    label: "Unnamed device".into(),
                    selected: false,
                },
            ],
            selected_input: Some("mic-1".into()),
            selected_output: None,
            notices: Vec::new(),
            error: None,
        }
    }

    #[test]
    fn marks_selected_input() {
        let text = render_view(&view());
        assert!(text.contains("* Desk Mic  [mic-1]"));
        assert!(text.contains("  Unnamed device  [mic-2]"));
        assert!(text.contains("Output device: (system default)"));
        assert!(!text.contains("Microphone access is needed"));
    }

    #[test]
    fn shows_blocking_notice() {
        let mut v = view();
        v.input_devices.clear();
        v.needs_grant = true;
        v.notices = vec![Notice::PermissionBlocked];

        let text = render_view(&v);
        assert!(text.contains("(no input devices)"));
        assert!(text.contains("Microphone access is needed"));
        assert!(text.contains("blocked"));
    }

    fn temp_store_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("voice_settings_cli_test_{}_{}", std::process::id(), name))
    }

    #[test]
    fn controller_captures_on_stored_input() {
        let path = temp_store_path("pinned.json");
        std::fs::remove_file(&path).ok();
        JsonPreferenceStore::open(&path)
            .unwrap()
            .set("audioInputDevice", "USB Headset")
            .unwrap();

        let controller = build_controller(Some(path.clone())).unwrap();
        assert_eq!(controller.provider().input_device(), Some("USB Headset"));
        assert_eq!(controller.selected_device(Direction::Input).as_deref(), Some("USB Headset"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn controller_uses_default_input_without_preference() {
        let path = temp_store_path("empty.json");
        std::fs::remove_file(&path).ok();

        let controller = build_controller(Some(path)).unwrap();
        assert_eq!(controller.provider().input_device(), None);
    }

    #[test]
    fn device_list_uses_id_when_unlabeled() {
        let devices = vec![
            DeviceDescriptor::new("hw:0", DeviceKind::AudioInput, ""),
            DeviceDescriptor::new("spk", DeviceKind::AudioOutput, "Speakers"),
        ];
        let text = render_devices(&devices);
        assert!(text.contains("audioinput   hw:0"));
        assert!(text.contains("audiooutput  Speakers"));
    }
}
