mod commands;
mod session_state;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use voice_settings_core::Direction;

/// Microphone permission and audio device settings for voice chat.
#[derive(Parser)]
#[command(name = "voice-settings", version)]
pub struct Cli {
    /// Preference file (default: <config dir>/voice-settings/preferences.json).
    #[arg(long, env = "VOICE_SETTINGS_STORE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Request microphone access and print the settings pane.
    Show {
        /// Print the pane as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Request microphone access and list every media device.
    Devices {
        #[arg(long)]
        json: bool,
    },
    /// Store the preferred device for a direction (input or output).
    Select { direction: Direction, device_id: String },
    /// Print the stored device for a direction.
    Get { direction: Direction },
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
