use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about = "Clicks the lobby button when it shows up on screen", long_about = None)]
pub struct Cli {
    /// Settings file (defaults to $LAP_SETTINGS, then ./settings.ini)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// No subcommand means `run` with default arguments
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or_else(|| Command::Run(RunArgs::default()))
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Scan for the button and click it until stopped
    Run(RunArgs),
    /// List connected monitors
    Monitors,
    /// Print the effective configuration
    Config {
        #[arg(long)]
        json: bool,
    },
    /// Update one setting, keeping the rest of the file as is
    Set {
        /// SECTION.KEY, e.g. DETECTION.TOLERANCE
        key: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Write the default settings file if there is none
    Init,
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct RunArgs {
    /// Monitor number (1-based) or name; overrides GUI.SELECTED_MONITOR
    #[arg(long)]
    pub monitor: Option<String>,

    /// Capture resolution such as 1920x1080; overrides GUI.RESOLUTION
    #[arg(long)]
    pub resolution: Option<String>,

    /// Windows display scaling, e.g. 1.25 or 1.5
    #[arg(long, conflicts_with = "auto_scaling")]
    pub scaling: Option<f64>,

    /// Guess the display scaling from the monitor size
    #[arg(long)]
    pub auto_scaling: bool,

    /// What the P key does
    #[arg(long, value_enum, default_value_t)]
    pub hotkey: HotkeyMode,

    /// Modifier held with P; a bare P is taken away from every other application
    #[arg(long, value_enum, default_value_t)]
    pub hotkey_modifier: HotkeyModifier,

    /// Exit on errors without waiting for Enter
    #[arg(long)]
    pub no_prompt: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HotkeyMode {
    /// P stops scanning
    #[default]
    Stop,
    /// P pauses and resumes scanning
    Pause,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HotkeyModifier {
    #[default]
    None,
    Ctrl,
    Alt,
    Shift,
}

impl HotkeyModifier {
    pub fn label(self) -> &'static str {
        match self {
            HotkeyModifier::None => "P",
            HotkeyModifier::Ctrl => "Ctrl+P",
            HotkeyModifier::Alt => "Alt+P",
            HotkeyModifier::Shift => "Shift+P",
        }
    }
}

/// Split `SECTION.KEY` into its parts
pub fn split_key(key: &str) -> Option<(String, String)> {
    let (section, name) = key.split_once('.')?;
    let (section, name) = (section.trim(), name.trim());
    if section.is_empty() || name.is_empty() {
        return None;
    }
    Some((section.to_uppercase(), name.to_uppercase()))
}
