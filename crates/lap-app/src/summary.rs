use std::path::Path;

use lap_config::Config;
use lap_core::geometry::DetectionSettings;
use lap_core::scaling::{Resolution, ScalingFactor};
use lap_types::{CaptureMode, Monitor};

use crate::cli::{HotkeyMode, HotkeyModifier};

pub struct RunSummary<'a> {
    pub settings_path: &'a Path,
    pub config: &'a Config,
    pub monitor: &'a Monitor,
    pub resolution: Resolution,
    pub detection: &'a DetectionSettings,
    pub scaling: ScalingFactor,
    pub capture: CaptureMode,
    pub hotkey: HotkeyMode,
    pub hotkey_modifier: HotkeyModifier,
}

fn enabled(flag: bool) -> &'static str {
    if flag { "Enabled" } else { "Disabled" }
}

impl RunSummary<'_> {
    pub fn lines(&self) -> Vec<String> {
        let config = self.config;
        let key = self.hotkey_modifier.label();
        let mut hotkey = match self.hotkey {
            HotkeyMode::Stop => format!("Press '{key}' to stop during operation."),
            HotkeyMode::Pause => format!("Press '{key}' to pause or resume, Ctrl+C to stop."),
        };
        if self.hotkey_modifier == HotkeyModifier::None {
            hotkey.push_str(" Other applications will not receive 'P' while scanning (see --hotkey-modifier).");
        }

        vec![
            "====== Lobby Auto Player ======".to_string(),
            format!("Settings loaded from {}", self.settings_path.display()),
            format!("Selected monitor: {}", self.monitor.name),
            format!("Monitor resolution: {}", self.resolution),
            format!("Monitor position: {}, {}", self.monitor.x, self.monitor.y),
            format!("Capture mode: {}", self.capture),
            format!("Display scaling: {}", self.scaling),
            format!(
                "Detection row: {} ({:.2}% from top)",
                self.detection.scan_row, config.detection.check_row_percentage
            ),
            format!(
                "Detection range: X{}-{} (right to left scan)",
                self.detection.x_start, self.detection.x_end
            ),
            format!("Target color: {}", self.detection.target_color),
            format!("Secondary color: {}", self.detection.secondary_color),
            format!("Tolerance: {}", self.detection.tolerance),
            format!("Search area: {}px", self.detection.search_area_size),
            format!("Check interval: {}s", config.timing.check_interval),
            format!("Alt+Tab after click: {}", enabled(config.behavior.alt_tab_after_click)),
            format!("Reset cursor position: {}", enabled(config.behavior.reset_cursor_position)),
            format!("Force cursor to monitor: {}", enabled(config.behavior.force_cursor_to_monitor)),
            format!(
                "Debug logging: {}",
                if config.debug.debug_logging { "Enabled (log.txt)" } else { "Disabled" }
            ),
            hotkey,
            "=".repeat(50),
        ]
    }

    /// Print to the console; the same lines go to the debug log
    pub fn display(&self) {
        let lines = self.lines();
        println!("\n{}", lines.join("\n"));

        tracing::debug!("=== CONFIGURATION ===");
        for line in &lines {
            tracing::debug!("{line}");
        }
    }
}

/// Sections and values of the effective configuration, in file order
pub fn config_lines(config: &Config) -> Vec<String> {
    let d = &config.detection;
    vec![
        "[DETECTION]".to_string(),
        format!("CHECK_ROW_PERCENTAGE = {}", d.check_row_percentage),
        format!("X_START_FROM_CENTER = {}", d.x_start_from_center),
        format!("X_END_AT_EDGE = {}", d.x_end_at_edge),
        format!("TARGET_COLOR = {}", d.target_color),
        format!("SECONDARY_COLOR = {}", d.secondary_color),
        format!("TOLERANCE = {}", d.tolerance),
        format!("SEARCH_AREA_SIZE = {}", d.search_area_size),
        "[TIMING]".to_string(),
        format!("CHECK_INTERVAL = {}", config.timing.check_interval),
        "[BEHAVIOR]".to_string(),
        format!("ALT_TAB_AFTER_CLICK = {}", config.behavior.alt_tab_after_click),
        format!("RESET_CURSOR_POSITION = {}", config.behavior.reset_cursor_position),
        format!("FORCE_CURSOR_TO_MONITOR = {}", config.behavior.force_cursor_to_monitor),
        "[DEBUG]".to_string(),
        format!("DEBUG_LOGGING = {}", config.debug.debug_logging),
        "[GUI]".to_string(),
        format!("SELECTED_MONITOR = {}", config.gui.selected_monitor),
        format!("RESOLUTION = {}", config.gui.resolution),
        format!("DARK_MODE = {}", config.gui.dark_mode),
    ]
}
