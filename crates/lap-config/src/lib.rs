use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::behavior::BehaviorConfig;
use self::debug::DebugConfig;
use self::detection::DetectionConfig;
use self::gui::GuiConfig;
use self::store::parse_bool;
use self::timing::TimingConfig;

pub mod behavior;
pub mod debug;
pub mod defaults;
pub mod detection;
pub mod error;
pub mod gui;
pub mod store;
pub mod timing;

pub use error::ConfigError;
pub use store::SettingsStore;

pub const SETTINGS_FILE: &str = "settings.ini";
pub const LOG_FILE: &str = "log.txt";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub detection: DetectionConfig,
    pub timing: TimingConfig,
    pub behavior: BehaviorConfig,
    pub debug: DebugConfig,
    pub gui: GuiConfig,
}

impl Config {
    /// Build a typed config, falling back to defaults for anything missing
    pub fn from_store(store: &SettingsStore) -> Self {
        Config {
            detection: DetectionConfig::from_store(store),
            timing: TimingConfig::from_store(store),
            behavior: BehaviorConfig::from_store(store),
            debug: DebugConfig::from_store(store),
            gui: GuiConfig::from_store(store),
        }
    }

    /// Load the settings file (created with defaults if missing)
    pub fn load(path: impl AsRef<Path>) -> Result<(Self, SettingsStore), ConfigError> {
        let store = SettingsStore::load(path)?;
        Ok((Self::from_store(&store), store))
    }

    pub fn write_to(&self, store: &mut SettingsStore) {
        self.detection.write_to(store);
        self.timing.write_to(store);
        self.behavior.write_to(store);
        self.debug.write_to(store);
        self.gui.write_to(store);
    }
}

/// Settings path: explicit argument, then `LAP_SETTINGS`, then `./settings.ini`
pub fn settings_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| env::var_os("LAP_SETTINGS").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
}

/// Debug log lives next to the settings file
pub fn log_path(settings: &Path) -> PathBuf {
    settings
        .parent()
        .map(|dir| dir.join(LOG_FILE))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE))
}

enum Kind {
    Int { min: i64, max: i64 },
    Float { min: f64, max: f64 },
    Bool,
    Text,
}

fn kind_of(section: &str, key: &str) -> Option<Kind> {
    let kind = match (section, key) {
        ("DETECTION", "CHECK_ROW_PERCENTAGE") => Kind::Float { min: 0.0, max: 100.0 },
        ("DETECTION", "X_START_FROM_CENTER" | "X_END_AT_EDGE") => Kind::Int { min: -1, max: i32::MAX as i64 },
        ("DETECTION", k) if k.starts_with("TARGET_COLOR_") || k.starts_with("SECONDARY_COLOR_") => {
            Kind::Int { min: 0, max: 255 }
        }
        ("DETECTION", "TOLERANCE") => Kind::Int { min: 0, max: 255 },
        ("DETECTION", "SEARCH_AREA_SIZE") => Kind::Int { min: 1, max: u32::MAX as i64 },
        ("TIMING", "CHECK_INTERVAL") => Kind::Float {
            min: 0.0,
            max: timing::MAX_CHECK_INTERVAL,
        },
        ("BEHAVIOR", _) | ("DEBUG", "DEBUG_LOGGING") | ("GUI", "DARK_MODE") => Kind::Bool,
        ("GUI", _) => Kind::Text,
        _ => return None,
    };
    Some(kind)
}

/// Reject values for known keys that would be replaced by defaults on load
pub fn validate_entry(section: &str, key: &str, value: &str) -> Result<(), ConfigError> {
    let section = section.to_uppercase();
    let key = key.to_uppercase();

    let invalid = |reason: String| ConfigError::InvalidValue {
        section: section.clone(),
        key: key.clone(),
        value: value.to_string(),
        reason,
    };

    if value.chars().any(char::is_control) {
        return Err(invalid("control characters are not allowed".to_string()));
    }

    match kind_of(&section, &key) {
        Some(Kind::Int { min, max }) => {
            let parsed: i64 = value
                .trim()
                .parse()
                .map_err(|_| invalid("expected an integer".to_string()))?;
            if parsed < min || parsed > max {
                return Err(invalid(format!("expected a value in {min}..={max}")));
            }
        }
        Some(Kind::Float { min, max }) => {
            let parsed: f64 = value
                .trim()
                .parse()
                .map_err(|_| invalid("expected a number".to_string()))?;
            if !parsed.is_finite() || parsed < min || parsed > max {
                return Err(invalid(format!("expected a number in {min}..={max}")));
            }
        }
        Some(Kind::Bool) => {
            parse_bool(value).ok_or_else(|| invalid("expected true or false".to_string()))?;
        }
        Some(Kind::Text) | None => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lap_types::Color;

    #[test]
    fn test_defaults_match_default_file() {
        let config = Config::from_store(&SettingsStore::defaults());
        assert_eq!(config, Config::default());
        assert_eq!(config.detection.target_color, Color::new(59, 1, 0));
        assert_eq!(config.detection.secondary_color, Color::new(246, 175, 100));
        assert!(config.behavior.reset_cursor_position);
        assert!(!config.behavior.force_cursor_to_monitor);
        assert_eq!(config.gui.resolution, "1920x1080");
    }

    #[test]
    fn test_empty_store_uses_defaults() {
        let store = SettingsStore::parse("").unwrap();
        assert_eq!(Config::from_store(&store), Config::default());
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let store = SettingsStore::parse(
            "[DETECTION]\nTARGET_COLOR_R = 300\nTOLERANCE = -4\nSEARCH_AREA_SIZE = 0\nCHECK_ROW_PERCENTAGE = 140\n",
        )
        .unwrap();
        let detection = DetectionConfig::from_store(&store);
        assert_eq!(detection.target_color.r, 255);
        assert_eq!(detection.tolerance, 0);
        assert_eq!(detection.search_area_size, 50);
        assert_eq!(detection.check_row_percentage, 100.0);
    }

    #[test]
    fn test_write_to_preserves_unchanged_text() {
        let mut store = SettingsStore::defaults();
        let before = store.render();
        Config::from_store(&store).write_to(&mut store);
        assert_eq!(store.render(), before);
    }

    #[test]
    fn test_write_to_updates_values() {
        let mut store = SettingsStore::defaults();
        let mut config = Config::from_store(&store);
        config.detection.tolerance = 25;
        config.gui.dark_mode = true;
        config.write_to(&mut store);

        let reloaded = Config::from_store(&SettingsStore::parse(&store.render()).unwrap());
        assert_eq!(reloaded.detection.tolerance, 25);
        assert!(reloaded.gui.dark_mode);
    }

    #[test]
    fn test_validate_entry() {
        assert!(validate_entry("detection", "tolerance", "12").is_ok());
        assert!(validate_entry("DETECTION", "TOLERANCE", "256").is_err());
        assert!(validate_entry("TIMING", "CHECK_INTERVAL", "abc").is_err());
        assert!(validate_entry("BEHAVIOR", "ALT_TAB_AFTER_CLICK", "yes").is_ok());
        assert!(validate_entry("GUI", "RESOLUTION", "2560x1440").is_ok());
        assert!(validate_entry("CUSTOM", "ANYTHING", "goes").is_ok());
    }

    #[test]
    fn test_validate_entry_bounds_check_interval() {
        assert!(validate_entry("TIMING", "CHECK_INTERVAL", "2.5").is_ok());
        assert!(validate_entry("TIMING", "CHECK_INTERVAL", "86400").is_ok());
        assert!(validate_entry("TIMING", "CHECK_INTERVAL", "1e20").is_err());
    }

    #[test]
    fn test_validate_entry_rejects_line_breaks() {
        assert!(validate_entry("GUI", "SELECTED_MONITOR", "Monitor 1\n[DETECTION]").is_err());
        assert!(validate_entry("GUI", "RESOLUTION", "1920x1080\r").is_err());
        assert!(validate_entry("CUSTOM", "NOTE", "a\tb").is_err());
    }

    #[test]
    fn test_log_path_is_next_to_settings() {
        assert_eq!(log_path(Path::new("/tmp/lap/settings.ini")), PathBuf::from("/tmp/lap/log.txt"));
    }
}
