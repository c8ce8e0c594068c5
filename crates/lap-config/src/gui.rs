use serde::{Deserialize, Serialize};

use crate::store::SettingsStore;

pub const SECTION: &str = "GUI";

fn default_selected_monitor() -> String {
    "Monitor 1".to_string()
}

fn default_resolution() -> String {
    "1920x1080".to_string()
}

/// Display selection shared by every front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    #[serde(default = "default_selected_monitor")]
    pub selected_monitor: String,
    #[serde(default = "default_resolution")]
    pub resolution: String,
    pub dark_mode: bool,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            selected_monitor: default_selected_monitor(),
            resolution: default_resolution(),
            dark_mode: false,
        }
    }
}

impl GuiConfig {
    pub fn from_store(store: &SettingsStore) -> Self {
        Self {
            selected_monitor: store.get_string(SECTION, "SELECTED_MONITOR", &default_selected_monitor()),
            resolution: store.get_string(SECTION, "RESOLUTION", &default_resolution()),
            dark_mode: store.get_bool(SECTION, "DARK_MODE", false),
        }
    }

    pub fn write_to(&self, store: &mut SettingsStore) {
        store.set(SECTION, "SELECTED_MONITOR", &self.selected_monitor);
        store.set(SECTION, "RESOLUTION", &self.resolution);
        store.set(SECTION, "DARK_MODE", self.dark_mode);
    }
}
