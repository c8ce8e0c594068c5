use serde::{Deserialize, Serialize};

use crate::store::SettingsStore;

pub const SECTION: &str = "BEHAVIOR";

fn default_reset_cursor_position() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Send Alt+Tab after the confirm key
    pub alt_tab_after_click: bool,
    /// Put the cursor back where it was before clicking
    #[serde(default = "default_reset_cursor_position")]
    pub reset_cursor_position: bool,
    /// Move the cursor onto the target monitor before clicking
    pub force_cursor_to_monitor: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            alt_tab_after_click: false,
            reset_cursor_position: default_reset_cursor_position(),
            force_cursor_to_monitor: false,
        }
    }
}

impl BehaviorConfig {
    pub fn from_store(store: &SettingsStore) -> Self {
        let defaults = Self::default();
        Self {
            alt_tab_after_click: store.get_bool(SECTION, "ALT_TAB_AFTER_CLICK", defaults.alt_tab_after_click),
            reset_cursor_position: store.get_bool(
                SECTION,
                "RESET_CURSOR_POSITION",
                defaults.reset_cursor_position,
            ),
            force_cursor_to_monitor: store.get_bool(
                SECTION,
                "FORCE_CURSOR_TO_MONITOR",
                defaults.force_cursor_to_monitor,
            ),
        }
    }

    pub fn write_to(&self, store: &mut SettingsStore) {
        store.set(SECTION, "ALT_TAB_AFTER_CLICK", self.alt_tab_after_click);
        store.set(SECTION, "RESET_CURSOR_POSITION", self.reset_cursor_position);
        store.set(SECTION, "FORCE_CURSOR_TO_MONITOR", self.force_cursor_to_monitor);
    }
}
