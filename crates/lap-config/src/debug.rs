use serde::{Deserialize, Serialize};

use crate::store::SettingsStore;

pub const SECTION: &str = "DEBUG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Append debug events to log.txt
    pub debug_logging: bool,
}

impl DebugConfig {
    pub fn from_store(store: &SettingsStore) -> Self {
        Self {
            debug_logging: store.get_bool(SECTION, "DEBUG_LOGGING", false),
        }
    }

    pub fn write_to(&self, store: &mut SettingsStore) {
        store.set(SECTION, "DEBUG_LOGGING", self.debug_logging);
    }
}
