use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::store::SettingsStore;

pub const SECTION: &str = "TIMING";

/// Longest accepted pause between scans, in seconds
pub const MAX_CHECK_INTERVAL: f64 = 86_400.0;

fn default_check_interval() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Seconds between scans
    #[serde(default = "default_check_interval")]
    pub check_interval: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            check_interval: default_check_interval(),
        }
    }
}

impl TimingConfig {
    pub fn from_store(store: &SettingsStore) -> Self {
        let check_interval = store.get_or(SECTION, "CHECK_INTERVAL", default_check_interval());
        Self {
            check_interval: if (0.0..=MAX_CHECK_INTERVAL).contains(&check_interval) {
                check_interval
            } else {
                default_check_interval()
            },
        }
    }

    pub fn write_to(&self, store: &mut SettingsStore) {
        store.set(SECTION, "CHECK_INTERVAL", format!("{:?}", self.check_interval));
    }

    pub fn interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.check_interval.clamp(0.0, MAX_CHECK_INTERVAL))
            .unwrap_or_else(|_| Duration::from_secs_f64(default_check_interval()))
    }
}
