use lap_types::Color;
use serde::{Deserialize, Serialize};

use crate::store::SettingsStore;

pub const SECTION: &str = "DETECTION";

fn default_check_row_percentage() -> f64 {
    74.17
}

fn default_x_start_from_center() -> i32 {
    -1
}

fn default_x_end_at_edge() -> i32 {
    -1
}

fn default_target_color() -> Color {
    Color::new(59, 1, 0)
}

fn default_secondary_color() -> Color {
    Color::new(246, 175, 100)
}

fn default_tolerance() -> u8 {
    10
}

fn default_search_area_size() -> u32 {
    50
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Scan row as a percentage of the monitor height
    #[serde(default = "default_check_row_percentage")]
    pub check_row_percentage: f64,
    /// First scanned column, -1 means the horizontal center
    #[serde(default = "default_x_start_from_center")]
    pub x_start_from_center: i32,
    /// End of the scanned columns (exclusive), -1 means the right edge
    #[serde(default = "default_x_end_at_edge")]
    pub x_end_at_edge: i32,
    #[serde(default = "default_target_color")]
    pub target_color: Color,
    #[serde(default = "default_secondary_color")]
    pub secondary_color: Color,
    #[serde(default = "default_tolerance")]
    pub tolerance: u8,
    /// Side of the square searched for the secondary color
    #[serde(default = "default_search_area_size")]
    pub search_area_size: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            check_row_percentage: default_check_row_percentage(),
            x_start_from_center: default_x_start_from_center(),
            x_end_at_edge: default_x_end_at_edge(),
            target_color: default_target_color(),
            secondary_color: default_secondary_color(),
            tolerance: default_tolerance(),
            search_area_size: default_search_area_size(),
        }
    }
}

fn channel(store: &SettingsStore, key: &str, default: u8) -> u8 {
    store.get_or(SECTION, key, default as i64).clamp(0, 255) as u8
}

fn color(store: &SettingsStore, prefix: &str, default: Color) -> Color {
    Color::new(
        channel(store, &format!("{prefix}_R"), default.r),
        channel(store, &format!("{prefix}_G"), default.g),
        channel(store, &format!("{prefix}_B"), default.b),
    )
}

impl DetectionConfig {
    pub fn from_store(store: &SettingsStore) -> Self {
        let defaults = Self::default();

        let percentage = store.get_or(SECTION, "CHECK_ROW_PERCENTAGE", defaults.check_row_percentage);
        let search_area_size = store.get_or(SECTION, "SEARCH_AREA_SIZE", defaults.search_area_size as i64);

        Self {
            check_row_percentage: if percentage.is_finite() {
                percentage.clamp(0.0, 100.0)
            } else {
                defaults.check_row_percentage
            },
            x_start_from_center: store.get_or(SECTION, "X_START_FROM_CENTER", defaults.x_start_from_center),
            x_end_at_edge: store.get_or(SECTION, "X_END_AT_EDGE", defaults.x_end_at_edge),
            target_color: color(store, "TARGET_COLOR", defaults.target_color),
            secondary_color: color(store, "SECONDARY_COLOR", defaults.secondary_color),
            tolerance: store.get_or(SECTION, "TOLERANCE", defaults.tolerance as i64).clamp(0, 255) as u8,
            search_area_size: if search_area_size > 0 {
                search_area_size as u32
            } else {
                defaults.search_area_size
            },
        }
    }

    pub fn write_to(&self, store: &mut SettingsStore) {
        store.set(SECTION, "CHECK_ROW_PERCENTAGE", format!("{:?}", self.check_row_percentage));
        store.set(SECTION, "X_START_FROM_CENTER", self.x_start_from_center);
        store.set(SECTION, "X_END_AT_EDGE", self.x_end_at_edge);
        store.set(SECTION, "TARGET_COLOR_R", self.target_color.r);
        store.set(SECTION, "TARGET_COLOR_G", self.target_color.g);
        store.set(SECTION, "TARGET_COLOR_B", self.target_color.b);
        store.set(SECTION, "SECONDARY_COLOR_R", self.secondary_color.r);
        store.set(SECTION, "SECONDARY_COLOR_G", self.secondary_color.g);
        store.set(SECTION, "SECONDARY_COLOR_B", self.secondary_color.b);
        store.set(SECTION, "TOLERANCE", self.tolerance);
        store.set(SECTION, "SEARCH_AREA_SIZE", self.search_area_size);
    }
}
