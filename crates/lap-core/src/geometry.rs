use lap_config::detection::DetectionConfig;
use lap_types::Color;

/// Detection parameters resolved against one monitor's size
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionSettings {
    /// First scanned column (inclusive)
    pub x_start: i32,
    /// Last scanned column (exclusive)
    pub x_end: i32,
    pub scan_row: i32,
    pub target_color: Color,
    pub secondary_color: Color,
    pub tolerance: u8,
    pub search_area_size: u32,
}

impl DetectionSettings {
    /// `-1` for the x bounds means the horizontal center and the right edge.
    /// The result always satisfies `x_start <= x_end <= width` and `scan_row < height`.
    pub fn resolve(config: &DetectionConfig, width: u32, height: u32) -> Self {
        let width = width.min(i32::MAX as u32) as i32;
        let height = height.min(i32::MAX as u32) as i32;

        let x_end = match config.x_end_at_edge {
            -1 => width,
            x => x.clamp(0, width),
        };
        let x_start = match config.x_start_from_center {
            -1 => width / 2,
            x => x.clamp(0, width),
        }
        .min(x_end);

        let scan_row = (config.check_row_percentage / 100.0 * height as f64) as i32;
        let scan_row = scan_row.clamp(0, (height - 1).max(0));

        Self {
            x_start,
            x_end,
            scan_row,
            target_color: config.target_color,
            secondary_color: config.secondary_color,
            tolerance: config.tolerance,
            search_area_size: config.search_area_size.max(1),
        }
    }

    pub fn columns(&self) -> i32 {
        self.x_end - self.x_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_on_1080p() {
        let settings = DetectionSettings::resolve(&DetectionConfig::default(), 1920, 1080);
        assert_eq!(settings.x_start, 960);
        assert_eq!(settings.x_end, 1920);
        // 74.17% of 1080 = 801.036
        assert_eq!(settings.scan_row, 801);
        assert_eq!(settings.columns(), 960);
    }

    #[test]
    fn test_explicit_bounds() {
        let config = DetectionConfig {
            x_start_from_center: 100,
            x_end_at_edge: 400,
            check_row_percentage: 50.0,
            ..Default::default()
        };
        let settings = DetectionSettings::resolve(&config, 800, 600);
        assert_eq!((settings.x_start, settings.x_end, settings.scan_row), (100, 400, 300));
    }

    #[test]
    fn test_bounds_are_clamped() {
        let config = DetectionConfig {
            x_start_from_center: 5000,
            x_end_at_edge: 9000,
            check_row_percentage: 100.0,
            ..Default::default()
        };
        let settings = DetectionSettings::resolve(&config, 800, 600);
        assert_eq!(settings.x_end, 800);
        assert_eq!(settings.x_start, 800);
        assert_eq!(settings.scan_row, 599);

        let config = DetectionConfig {
            x_start_from_center: 700,
            x_end_at_edge: 200,
            ..Default::default()
        };
        let settings = DetectionSettings::resolve(&config, 800, 600);
        assert!(settings.x_start <= settings.x_end);
    }
}
