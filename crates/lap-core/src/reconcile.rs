use lap_types::CaptureMode;

use crate::scaling::ScalingFactor;

/// Where a candidate column maps to, in both spaces the pipeline needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciled {
    /// Absolute virtual desktop position to click
    pub click_x: i32,
    pub click_y: i32,
    /// Position inside the captured image, used for pixel reads and verification
    pub verify_x: i32,
    pub verify_y: i32,
}

/// Map a monitor-local candidate `(x, scan_row)` into click and image coordinates
///
/// A monitor-cropped frame is already monitor-local, so the image position is the
/// candidate itself and only the click position gets DPI scaling plus the monitor
/// offset. A full-desktop frame is indexed in absolute coordinates and is not scaled.
pub fn reconcile(
    x: i32,
    scan_row: i32,
    offset: (i32, i32),
    mode: CaptureMode,
    scaling: ScalingFactor,
) -> Reconciled {
    let (offset_x, offset_y) = offset;

    match mode {
        CaptureMode::CroppedToMonitor => Reconciled {
            click_x: scaling.apply(x) + offset_x,
            click_y: scaling.apply(scan_row) + offset_y,
            verify_x: x,
            verify_y: scan_row,
        },
        CaptureMode::FullDesktop => {
            let abs_x = x + offset_x;
            let abs_y = scan_row + offset_y;
            Reconciled {
                click_x: abs_x,
                click_y: abs_y,
                verify_x: abs_x,
                verify_y: abs_y,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cropped_without_scaling_adds_offset() {
        let r = reconcile(200, 300, (100, 50), CaptureMode::CroppedToMonitor, ScalingFactor::None);
        assert_eq!((r.click_x, r.click_y), (300, 350));
        assert_eq!((r.verify_x, r.verify_y), (200, 300));
    }

    #[test]
    fn test_cropped_with_scaling_truncates_before_offset() {
        let r = reconcile(200, 300, (100, 50), CaptureMode::CroppedToMonitor, ScalingFactor::P150);
        assert_eq!((r.click_x, r.click_y), (234, 251));
        assert_eq!((r.verify_x, r.verify_y), (200, 300));
    }

    #[test]
    fn test_full_desktop_ignores_scaling() {
        for scaling in [ScalingFactor::None, ScalingFactor::P200] {
            let r = reconcile(200, 300, (100, 50), CaptureMode::FullDesktop, scaling);
            assert_eq!((r.click_x, r.click_y), (300, 350));
            assert_eq!((r.verify_x, r.verify_y), (300, 350));
        }
    }

    #[test]
    fn test_negative_monitor_offset() {
        let r = reconcile(10, 20, (-1920, 0), CaptureMode::CroppedToMonitor, ScalingFactor::None);
        assert_eq!((r.click_x, r.click_y), (-1910, 20));
    }
}
