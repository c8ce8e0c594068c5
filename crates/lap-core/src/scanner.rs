use crate::capture::CapturedImage;
use crate::color;
use crate::geometry::DetectionSettings;
use crate::reconcile::reconcile;
use crate::scaling::ScalingFactor;
use crate::verify::verify;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionResult {
    pub found: bool,
    pub click_x: i32,
    pub click_y: i32,
}

impl DetectionResult {
    pub const fn not_found() -> Self {
        Self {
            found: false,
            click_x: 0,
            click_y: 0,
        }
    }

    pub const fn at(click_x: i32, click_y: i32) -> Self {
        Self {
            found: true,
            click_x,
            click_y,
        }
    }
}

/// Scan the detection row right to left for a confirmed button
///
/// Candidates matching the target color are confirmed by looking for the secondary
/// color around them. Unconfirmed candidates are skipped and the scan goes on; the
/// first confirmed candidate from the right wins.
pub fn scan_row(
    image: &CapturedImage,
    settings: &DetectionSettings,
    monitor_offset: (i32, i32),
    scaling: ScalingFactor,
) -> DetectionResult {
    tracing::debug!(
        "Scanning row {} from X{} down to X{} ({} capture)",
        settings.scan_row,
        settings.x_end - 1,
        settings.x_start,
        image.mode()
    );

    for x in (settings.x_start..settings.x_end).rev() {
        let point = reconcile(x, settings.scan_row, monitor_offset, image.mode(), scaling);

        let Some(pixel) = image.pixel(point.verify_x as i64, point.verify_y as i64) else {
            continue;
        };
        if !color::matches(pixel, settings.target_color, settings.tolerance) {
            continue;
        }

        tracing::debug!("Target color match at X{x}: {pixel}");
        tracing::debug!(
            "Coordinates: local ({x}, {}), verify ({}, {}), click ({}, {}), scaling {scaling}",
            settings.scan_row,
            point.verify_x,
            point.verify_y,
            point.click_x,
            point.click_y
        );

        if verify(
            image,
            point.verify_x,
            point.verify_y,
            settings.secondary_color,
            settings.tolerance,
            settings.search_area_size,
        ) {
            tracing::debug!("Button confirmed at ({}, {})", point.click_x, point.click_y);
            return DetectionResult::at(point.click_x, point.click_y);
        }

        tracing::debug!("Secondary color missing around X{x}, continuing");
    }

    DetectionResult::not_found()
}
