use lap_types::Color;

use crate::capture::CapturedImage;
use crate::color;

/// Clamped search window `[x0, x1) x [y0, y1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub x0: i64,
    pub x1: i64,
    pub y0: i64,
    pub y1: i64,
}

impl SearchWindow {
    /// Square of side `size` around the center, clipped to a `width x height` raster
    pub fn around(center_x: i32, center_y: i32, size: u32, width: u32, height: u32) -> Self {
        let half = (size / 2) as i64;
        let (cx, cy) = (center_x as i64, center_y as i64);

        Self {
            x0: (cx - half).max(0),
            x1: (cx - half + size as i64).min(width as i64),
            y0: (cy - half).max(0),
            y1: (cy - half + size as i64).min(height as i64),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }
}

/// Look for `secondary` anywhere in the window around the candidate
///
/// Every pixel of the window is checked. Pixels outside the image are never read.
pub fn verify(
    image: &CapturedImage,
    center_x: i32,
    center_y: i32,
    secondary: Color,
    tolerance: u8,
    search_area_size: u32,
) -> bool {
    let window = SearchWindow::around(center_x, center_y, search_area_size, image.width(), image.height());
    tracing::debug!(
        "Secondary color search area: X{}-{}, Y{}-{} around ({center_x}, {center_y})",
        window.x0,
        window.x1,
        window.y0,
        window.y1
    );

    if window.is_empty() {
        tracing::debug!("Secondary color search area is outside the image");
        return false;
    }

    for x in window.x0..window.x1 {
        for y in window.y0..window.y1 {
            let Some(pixel) = image.pixel(x, y) else {
                continue;
            };
            if color::matches(pixel, secondary, tolerance) {
                tracing::debug!("Found secondary color at X{x}, Y{y}: {pixel}");
                return true;
            }
        }
    }

    tracing::debug!("Secondary color not found in search area");
    false
}
