use image::RgbaImage;
use image::imageops;
use lap_core::capture::{CapturedImage, ScreenCapture};
use lap_core::error::CaptureError;
use lap_core::scaling::Resolution;
use lap_types::{CaptureMode, Monitor};

fn backend(e: xcap::XCapError) -> CaptureError {
    CaptureError::Backend(e.to_string())
}

fn find_monitor(monitor: &Monitor) -> Result<xcap::Monitor, CaptureError> {
    let mut monitors = xcap::Monitor::all().map_err(backend)?;
    if monitors.is_empty() {
        return Err(CaptureError::NoMonitor);
    }

    let same_geometry = |m: &xcap::Monitor| {
        m.x() == monitor.x && m.y() == monitor.y && m.width() == monitor.width && m.height() == monitor.height
    };

    let position = monitors
        .get(monitor.index)
        .filter(|m| same_geometry(m))
        .map(|_| monitor.index)
        .or_else(|| monitors.iter().position(same_geometry))
        .ok_or_else(|| CaptureError::MonitorNotFound(monitor.name.clone()))?;

    Ok(monitors.swap_remove(position))
}

/// Top-left `resolution` of the frame, or the whole frame if it is smaller
pub fn crop_to_resolution(image: &RgbaImage, resolution: Resolution) -> RgbaImage {
    let width = resolution.width.min(image.width());
    let height = resolution.height.min(image.height());
    if width == image.width() && height == image.height() {
        return image.clone();
    }
    imageops::crop_imm(image, 0, 0, width, height).to_image()
}

/// Lay frames out at their absolute desktop positions on one raster anchored at (0, 0)
///
/// Parts of monitors left of or above the origin fall outside the raster.
pub fn composite(frames: &[(i32, i32, RgbaImage)]) -> RgbaImage {
    let width = frames
        .iter()
        .map(|(x, _, image)| (*x as i64 + image.width() as i64).max(0))
        .max()
        .unwrap_or(0);
    let height = frames
        .iter()
        .map(|(_, y, image)| (*y as i64 + image.height() as i64).max(0))
        .max()
        .unwrap_or(0);

    let mut desktop = RgbaImage::new(width as u32, height as u32);
    for (x, y, image) in frames {
        imageops::overlay(&mut desktop, image, *x as i64, *y as i64);
    }
    desktop
}

fn capture_cropped(monitor: &Monitor, resolution: Resolution) -> Result<RgbaImage, CaptureError> {
    let source = find_monitor(monitor)?;
    let image = source.capture_image().map_err(backend)?;
    Ok(crop_to_resolution(&image, resolution))
}

fn capture_desktop() -> Result<RgbaImage, CaptureError> {
    let monitors = xcap::Monitor::all().map_err(backend)?;
    if monitors.is_empty() {
        return Err(CaptureError::NoMonitor);
    }

    let mut frames = Vec::with_capacity(monitors.len());
    for m in &monitors {
        frames.push((m.x(), m.y(), m.capture_image().map_err(backend)?));
    }
    Ok(composite(&frames))
}

/// Screen capture backed by xcap, in whichever mode worked at startup
pub struct CaptureStrategy {
    mode: CaptureMode,
}

impl CaptureStrategy {
    /// Try a per-monitor capture once; fall back to compositing the whole desktop
    pub fn probe(monitor: &Monitor, resolution: Resolution) -> Self {
        let mode = match capture_cropped(monitor, resolution) {
            Ok(image) => {
                tracing::info!(
                    "Per-monitor capture available ({}x{} from {})",
                    image.width(),
                    image.height(),
                    monitor.name
                );
                CaptureMode::CroppedToMonitor
            }
            Err(e) => {
                tracing::warn!("Per-monitor capture failed ({e}), capturing the full desktop instead");
                CaptureMode::FullDesktop
            }
        };
        Self { mode }
    }

    pub fn with_mode(mode: CaptureMode) -> Self {
        Self { mode }
    }
}

impl ScreenCapture for CaptureStrategy {
    fn capture(&mut self, monitor: &Monitor, resolution: Resolution) -> Result<CapturedImage, CaptureError> {
        let image = match self.mode {
            CaptureMode::CroppedToMonitor => capture_cropped(monitor, resolution)?,
            CaptureMode::FullDesktop => capture_desktop()?,
        };
        Ok(CapturedImage::new(image, self.mode))
    }

    fn mode(&self) -> CaptureMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_crop_to_resolution() {
        let image = RgbaImage::from_pixel(100, 80, Rgba([1, 2, 3, 255]));
        let cropped = crop_to_resolution(&image, Resolution::new(60, 40));
        assert_eq!(cropped.dimensions(), (60, 40));

        let cropped = crop_to_resolution(&image, Resolution::new(1920, 1080));
        assert_eq!(cropped.dimensions(), (100, 80));
    }

    #[test]
    fn test_composite_places_monitors_at_offsets() {
        let left = RgbaImage::from_pixel(4, 3, Rgba([10, 0, 0, 255]));
        let right = RgbaImage::from_pixel(2, 5, Rgba([0, 20, 0, 255]));
        let desktop = composite(&[(0, 0, left), (4, 1, right)]);

        assert_eq!(desktop.dimensions(), (6, 6));
        assert_eq!(desktop.get_pixel(3, 2), &Rgba([10, 0, 0, 255]));
        assert_eq!(desktop.get_pixel(4, 1), &Rgba([0, 20, 0, 255]));
        assert_eq!(desktop.get_pixel(5, 5), &Rgba([0, 20, 0, 255]));
        assert_eq!(desktop.get_pixel(4, 0), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_composite_drops_negative_space() {
        let left = RgbaImage::from_pixel(4, 2, Rgba([10, 0, 0, 255]));
        let main = RgbaImage::from_pixel(3, 2, Rgba([0, 20, 0, 255]));
        let desktop = composite(&[(-4, 0, left), (0, 0, main)]);

        assert_eq!(desktop.dimensions(), (3, 2));
        assert_eq!(desktop.get_pixel(0, 0), &Rgba([0, 20, 0, 255]));
    }

    #[test]
    fn test_fixed_mode() {
        assert_eq!(CaptureStrategy::with_mode(CaptureMode::FullDesktop).mode(), CaptureMode::FullDesktop);
    }
}
