use image::RgbaImage;
use lap_types::{CaptureMode, Color, Monitor};

use crate::color;
use crate::error::CaptureError;
use crate::scaling::Resolution;

/// A captured frame tagged with the coordinate space it was taken in
pub struct CapturedImage {
    image: RgbaImage,
    mode: CaptureMode,
}

impl CapturedImage {
    pub fn new(image: RgbaImage, mode: CaptureMode) -> Self {
        Self { image, mode }
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel at (x, y), or `None` outside the raster
    pub fn pixel(&self, x: i64, y: i64) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return None;
        }
        Some(color::from_rgba(self.image.get_pixel(x as u32, y as u32)))
    }

    pub fn into_inner(self) -> RgbaImage {
        self.image
    }
}

/// Screenshot source
pub trait ScreenCapture: Send {
    /// Capture the area used for detecting on `monitor`
    fn capture(&mut self, monitor: &Monitor, resolution: Resolution) -> Result<CapturedImage, CaptureError>;

    /// Coordinate space of the frames this source produces
    fn mode(&self) -> CaptureMode;
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_pixel_out_of_bounds_is_none() {
        let mut raw = RgbaImage::new(3, 2);
        raw.put_pixel(2, 1, Rgba([9, 8, 7, 255]));
        let image = CapturedImage::new(raw, CaptureMode::CroppedToMonitor);

        assert_eq!(image.pixel(2, 1), Some(Color::new(9, 8, 7)));
        assert_eq!(image.pixel(3, 1), None);
        assert_eq!(image.pixel(2, 2), None);
        assert_eq!(image.pixel(-1, 0), None);
        assert_eq!(image.pixel(0, -1), None);
    }
}
