use std::fmt;

use serde::{Deserialize, Serialize};

/// 8-bit RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGB({}, {}, {})", self.r, self.g, self.b)
    }
}

/// How pixel positions inside a captured image relate to the virtual desktop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureMode {
    /// Image origin is the monitor's top-left corner
    CroppedToMonitor,
    /// Image origin is the virtual desktop origin
    FullDesktop,
}

impl fmt::Display for CaptureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureMode::CroppedToMonitor => f.write_str("cropped to monitor"),
            CaptureMode::FullDesktop => f.write_str("full desktop"),
        }
    }
}

/// Monitor geometry in virtual desktop coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monitor {
    pub index: usize,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub is_primary: bool,
}

impl Monitor {
    /// Fallback used when monitors cannot be enumerated
    pub fn fallback_primary() -> Self {
        Self {
            index: 0,
            name: "Primary Monitor".to_string(),
            x: 0,
            y: 0,
            width: 1920,
            height: 1080,
            is_primary: true,
        }
    }

    /// Half-open bounds check against the monitor rectangle
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && y >= self.y
            && (x as i64) < self.x as i64 + self.width as i64
            && (y as i64) < self.y as i64 + self.height as i64
    }

    /// Point offset from the monitor origin, clamped to stay inside the monitor
    pub fn safe_point(&self, dx: i32, dy: i32) -> (i32, i32) {
        let max_x = self.x + (self.width.max(1) as i32 - 1);
        let max_y = self.y + (self.height.max(1) as i32 - 1);
        (
            (self.x + dx).clamp(self.x, max_x),
            (self.y + dy).clamp(self.y, max_y),
        )
    }
}

impl fmt::Display for Monitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}x{} at ({}, {})",
            self.name, self.width, self.height, self.x, self.y
        )?;
        if self.is_primary {
            f.write_str(" (Primary)")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanState {
    Stopped,
    Running,
    Paused,
}

impl fmt::Display for ScanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanState::Stopped => f.write_str("Stopped"),
            ScanState::Running => f.write_str("Running"),
            ScanState::Paused => f.write_str("Paused"),
        }
    }
}

/// Status events sent from the scan worker to whatever surface is listening
#[derive(Debug, Clone)]
pub enum AppEvent {
    StateChanged(ScanState),
    ScanStarted {
        scan: u64,
    },
    ButtonClicked {
        scan: u64,
        x: i32,
        y: i32,
    },
    ButtonNotFound {
        scan: u64,
    },
    CycleFailed {
        scan: u64,
        reason: String,
    },
    WorkerStopped {
        reason: Option<String>,
    },
}
