//! In-memory collaborators shared by the unit tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use image::{Rgba, RgbaImage};
use lap_types::{CaptureMode, Color, Monitor};

use crate::capture::{CapturedImage, ScreenCapture};
use crate::error::{CaptureError, InputError};
use crate::input::{InputDriver, KeyAction};
use crate::scaling::Resolution;

pub const BACKGROUND: Color = Color::new(20, 20, 20);
pub const TARGET: Color = Color::new(59, 1, 0);
pub const SECONDARY: Color = Color::new(246, 175, 100);

/// Background raster with the listed pixels painted in
pub fn raster(width: u32, height: u32, pixels: &[(u32, u32, Color)]) -> RgbaImage {
    let [r, g, b] = BACKGROUND.channels();
    let mut image = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255]));
    for (x, y, color) in pixels {
        let [r, g, b] = color.channels();
        image.put_pixel(*x, *y, Rgba([r, g, b, 255]));
    }
    image
}

pub fn image_with(width: u32, height: u32, mode: CaptureMode, pixels: &[(u32, u32, Color)]) -> CapturedImage {
    CapturedImage::new(raster(width, height, pixels), mode)
}

pub fn monitor(x: i32, y: i32, width: u32, height: u32) -> Monitor {
    Monitor {
        index: 0,
        name: "Monitor 1".to_string(),
        x,
        y,
        width,
        height,
        is_primary: true,
    }
}

/// Replays queued frames, repeating the last one once the queue runs dry
pub struct FakeCapture {
    mode: CaptureMode,
    frames: VecDeque<Result<RgbaImage, String>>,
    last: Option<RgbaImage>,
}

impl FakeCapture {
    pub fn new(mode: CaptureMode) -> Self {
        Self {
            mode,
            frames: VecDeque::new(),
            last: None,
        }
    }

    pub fn frame(mut self, image: RgbaImage) -> Self {
        self.frames.push_back(Ok(image));
        self
    }

    pub fn failure(mut self, reason: &str) -> Self {
        self.frames.push_back(Err(reason.to_string()));
        self
    }
}

impl ScreenCapture for FakeCapture {
    fn capture(&mut self, _monitor: &Monitor, _resolution: Resolution) -> Result<CapturedImage, CaptureError> {
        match self.frames.pop_front() {
            Some(Ok(image)) => {
                self.last = Some(image.clone());
                Ok(CapturedImage::new(image, self.mode))
            }
            Some(Err(reason)) => Err(CaptureError::Backend(reason)),
            None => match &self.last {
                Some(image) => Ok(CapturedImage::new(image.clone(), self.mode)),
                None => Err(CaptureError::NoMonitor),
            },
        }
    }

    fn mode(&self) -> CaptureMode {
        self.mode
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCall {
    Position,
    Move(i32, i32),
    Click(i32, i32),
    Press(KeyAction),
}

/// Records every call; the cursor follows moves and clicks
#[derive(Clone)]
pub struct RecordingInput {
    pub calls: Arc<Mutex<Vec<InputCall>>>,
    cursor: Arc<Mutex<(i32, i32)>>,
    /// Moves land this far away from where they were asked to
    drift: (i32, i32),
    fail_clicks: bool,
    fail_keys: bool,
}

impl RecordingInput {
    pub fn new(cursor: (i32, i32)) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            cursor: Arc::new(Mutex::new(cursor)),
            drift: (0, 0),
            fail_clicks: false,
            fail_keys: false,
        }
    }

    pub fn with_drift(mut self, dx: i32, dy: i32) -> Self {
        self.drift = (dx, dy);
        self
    }

    pub fn failing_clicks(mut self) -> Self {
        self.fail_clicks = true;
        self
    }

    pub fn failing_keys(mut self) -> Self {
        self.fail_keys = true;
        self
    }

    pub fn calls(&self) -> Vec<InputCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clicks(&self) -> Vec<(i32, i32)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                InputCall::Click(x, y) => Some((x, y)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: InputCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl InputDriver for RecordingInput {
    fn cursor_position(&mut self) -> Result<(i32, i32), InputError> {
        self.record(InputCall::Position);
        Ok(*self.cursor.lock().unwrap())
    }

    fn move_cursor(&mut self, x: i32, y: i32) -> Result<(), InputError> {
        self.record(InputCall::Move(x, y));
        *self.cursor.lock().unwrap() = (x + self.drift.0, y + self.drift.1);
        Ok(())
    }

    fn click(&mut self, x: i32, y: i32) -> Result<(), InputError> {
        if self.fail_clicks {
            return Err(InputError::Backend("click rejected".to_string()));
        }
        self.record(InputCall::Click(x, y));
        *self.cursor.lock().unwrap() = (x, y);
        Ok(())
    }

    fn press(&mut self, action: KeyAction) -> Result<(), InputError> {
        if self.fail_keys {
            return Err(InputError::Backend("key rejected".to_string()));
        }
        self.record(InputCall::Press(action));
        Ok(())
    }
}
