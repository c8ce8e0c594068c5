use std::thread;
use std::time::Duration;

use lap_config::behavior::BehaviorConfig;
use lap_types::Monitor;

use crate::error::InputError;
use crate::input::{InputDriver, KeyAction};

/// Offset from the monitor origin used when pulling the cursor onto it
const FORCE_MOVE_OFFSET: (i32, i32) = (100, 100);
/// Offset from the monitor origin where the cursor rests after a click
const PARK_OFFSET: (i32, i32) = (25, 25);
/// How far a forced move may land from its target before it is reported
const MOVE_SLACK: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOptions {
    pub force_cursor_to_monitor: bool,
    pub restore_cursor: bool,
    pub alt_tab_after_click: bool,
}

impl From<&BehaviorConfig> for DispatchOptions {
    fn from(behavior: &BehaviorConfig) -> Self {
        Self {
            force_cursor_to_monitor: behavior.force_cursor_to_monitor,
            restore_cursor: behavior.reset_cursor_position,
            alt_tab_after_click: behavior.alt_tab_after_click,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchTiming {
    /// Wait after a forced move before checking where the cursor landed
    pub settle_delay: Duration,
    /// Wait between the click and the confirm key
    pub confirm_delay: Duration,
    /// Wait between the confirm key and Alt+Tab
    pub switch_delay: Duration,
}

impl Default for DispatchTiming {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(50),
            confirm_delay: Duration::from_millis(100),
            switch_delay: Duration::from_millis(200),
        }
    }
}

impl DispatchTiming {
    pub const fn immediate() -> Self {
        Self {
            settle_delay: Duration::ZERO,
            confirm_delay: Duration::ZERO,
            switch_delay: Duration::ZERO,
        }
    }
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}

/// Turns a detection into mouse and keyboard input
///
/// Runs synchronously on the scan worker so a click and its keystrokes finish
/// before the next capture.
pub struct ClickDispatcher {
    input: Box<dyn InputDriver>,
    timing: DispatchTiming,
}

impl ClickDispatcher {
    pub fn new(input: Box<dyn InputDriver>) -> Self {
        Self {
            input,
            timing: DispatchTiming::default(),
        }
    }

    pub fn with_timing(mut self, timing: DispatchTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Click at `(x, y)` and send the follow-up keys
    ///
    /// Cursor bookkeeping (saving, forcing onto the monitor, restoring, parking) is
    /// best-effort and only logged on failure. The click and the keys are not retried.
    pub fn dispatch(&mut self, x: i32, y: i32, monitor: Option<&Monitor>, options: &DispatchOptions) -> Result<(), InputError> {
        let saved = if options.restore_cursor {
            match self.input.cursor_position() {
                Ok(position) => Some(position),
                Err(e) => {
                    tracing::warn!("Could not read cursor position: {e}");
                    None
                }
            }
        } else {
            None
        };

        if let (true, Some(monitor)) = (options.force_cursor_to_monitor, monitor) {
            self.ensure_on_monitor(monitor);
        }

        tracing::info!("Clicking at ({x}, {y})");
        self.input.click(x, y)?;

        // The cursor still gets moved off the button when a key fails
        let keys = self.send_keys(options);

        let rest = saved.or_else(|| monitor.map(|m| m.safe_point(PARK_OFFSET.0, PARK_OFFSET.1)));
        if let Some((rest_x, rest_y)) = rest {
            match self.input.move_cursor(rest_x, rest_y) {
                Ok(()) => tracing::debug!("Cursor moved to ({rest_x}, {rest_y})"),
                Err(e) => tracing::warn!("Could not move cursor to ({rest_x}, {rest_y}): {e}"),
            }
        }

        keys
    }

    fn send_keys(&mut self, options: &DispatchOptions) -> Result<(), InputError> {
        pause(self.timing.confirm_delay);
        self.input.press(KeyAction::Confirm)?;
        tracing::debug!("Sent confirm key");

        if options.alt_tab_after_click {
            pause(self.timing.switch_delay);
            self.input.press(KeyAction::SwitchWindow)?;
            tracing::debug!("Sent Alt+Tab");
        }

        Ok(())
    }

    fn ensure_on_monitor(&mut self, monitor: &Monitor) {
        let current = match self.input.cursor_position() {
            Ok(position) => position,
            Err(e) => {
                tracing::warn!("Could not read cursor position: {e}");
                return;
            }
        };

        if monitor.contains(current.0, current.1) {
            return;
        }

        let (safe_x, safe_y) = monitor.safe_point(FORCE_MOVE_OFFSET.0, FORCE_MOVE_OFFSET.1);
        tracing::debug!(
            "Cursor at ({}, {}) is outside {}, moving to ({safe_x}, {safe_y})",
            current.0,
            current.1,
            monitor.name
        );

        if let Err(e) = self.input.move_cursor(safe_x, safe_y) {
            tracing::warn!("Could not move cursor onto {}: {e}", monitor.name);
            return;
        }
        pause(self.timing.settle_delay);

        match self.input.cursor_position() {
            Ok((landed_x, landed_y))
                if (landed_x - safe_x).abs() <= MOVE_SLACK && (landed_y - safe_y).abs() <= MOVE_SLACK => {}
            Ok((landed_x, landed_y)) => tracing::warn!(
                "Cursor landed at ({landed_x}, {landed_y}) instead of ({safe_x}, {safe_y}), clicking anyway"
            ),
            Err(e) => tracing::warn!("Could not verify cursor move: {e}"),
        }
    }
}
