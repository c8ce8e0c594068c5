mod capture;
mod hotkey;
mod input;
mod monitor;

pub use global_hotkey::hotkey::Modifiers;

pub use capture::{CaptureStrategy, composite, crop_to_resolution};
pub use hotkey::HotkeyManager;
pub use input::EnigoDriver;
pub use monitor::{enumerate_monitors, list_monitors};
