use crate::error::InputError;

/// Keystrokes sent after a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// The game's confirm action (Enter)
    Confirm,
    /// Move focus away from the game (Alt+Tab)
    SwitchWindow,
}

/// Mouse and keyboard primitives
pub trait InputDriver: Send {
    fn cursor_position(&mut self) -> Result<(i32, i32), InputError>;

    fn move_cursor(&mut self, x: i32, y: i32) -> Result<(), InputError>;

    /// Move to (x, y) and left click
    fn click(&mut self, x: i32, y: i32) -> Result<(), InputError>;

    fn press(&mut self, action: KeyAction) -> Result<(), InputError>;
}
