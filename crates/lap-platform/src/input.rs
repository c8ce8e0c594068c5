use enigo::{Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse};
use lap_core::error::InputError;
use lap_core::input::{InputDriver, KeyAction};

fn backend(e: impl std::fmt::Display) -> InputError {
    InputError::Backend(e.to_string())
}

/// Mouse and keyboard through enigo, in absolute desktop coordinates
pub struct EnigoDriver {
    enigo: Enigo,
}

impl EnigoDriver {
    pub fn new() -> Result<Self, InputError> {
        let enigo = Enigo::new(&enigo::Settings::default()).map_err(backend)?;
        Ok(Self { enigo })
    }
}

impl InputDriver for EnigoDriver {
    fn cursor_position(&mut self) -> Result<(i32, i32), InputError> {
        self.enigo.location().map_err(backend)
    }

    fn move_cursor(&mut self, x: i32, y: i32) -> Result<(), InputError> {
        self.enigo.move_mouse(x, y, Coordinate::Abs).map_err(backend)
    }

    fn click(&mut self, x: i32, y: i32) -> Result<(), InputError> {
        self.move_cursor(x, y)?;
        self.enigo.button(Button::Left, Direction::Click).map_err(backend)
    }

    fn press(&mut self, action: KeyAction) -> Result<(), InputError> {
        match action {
            KeyAction::Confirm => self.enigo.key(Key::Return, Direction::Click).map_err(backend),
            KeyAction::SwitchWindow => {
                self.enigo.key(Key::Alt, Direction::Press).map_err(backend)?;
                let tab = self.enigo.key(Key::Tab, Direction::Click).map_err(backend);
                // Alt must come back up even when Tab failed
                self.enigo.key(Key::Alt, Direction::Release).map_err(backend)?;
                tab
            }
        }
    }
}
