use anyhow::{Context, Result};
use global_hotkey::{
    GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState,
    hotkey::{Code, HotKey, Modifiers},
};

pub struct HotkeyManager {
    manager: GlobalHotKeyManager,
    hotkey: HotKey,
}

impl HotkeyManager {
    /// Register `P`, optionally behind a modifier, as the stop/pause key
    ///
    /// A bare `P` is grabbed system-wide, so other applications stop receiving it.
    pub fn new(modifiers: Option<Modifiers>) -> Result<Self> {
        Self::with_hotkey(modifiers, Code::KeyP)
    }

    pub fn with_hotkey(modifiers: Option<Modifiers>, code: Code) -> Result<Self> {
        let manager = GlobalHotKeyManager::new().context("Failed to create hotkey manager")?;
        let hotkey = HotKey::new(modifiers, code);

        manager.register(hotkey).context("Failed to register hotkey")?;

        Ok(Self { manager, hotkey })
    }

    /// Check if the hotkey went down since the last poll (non-blocking)
    pub fn poll(&self) -> bool {
        let receiver = GlobalHotKeyEvent::receiver();
        let mut pressed = false;
        while let Ok(event) = receiver.try_recv() {
            if event.id == self.hotkey.id() && event.state == HotKeyState::Pressed {
                pressed = true;
            } else if event.id != self.hotkey.id() {
                tracing::trace!("Ignoring hotkey event {:?}", event.id);
            }
        }
        pressed
    }

    pub fn id(&self) -> u32 {
        self.hotkey.id()
    }
}

impl Drop for HotkeyManager {
    fn drop(&mut self) {
        let _ = self.manager.unregister(self.hotkey);
    }
}
