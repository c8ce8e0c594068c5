use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use lap_core::scan_loop::{ScanContext, ScanController, ScanEngine, run_scan_loop};
use lap_platform::Modifiers;
use lap_types::AppEvent;
use tokio::sync::RwLock;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::cli::{HotkeyMode, HotkeyModifier};
use crate::status::{ScanStatus, status_loop};

const HOTKEY_POLL: Duration = Duration::from_millis(50);

/// Centralized channel management
pub struct ChannelSet {
    pub worker_to_status: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            worker_to_status: kanal::bounded_async(256),
        }
    }
}

/// Owns the scan state machine and the tasks around it
pub struct AppController {
    channels: ChannelSet,
    scan: ScanController,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new() -> Self {
        Self {
            channels: ChannelSet::new(),
            scan: ScanController::new(),
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn scan(&self) -> &ScanController {
        &self.scan
    }

    pub fn spawn_tasks(
        &self,
        engine: ScanEngine,
        context: ScanContext,
        hotkey: HotkeyMode,
        modifier: HotkeyModifier,
        status: Arc<RwLock<ScanStatus>>,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Scan worker
        let worker = run_scan_loop(
            self.scan.clone(),
            engine,
            move || context.clone(),
            self.channels.worker_to_status.0.clone(),
            self.cancel_token.child_token(),
        );
        tasks.spawn(async move { worker.await.map_err(anyhow::Error::from) });

        // Status counters
        tasks.spawn(status_loop(self.channels.worker_to_status.1.clone(), status));

        // Hotkey listener
        let scan = self.scan.clone();
        let cancel = self.cancel_token.child_token();
        tasks.spawn_blocking(move || {
            hotkey_listener(scan, hotkey, modifier, cancel);
            Ok(())
        });

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

fn platform_modifiers(modifier: HotkeyModifier) -> Option<Modifiers> {
    match modifier {
        HotkeyModifier::None => None,
        HotkeyModifier::Ctrl => Some(Modifiers::CONTROL),
        HotkeyModifier::Alt => Some(Modifiers::ALT),
        HotkeyModifier::Shift => Some(Modifiers::SHIFT),
    }
}

fn hotkey_listener(scan: ScanController, mode: HotkeyMode, modifier: HotkeyModifier, cancel: CancellationToken) {
    let key = modifier.label();
    let hotkey_manager = match lap_platform::HotkeyManager::new(platform_modifiers(modifier)) {
        Ok(manager) => manager,
        Err(e) => {
            tracing::warn!("Global hotkey unavailable ({e:#}), use Ctrl+C to stop");
            return;
        }
    };

    tracing::debug!("Hotkey {key} registered with id {}", hotkey_manager.id());

    while !cancel.is_cancelled() {
        if hotkey_manager.poll() {
            match mode {
                HotkeyMode::Stop => {
                    if scan.stop() {
                        tracing::info!("{key} pressed, stopping");
                    }
                }
                HotkeyMode::Pause => {
                    if scan.toggle_pause() {
                        tracing::info!("{key} pressed, scan is now {}", scan.state());
                    }
                }
            }
        }

        // Sleep briefly to avoid busy loop
        std::thread::sleep(HOTKEY_POLL);
    }

    tracing::debug!("Hotkey listener stopping");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_modifiers() {
        assert_eq!(platform_modifiers(HotkeyModifier::None), None);
        assert_eq!(platform_modifiers(HotkeyModifier::Ctrl), Some(Modifiers::CONTROL));
        assert_eq!(platform_modifiers(HotkeyModifier::Shift), Some(Modifiers::SHIFT));
    }
}
