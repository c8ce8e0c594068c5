use std::sync::Arc;
use std::time::SystemTime;

use kanal::AsyncReceiver;
use lap_types::{AppEvent, ScanState};
use tokio::sync::RwLock;

/// Per-session scan counters
#[derive(Clone, Debug)]
pub struct ScanStatus {
    pub state: ScanState,
    pub scans: u64,
    pub clicks: u64,
    pub misses: u64,
    pub errors: u64,
    pub last_click: Option<(i32, i32)>,
    pub last_click_time: Option<SystemTime>,
    pub last_error: Option<String>,
}

impl Default for ScanStatus {
    fn default() -> Self {
        Self {
            state: ScanState::Stopped,
            scans: 0,
            clicks: 0,
            misses: 0,
            errors: 0,
            last_click: None,
            last_click_time: None,
            last_error: None,
        }
    }
}

impl ScanStatus {
    pub fn apply(&mut self, event: &AppEvent) {
        match event {
            AppEvent::StateChanged(state) => self.state = *state,
            AppEvent::ScanStarted { scan } => self.scans = *scan,
            AppEvent::ButtonClicked { x, y, .. } => {
                self.clicks += 1;
                self.last_click = Some((*x, *y));
                self.last_click_time = Some(SystemTime::now());
            }
            AppEvent::ButtonNotFound { .. } => self.misses += 1,
            AppEvent::CycleFailed { reason, .. } => {
                self.errors += 1;
                self.last_error = Some(reason.clone());
            }
            AppEvent::WorkerStopped { reason } => {
                self.state = ScanState::Stopped;
                if let Some(reason) = reason {
                    self.errors += 1;
                    self.last_error = Some(reason.clone());
                }
            }
        }
    }

    pub fn summary(&self) -> String {
        let mut line = format!(
            "{} scans, {} clicks, {} without button, {} errors",
            self.scans, self.clicks, self.misses, self.errors
        );
        if let Some((x, y)) = self.last_click {
            line.push_str(&format!(", last click at ({x}, {y})"));
        }
        line
    }
}

/// Fold worker events into `status` until the worker reports it stopped
pub async fn status_loop(events: AsyncReceiver<AppEvent>, status: Arc<RwLock<ScanStatus>>) -> anyhow::Result<()> {
    while let Ok(event) = events.recv().await {
        let done = matches!(event, AppEvent::WorkerStopped { .. });
        status.write().await.apply(&event);
        if done {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[test]
    fn test_counters() {
        let mut status = ScanStatus::default();
        for event in [
            AppEvent::StateChanged(ScanState::Running),
            AppEvent::ScanStarted { scan: 1 },
            AppEvent::ButtonNotFound { scan: 1 },
            AppEvent::ScanStarted { scan: 2 },
            AppEvent::CycleFailed {
                scan: 2,
                reason: "capture backend failed".to_string(),
            },
            AppEvent::ScanStarted { scan: 3 },
            AppEvent::ButtonClicked { scan: 3, x: 10, y: 20 },
        ] {
            status.apply(&event);
        }

        assert_eq!(status.state, ScanState::Running);
        assert_eq!((status.scans, status.clicks, status.misses, status.errors), (3, 1, 1, 1));
        assert_eq!(status.last_click, Some((10, 20)));
        assert_eq!(
            status.summary(),
            "3 scans, 1 clicks, 1 without button, 1 errors, last click at (10, 20)"
        );
    }

    #[test]
    fn test_worker_fault_counts_as_error() {
        let mut status = ScanStatus::default();
        status.apply(&AppEvent::StateChanged(ScanState::Running));
        status.apply(&AppEvent::WorkerStopped {
            reason: Some("scan cycle aborted".to_string()),
        });
        assert_eq!(status.state, ScanState::Stopped);
        assert_eq!(status.errors, 1);
    }

    #[tokio::test]
    async fn test_status_loop_ends_on_worker_stop() {
        let (tx, rx) = kanal::unbounded_async::<AppEvent>();
        let status = Arc::new(RwLock::new(ScanStatus::default()));
        let task = tokio::spawn(status_loop(rx, status.clone()));

        tx.send(AppEvent::ScanStarted { scan: 1 }).await.unwrap();
        tx.send(AppEvent::ButtonClicked { scan: 1, x: 5, y: 6 }).await.unwrap();
        tx.send(AppEvent::WorkerStopped { reason: None }).await.unwrap();

        timeout(Duration::from_secs(2), task)
            .await
            .expect("status loop did not finish")
            .unwrap()
            .unwrap();
        assert_eq!(status.read().await.clicks, 1);
    }
}
