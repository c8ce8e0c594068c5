use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncSender;
use lap_types::{AppEvent, Monitor, ScanState};
use tokio::sync::watch;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::capture::ScreenCapture;
use crate::dispatch::{ClickDispatcher, DispatchOptions};
use crate::error::ScanError;
use crate::geometry::DetectionSettings;
use crate::scaling::{Resolution, ScalingFactor};
use crate::scanner::scan_row;

/// Shared handle driving the `Stopped -> Running <-> Paused -> Stopped` machine
///
/// Every transition returns whether it changed the state; transitions that do not
/// apply to the current state are no-ops.
#[derive(Clone)]
pub struct ScanController {
    state: Arc<watch::Sender<ScanState>>,
}

impl Default for ScanController {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanController {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ScanState::Stopped);
        Self { state: Arc::new(tx) }
    }

    pub fn state(&self) -> ScanState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScanState> {
        self.state.subscribe()
    }

    fn transition(&self, from: &[ScanState], to: ScanState) -> bool {
        self.state.send_if_modified(|state| {
            if from.contains(state) {
                *state = to;
                true
            } else {
                false
            }
        })
    }

    pub fn start(&self) -> bool {
        self.transition(&[ScanState::Stopped], ScanState::Running)
    }

    /// Stops from either running or paused without going through the other
    pub fn stop(&self) -> bool {
        self.transition(&[ScanState::Running, ScanState::Paused], ScanState::Stopped)
    }

    pub fn pause(&self) -> bool {
        self.transition(&[ScanState::Running], ScanState::Paused)
    }

    pub fn resume(&self) -> bool {
        self.transition(&[ScanState::Paused], ScanState::Running)
    }

    pub fn toggle_pause(&self) -> bool {
        self.pause() || self.resume()
    }
}

/// Everything one cycle needs, captured together so a cycle never mixes old and new values
#[derive(Debug, Clone)]
pub struct ScanContext {
    pub settings: DetectionSettings,
    pub monitor: Monitor,
    pub resolution: Resolution,
    pub scaling: ScalingFactor,
    pub dispatch: DispatchOptions,
    pub interval: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Clicked { x: i32, y: i32 },
    NotFound,
}

/// Capture, scan and (maybe) click, strictly in sequence
pub struct ScanEngine {
    capture: Box<dyn ScreenCapture>,
    dispatcher: ClickDispatcher,
}

impl ScanEngine {
    pub fn new(capture: Box<dyn ScreenCapture>, dispatcher: ClickDispatcher) -> Self {
        Self { capture, dispatcher }
    }

    pub fn run_cycle(&mut self, ctx: &ScanContext) -> Result<CycleOutcome, ScanError> {
        let image = self.capture.capture(&ctx.monitor, ctx.resolution)?;
        tracing::debug!(
            "Captured {}x{} ({}) for {}",
            image.width(),
            image.height(),
            image.mode(),
            ctx.monitor.name
        );

        let result = scan_row(&image, &ctx.settings, (ctx.monitor.x, ctx.monitor.y), ctx.scaling);
        if !result.found {
            return Ok(CycleOutcome::NotFound);
        }

        self.dispatcher
            .dispatch(result.click_x, result.click_y, Some(&ctx.monitor), &ctx.dispatch)?;

        Ok(CycleOutcome::Clicked {
            x: result.click_x,
            y: result.click_y,
        })
    }
}

async fn emit(events: &AsyncSender<AppEvent>, event: AppEvent) {
    if let Err(e) = events.send(event).await {
        tracing::trace!("Status listener gone: {}", e);
    }
}

/// Scan worker
///
/// Idles while stopped or paused, otherwise runs one cycle at a time on the
/// blocking pool and waits `interval` between cycles. The wait ends early when the
/// state leaves `Running`. A capture or input failure is reported and the next
/// cycle runs as usual; a panic inside a cycle stops the controller and ends the worker.
pub async fn run_scan_loop<F>(
    controller: ScanController,
    mut engine: ScanEngine,
    context: F,
    events: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> Result<(), ScanError>
where
    F: Fn() -> ScanContext,
{
    let mut state_rx = controller.subscribe();
    let mut last_state = None;
    let mut scan: u64 = 0;

    'worker: loop {
        let state = *state_rx.borrow_and_update();
        if last_state != Some(state) {
            tracing::info!("Scan state: {state}");
            emit(&events, AppEvent::StateChanged(state)).await;
            last_state = Some(state);
        }

        if state != ScanState::Running {
            tokio::select! {
                changed = state_rx.changed() => {
                    if changed.is_err() {
                        break 'worker;
                    }
                    continue 'worker;
                }
                _ = cancel.cancelled() => break 'worker,
            }
        }

        scan += 1;
        emit(&events, AppEvent::ScanStarted { scan }).await;

        let ctx = context();
        let interval = ctx.interval;

        let cycle = tokio::task::spawn_blocking(move || {
            let outcome = engine.run_cycle(&ctx);
            (engine, outcome)
        })
        .await;

        let outcome = match cycle {
            Ok((returned, outcome)) => {
                engine = returned;
                outcome
            }
            Err(e) => {
                let reason = format!("scan cycle aborted: {e}");
                tracing::error!("Scan #{scan}: {reason}");
                controller.stop();
                emit(&events, AppEvent::StateChanged(ScanState::Stopped)).await;
                emit(&events, AppEvent::WorkerStopped { reason: Some(reason.clone()) }).await;
                return Err(ScanError::Worker(reason));
            }
        };

        match outcome {
            Ok(CycleOutcome::Clicked { x, y }) => {
                tracing::info!("Scan #{scan}: button found, clicked at ({x}, {y})");
                emit(&events, AppEvent::ButtonClicked { scan, x, y }).await;
            }
            Ok(CycleOutcome::NotFound) => {
                tracing::info!("Scan #{scan}: button not found");
                emit(&events, AppEvent::ButtonNotFound { scan }).await;
            }
            Err(e) => {
                tracing::error!("Scan #{scan} failed: {e}");
                emit(&events, AppEvent::CycleFailed { scan, reason: e.to_string() }).await;
            }
        }

        let deadline = Instant::now() + interval;
        loop {
            tokio::select! {
                _ = tokio::time::sleep_until(deadline) => break,
                _ = cancel.cancelled() => break 'worker,
                changed = state_rx.changed() => {
                    if changed.is_err() {
                        break 'worker;
                    }
                    if *state_rx.borrow() != ScanState::Running {
                        break;
                    }
                }
            }
        }
    }

    tracing::info!("Scan worker stopping after {scan} scans");
    emit(&events, AppEvent::WorkerStopped { reason: None }).await;
    Ok(())
}
