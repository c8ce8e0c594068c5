use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use lap_config::Config;
use lap_core::capture::ScreenCapture;
use lap_core::dispatch::{ClickDispatcher, DispatchOptions};
use lap_core::geometry::DetectionSettings;
use lap_core::monitor::select_monitor;
use lap_core::scaling::{Resolution, ScalingFactor, detect_likely_scaling};
use lap_core::scan_loop::{ScanContext, ScanEngine};
use lap_platform::{CaptureStrategy, EnigoDriver};
use lap_types::{Monitor, ScanState};
use tokio::sync::RwLock;

use crate::cli::RunArgs;
use crate::controller::AppController;
use crate::logging;
use crate::status::ScanStatus;
use crate::summary::RunSummary;

/// Explicit resolution wins; a bad configured one falls back to the monitor size
pub fn resolve_resolution(explicit: Option<&str>, config: &Config, monitor: &Monitor) -> anyhow::Result<Resolution> {
    if let Some(value) = explicit {
        return value
            .parse()
            .with_context(|| format!("Invalid --resolution '{value}'"));
    }

    Ok(config.gui.resolution.parse().unwrap_or_else(|e| {
        tracing::warn!(
            "Invalid GUI.RESOLUTION '{}' ({e}), using the monitor size {}x{}",
            config.gui.resolution,
            monitor.width,
            monitor.height
        );
        Resolution::new(monitor.width.max(1), monitor.height.max(1))
    }))
}

pub fn resolve_scaling(args: &RunArgs, monitor: &Monitor) -> ScalingFactor {
    let guess = detect_likely_scaling(monitor.width, monitor.height);
    if let Some(native) = guess.native {
        tracing::info!(
            "{} reports {}x{}, likely {native} with {}",
            monitor.name,
            monitor.width,
            monitor.height,
            guess.description
        );
    }

    match (args.scaling, args.auto_scaling) {
        (Some(factor), _) => {
            let scaling = ScalingFactor::from_f64(factor);
            if scaling == ScalingFactor::None && (factor - 1.0).abs() > f64::EPSILON {
                tracing::warn!("Unsupported scaling factor {factor}, clicking without scaling");
            }
            scaling
        }
        (None, true) => guess.factor,
        (None, false) => ScalingFactor::None,
    }
}

/// Console session: set everything up once, scan until stopped
pub async fn run(settings_path: &Path, args: RunArgs) -> anyhow::Result<()> {
    let (config, _store) = Config::load(settings_path)
        .with_context(|| format!("Failed to load settings from {}", settings_path.display()))?;

    let debug_log = config.debug.debug_logging.then(|| lap_config::log_path(settings_path));
    let session = logging::init(debug_log.as_deref())?;

    let monitors = tokio::task::spawn_blocking(lap_platform::list_monitors).await?;
    let selector = args.monitor.as_deref().unwrap_or(&config.gui.selected_monitor);
    let monitor = select_monitor(&monitors, Some(selector)).context("No monitor available")?;

    let resolution = resolve_resolution(args.resolution.as_deref(), &config, &monitor)?;
    let scaling = resolve_scaling(&args, &monitor);
    let detection = DetectionSettings::resolve(&config.detection, resolution.width, resolution.height);

    let capture = {
        let monitor = monitor.clone();
        tokio::task::spawn_blocking(move || CaptureStrategy::probe(&monitor, resolution)).await?
    };
    let input = tokio::task::spawn_blocking(EnigoDriver::new)
        .await?
        .context("Failed to initialise mouse and keyboard input")?;

    RunSummary {
        settings_path,
        config: &config,
        monitor: &monitor,
        resolution,
        detection: &detection,
        scaling,
        capture: capture.mode(),
        hotkey: args.hotkey,
        hotkey_modifier: args.hotkey_modifier,
    }
    .display();

    let context = ScanContext {
        settings: detection,
        monitor,
        resolution,
        scaling,
        dispatch: DispatchOptions::from(&config.behavior),
        interval: config.timing.interval(),
    };
    let engine = ScanEngine::new(Box::new(capture), ClickDispatcher::new(Box::new(input)));

    let controller = AppController::new();
    let status = Arc::new(RwLock::new(ScanStatus::default()));
    let mut tasks = controller.spawn_tasks(engine, context, args.hotkey, args.hotkey_modifier, status.clone());

    controller.scan().start();
    let mut state_rx = controller.scan().subscribe();

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for Ctrl+C")?;
            tracing::info!("Ctrl+C received, stopping");
        }
        _ = state_rx.wait_for(|state| *state == ScanState::Stopped) => {}
    }

    controller.scan().stop();
    controller.shutdown();

    let mut failure = None;
    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::error!("Task failed: {e:#}");
                if failure.is_none() {
                    failure = Some(e);
                }
            }
            Err(e) => {
                tracing::error!("Task panicked: {e}");
                if failure.is_none() {
                    failure = Some(anyhow::Error::from(e));
                }
            }
        }
    }

    println!("Stopped. {}", status.read().await.summary());
    session.end();

    match failure {
        Some(e) => Err(e.context("Scanning stopped unexpectedly")),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(width: u32, height: u32) -> Monitor {
        Monitor {
            width,
            height,
            ..Monitor::fallback_primary()
        }
    }

    #[test]
    fn test_resolution_precedence() {
        let mut config = Config::default();
        let m = monitor(2560, 1440);

        assert_eq!(resolve_resolution(None, &config, &m).unwrap(), Resolution::new(1920, 1080));
        assert_eq!(
            resolve_resolution(Some("1280x720"), &config, &m).unwrap(),
            Resolution::new(1280, 720)
        );
        assert!(resolve_resolution(Some("wide"), &config, &m).is_err());

        config.gui.resolution = "garbage".to_string();
        assert_eq!(resolve_resolution(None, &config, &m).unwrap(), Resolution::new(2560, 1440));
    }

    #[test]
    fn test_scaling_choice() {
        let scaled = monitor(1536, 864);

        assert_eq!(resolve_scaling(&RunArgs::default(), &scaled), ScalingFactor::None);

        let auto = RunArgs {
            auto_scaling: true,
            ..Default::default()
        };
        assert_eq!(resolve_scaling(&auto, &scaled), ScalingFactor::P125);

        let explicit = RunArgs {
            scaling: Some(1.75),
            ..Default::default()
        };
        assert_eq!(resolve_scaling(&explicit, &scaled), ScalingFactor::P175);

        let unsupported = RunArgs {
            scaling: Some(1.1),
            ..Default::default()
        };
        assert_eq!(resolve_scaling(&unsupported, &scaled), ScalingFactor::None);
    }
}
