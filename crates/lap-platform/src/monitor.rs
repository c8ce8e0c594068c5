use lap_core::error::CaptureError;
use lap_types::Monitor;

/// Monitors in enumeration order, named `Monitor 1`, `Monitor 2`, ...
pub fn enumerate_monitors() -> Result<Vec<Monitor>, CaptureError> {
    let monitors = xcap::Monitor::all().map_err(|e| CaptureError::Backend(e.to_string()))?;

    Ok(monitors
        .iter()
        .enumerate()
        .map(|(index, m)| Monitor {
            index,
            name: format!("Monitor {}", index + 1),
            x: m.x(),
            y: m.y(),
            width: m.width(),
            height: m.height(),
            is_primary: m.is_primary(),
        })
        .collect())
}

/// Like [`enumerate_monitors`], but never empty
pub fn list_monitors() -> Vec<Monitor> {
    match enumerate_monitors() {
        Ok(monitors) if !monitors.is_empty() => {
            for monitor in &monitors {
                tracing::debug!("Detected {monitor}");
            }
            monitors
        }
        Ok(_) => {
            tracing::warn!("No monitors reported, assuming a single 1920x1080 display");
            vec![Monitor::fallback_primary()]
        }
        Err(e) => {
            tracing::warn!("Could not enumerate monitors ({e}), assuming a single 1920x1080 display");
            vec![Monitor::fallback_primary()]
        }
    }
}
