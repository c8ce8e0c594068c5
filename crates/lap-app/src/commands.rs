use std::path::Path;

use anyhow::{Context, bail};
use lap_config::{Config, SettingsStore, validate_entry};
use lap_core::scaling::detect_likely_scaling;

use crate::cli::split_key;
use crate::summary::config_lines;

pub fn monitors() {
    let monitors = lap_platform::list_monitors();
    println!("Found {} monitor(s):", monitors.len());
    for monitor in &monitors {
        let guess = detect_likely_scaling(monitor.width, monitor.height);
        match guess.native {
            Some(native) => println!("  {monitor} [likely {native} at {}]", guess.description),
            None => println!("  {monitor}"),
        }
    }
}

pub fn show_config(settings_path: &Path, json: bool) -> anyhow::Result<()> {
    let (config, _) = Config::load(settings_path)
        .with_context(|| format!("Failed to load settings from {}", settings_path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!("# {}", settings_path.display());
        for line in config_lines(&config) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Rewrite one `SECTION.KEY`, returning the normalized key
pub fn set(settings_path: &Path, key: &str, value: &str) -> anyhow::Result<String> {
    let Some((section, name)) = split_key(key) else {
        bail!("Expected SECTION.KEY, found '{key}'");
    };
    validate_entry(&section, &name, value)?;

    let mut store = SettingsStore::load(settings_path)
        .with_context(|| format!("Failed to load settings from {}", settings_path.display()))?;
    store.set(&section, &name, value.trim());
    store.save()?;

    tracing::debug!("Saved {section}.{name} = {value} to {}", settings_path.display());
    Ok(format!("{section}.{name}"))
}

/// Returns false when the file was already there
pub fn init(settings_path: &Path) -> anyhow::Result<bool> {
    if settings_path.exists() {
        return Ok(false);
    }
    SettingsStore::load(settings_path)
        .with_context(|| format!("Failed to create {}", settings_path.display()))?;
    Ok(true)
}
