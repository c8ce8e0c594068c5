use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};
use uuid::Uuid;

/// Identifies one run in the debug log
pub struct Session {
    pub id: Uuid,
    file_logging: bool,
}

impl Session {
    pub fn end(&self) {
        if self.file_logging {
            tracing::debug!(session = %self.id, "===== session end =====");
        }
    }
}

/// Install the console layer and, when `debug_log` is set, an append-only file layer
pub fn init(debug_log: Option<&Path>) -> anyhow::Result<Session> {
    let console_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    let console = fmt::layer()
        .with_target(false)
        .with_ansi(atty::is(atty::Stream::Stdout))
        .with_filter(console_filter);

    let file = match debug_log {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
            }
            let log = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open debug log {}", path.display()))?;

            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(log))
                    .with_filter(LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    let session = Session {
        id: Uuid::new_v4(),
        file_logging: debug_log.is_some(),
    };
    if let Some(path) = debug_log {
        tracing::debug!(session = %session.id, "===== session start =====");
        tracing::info!("Debug logging to {}", path.display());
    }
    Ok(session)
}
