#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("no monitor available for capture")]
    NoMonitor,

    #[error("monitor '{0}' is no longer connected")]
    MonitorNotFound(String),

    #[error("capture backend failed: {0}")]
    Backend(String),
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("input backend failed: {0}")]
    Backend(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("scan worker failed: {0}")]
    Worker(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("expected WIDTHxHEIGHT, found '{0}'")]
    Format(String),

    #[error("resolution must be positive, found {0}x{1}")]
    Zero(u32, u32),
}
