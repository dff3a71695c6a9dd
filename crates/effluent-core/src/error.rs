use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum EffluentError {
    #[error("failed to parse value: {0}")]
    ParseError(String),

    #[error("failed to load thresholds from {path}: {reason}")]
    ThresholdsLoad { path: PathBuf, reason: String },

    #[error("invalid threshold table: {0}")]
    ThresholdsInvalid(String),

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("sensor hardware unavailable: {0}")]
    HardwareUnavailable(String),

    #[error("failed to read analog channel {channel}: {reason}")]
    HardwareRead { channel: u8, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
