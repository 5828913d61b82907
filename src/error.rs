use std::path::PathBuf;

use thiserror::Error;

/// Problems that make it impossible to start a game session.
///
/// All of these are reported before the first frame is processed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("the category table is empty")]
    EmptyCategories,

    #[error("category '{0}' has no words")]
    EmptyCategory(String),

    #[error("word '{word}' in category '{category}' must be non-empty and alphabetic")]
    InvalidWord { category: String, word: String },

    #[error("dwell duration must be positive, got {0}s")]
    NonPositiveDwell(f64),

    #[error("dwell duration {0}s is too long")]
    DwellOutOfRange(f64),

    #[error("loss threshold {threshold} does not match the {parts} figure parts")]
    LossThresholdMismatch { threshold: u32, parts: u32 },

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
