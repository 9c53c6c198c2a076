//! Error types for startup-time configuration.
//!
//! The analysis pipeline itself never fails; only loading a lexicon or
//! reading configuration can.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("failed to read lexicon file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid lexicon JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("topic '{0}' is declared more than once")]
    DuplicateTopic(String),

    #[error("topic name '{0}' is reserved for uncategorized feedback")]
    ReservedTopic(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("tone thresholds must be finite with negative ({negative}) <= positive ({positive})")]
    InvalidThresholds { positive: f64, negative: f64 },

    #[error(transparent)]
    Lexicon(#[from] LexiconError),
}
