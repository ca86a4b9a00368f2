//! Error types for the console runtime.
//!
//! Character I/O itself cannot fail; these cover the layers around it.

use thiserror::Error;

/// Errors raised outside the infallible character primitives.
#[derive(Error, Debug)]
pub enum ConioError {
    #[error("No MOS call at vector &{0:04X}")]
    UnknownVector(u16),

    #[error("Unknown demo: {0}")]
    UnknownDemo(String),

    #[error("Script error: {0}")]
    Script(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for console runtime operations.
pub type ConioResult<T> = Result<T, ConioError>;
