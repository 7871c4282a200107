//! Error types for the number recall engine

use thiserror::Error;

/// Main error type for the number recall engine
#[derive(Error, Debug)]
pub enum RecallError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session closed")]
    SessionClosed,
}

impl From<serde_json::Error> for RecallError {
    fn from(err: serde_json::Error) -> Self {
        RecallError::DeserializationError(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<RecallError> for pyo3::PyErr {
    fn from(err: RecallError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
        match err {
            RecallError::InvalidConfig(msg) => {
                PyValueError::new_err(format!("Invalid configuration: {}", msg))
            }
            RecallError::DeserializationError(msg) => {
                PyValueError::new_err(format!("Deserialization error: {}", msg))
            }
            RecallError::Io(e) => PyIOError::new_err(e.to_string()),
            RecallError::SessionClosed => PyRuntimeError::new_err("Session closed"),
        }
    }
}

/// Result type alias for the number recall engine
pub type Result<T> = std::result::Result<T, RecallError>;
