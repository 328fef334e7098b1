//! Error types for I/O operations

use thiserror::Error;

/// Errors that can occur during I/O operations
#[derive(Error, Debug)]
pub enum IoError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file format: {format}")]
    InvalidFormat { format: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Write error: {message}")]
    WriteError { message: String },
}

impl From<IoError> for easyweights_core::Error {
    fn from(e: IoError) -> Self {
        match e {
            IoError::InvalidFormat { format } => easyweights_core::Error::UnsupportedFormat(format),
            other => easyweights_core::Error::InvalidData(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::ParseError {
            message: e.to_string(),
        }
    }
}

impl From<toml::de::Error> for IoError {
    fn from(e: toml::de::Error) -> Self {
        IoError::ParseError {
            message: e.to_string(),
        }
    }
}

impl From<toml::ser::Error> for IoError {
    fn from(e: toml::ser::Error) -> Self {
        IoError::WriteError {
            message: e.to_string(),
        }
    }
}
