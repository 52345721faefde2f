//! Error types and handling for Selene
//!
//! This module defines the error types used throughout the application,
//! providing consistent error handling and reporting.

use thiserror::Error;

/// Result type alias for Selene operations
pub type Result<T> = std::result::Result<T, SeleneError>;

/// Main error type for Selene
#[derive(Debug, Error)]
pub enum SeleneError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// File I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Network-related errors
    #[error("Network error: {message}")]
    Network { message: String },

    /// Errors in SMARD feed responses (missing index, no usable data)
    #[error("Feed error: {message}")]
    Feed { message: String },

    /// Validation errors
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Timeout errors
    #[error("Timeout error: {message}")]
    Timeout { message: String },

    /// Generic errors with context
    #[error("Error: {message}")]
    Generic { message: String },
}

impl SeleneError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        SeleneError::Config {
            message: message.into(),
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        SeleneError::Io {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        SeleneError::Network {
            message: message.into(),
        }
    }

    /// Create a new feed error
    pub fn feed<S: Into<String>>(message: S) -> Self {
        SeleneError::Feed {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        SeleneError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        SeleneError::Timeout {
            message: message.into(),
        }
    }

    /// Create a new generic error
    pub fn generic<S: Into<String>>(message: S) -> Self {
        SeleneError::Generic {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for SeleneError {
    fn from(err: std::io::Error) -> Self {
        SeleneError::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for SeleneError {
    fn from(err: serde_yaml::Error) -> Self {
        SeleneError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SeleneError {
    fn from(err: serde_json::Error) -> Self {
        SeleneError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for SeleneError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SeleneError::timeout(err.to_string())
        } else {
            SeleneError::network(err.to_string())
        }
    }
}

impl From<chrono::ParseError> for SeleneError {
    fn from(err: chrono::ParseError) -> Self {
        SeleneError::validation("datetime", &err.to_string())
    }
}
