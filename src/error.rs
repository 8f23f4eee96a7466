//! Error types for Catalog Desk

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Whether the backend could not be reached at all (as opposed to answering with an error)
    pub fn is_connection_failure(&self) -> bool {
        match self {
            AppError::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }

    /// Short human readable text used as notification detail
    pub fn user_message(&self) -> String {
        match self {
            AppError::Http(e) if e.is_connect() => "Cannot connect to backend.".to_string(),
            AppError::Http(e) if e.is_decode() => "Unexpected response from backend.".to_string(),
            AppError::Http(_) => "Request to backend failed.".to_string(),
            AppError::Api { status, message } if message.is_empty() => {
                format!("Backend answered with status {}.", status)
            }
            AppError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
