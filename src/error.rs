//! Centralized error types for tagfield.
//!
//! This module provides a unified error hierarchy for the application with
//! user-friendly error messages. All error types use `thiserror` for
//! ergonomic error handling.

use thiserror::Error;

use crate::config::ConfigError;
use crate::ui::BindError;

/// The main application error type.
///
/// This enum aggregates all error types that can occur in tagfield,
/// providing user-friendly error messages while preserving the underlying
/// error context for debugging.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Widget binding errors.
    #[error("{0}")]
    Bind(#[from] BindError),

    /// Candidate data could not be decoded.
    #[error("Invalid candidate data: {0}")]
    Candidates(#[from] serde_json::Error),

    /// IO errors (file system, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file is readable."
                        .to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Bind(e) => match e {
                BindError::InvalidInput => {
                    "Candidate list must be a JSON array of strings.".to_string()
                }
                BindError::InvalidTarget(name) => {
                    format!("'{}' is not a text field and cannot take tags.", name)
                }
            },
            AppError::Candidates(_) => "Candidate file is not valid JSON.".to_string(),
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Check if this error is critical.
    ///
    /// Critical errors stop the application before the form is shown; the
    /// others are reported in the status line.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            AppError::Bind(_) | AppError::Candidates(_) | AppError::Terminal(_)
        )
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ParseError(_))
            | AppError::Config(ConfigError::ValidationError(_)) => {
                Some("Fix or remove the configuration file; defaults are used meanwhile.")
            }
            AppError::Bind(BindError::InvalidInput) | AppError::Candidates(_) => {
                Some("Pass a file like [\"rust\", \"tui\"] with --candidates.")
            }
            AppError::Bind(BindError::InvalidTarget(_)) => {
                Some("Only plain text fields can take tags.")
            }
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
