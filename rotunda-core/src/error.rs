//! # Error handling for Rotunda Core
//!
//! This module provides the unified error type used throughout the
//! engine. Most engine operations cannot fail in a recoverable way
//! (invalid indices are clamped, a drag begun outside editing is a
//! no-op), so the error surface is intentionally small: configuration
//! problems, missing views, and validation failures.
//!
//! Invariant violations (a displayed rail longer than the cap, a view on
//! both rails) are programming errors guarded by debug assertions, never
//! surfaced through this type.

use thiserror::Error;

/// Result type used throughout Rotunda Core.
///
/// This is a type alias for `std::result::Result` with our custom [`Error`] type.
///
/// # Example
///
/// ```rust
/// use rotunda_core::{Result, Error};
///
/// fn example_function() -> Result<String> {
///     Ok("Success".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Rotunda Core.
///
/// This enum represents all possible errors that can occur within the
/// engine. It uses `thiserror` for automatic `std::error::Error`
/// implementation and provides structured error information.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Angular layout errors
    #[error("Layout error: {message}")]
    Layout { message: String },

    /// View management errors
    #[error("View error: {message}")]
    View { message: String },

    /// Drag gesture errors
    #[error("Drag error: {message}")]
    Drag { message: String },

    /// Event system errors
    #[error("Event error: {message}")]
    Event { message: String },

    /// File I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generic error with custom message
    #[error("Error: {message}")]
    Generic { message: String },

    /// Validation errors
    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    /// Not found errors
    #[error("Not found: {resource}")]
    NotFound { resource: String },
}

impl Error {
    /// Create a new configuration error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_core::Error;
    ///
    /// let error = Error::config("Invalid configuration file format");
    /// ```
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new layout error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_core::Error;
    ///
    /// let error = Error::layout("Arc spacing must be positive");
    /// ```
    pub fn layout<S: Into<String>>(message: S) -> Self {
        Self::Layout {
            message: message.into(),
        }
    }

    /// Create a new view error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_core::Error;
    ///
    /// let error = Error::view("View is not part of the workspace");
    /// ```
    pub fn view<S: Into<String>>(message: S) -> Self {
        Self::View {
            message: message.into(),
        }
    }

    /// Create a new drag error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_core::Error;
    ///
    /// let error = Error::drag("Gesture already in progress");
    /// ```
    pub fn drag<S: Into<String>>(message: S) -> Self {
        Self::Drag {
            message: message.into(),
        }
    }

    /// Create a new event error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_core::Error;
    ///
    /// let error = Error::event("Event bus not initialized");
    /// ```
    pub fn event<S: Into<String>>(message: S) -> Self {
        Self::Event {
            message: message.into(),
        }
    }

    /// Create a new generic error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_core::Error;
    ///
    /// let error = Error::generic("Something went wrong");
    /// ```
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Create a new validation error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_core::Error;
    ///
    /// let error = Error::validation("layout.arc_spacing", "must be positive");
    /// ```
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new not found error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_core::Error;
    ///
    /// let error = Error::not_found("View 1f6a…");
    /// ```
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Check if this error is a configuration error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_core::Error;
    ///
    /// let error = Error::config("Invalid format");
    /// assert!(error.is_config());
    /// ```
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Check if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Get the error category as a string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_core::Error;
    ///
    /// let error = Error::config("Invalid format");
    /// assert_eq!(error.category(), "Config");
    /// ```
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } => "Config",
            Self::Layout { .. } => "Layout",
            Self::View { .. } => "View",
            Self::Drag { .. } => "Drag",
            Self::Event { .. } => "Event",
            Self::Io(_) => "IO",
            Self::Json(_) => "JSON",
            Self::Toml(_) => "TOML",
            Self::Generic { .. } => "Generic",
            Self::Validation { .. } => "Validation",
            Self::NotFound { .. } => "NotFound",
        }
    }
}

/// Convenience macro for creating errors with context.
///
/// # Example
///
/// ```rust
/// use rotunda_core::{error, Error};
///
/// let err = error!("Failed to place view {}: {}", "browser", "unknown rail");
/// ```
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::Error::generic(format!($($arg)*))
    };
}

/// Convenience macro for creating configuration errors.
///
/// # Example
///
/// ```rust
/// use rotunda_core::{config_error, Error};
///
/// let err = config_error!("Invalid value for {}: {}", "shift_speed", "not a number");
/// ```
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)*) => {
        $crate::Error::config(format!($($arg)*))
    };
}

/// Convert from `anyhow::Error` to our custom error type.
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::generic(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_creation() {
        let error = Error::config("Test message");
        assert!(error.is_config());
        assert_eq!(error.category(), "Config");
        assert!(error.to_string().contains("Test message"));
    }

    #[test]
    fn test_domain_errors() {
        assert_eq!(Error::layout("bad arc").category(), "Layout");
        assert_eq!(Error::view("missing").category(), "View");
        assert_eq!(Error::drag("busy").category(), "Drag");
        assert_eq!(Error::event("closed").category(), "Event");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::from(io_error);
        assert_eq!(error.category(), "IO");
    }

    #[test]
    fn test_validation_error() {
        let error = Error::validation("focus.tolerance", "must be positive");
        assert!(error.is_validation());
        assert_eq!(error.category(), "Validation");
        assert!(error.to_string().contains("focus.tolerance"));
    }

    #[test]
    fn test_not_found_error() {
        let error = Error::not_found("View");
        assert_eq!(error.category(), "NotFound");
    }

    #[test]
    fn test_error_macros() {
        let error = error!("Test {}", "message");
        assert_eq!(error.category(), "Generic");

        let config_err = config_error!("Config {}", "error");
        assert!(config_err.is_config());
    }

    #[test]
    fn test_anyhow_conversion() {
        let anyhow_err = anyhow::anyhow!("Test error");
        let error = Error::from(anyhow_err);
        assert_eq!(error.category(), "Generic");
    }

    #[test]
    fn test_error_display() {
        let error = Error::config("Invalid configuration");
        let display = format!("{}", error);
        assert!(display.contains("Configuration error"));
        assert!(display.contains("Invalid configuration"));
    }
}
