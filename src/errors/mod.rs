//! Error handling utilities for the allerease application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents specific error cases that can occur while persisting or
/// restoring the application state blob.
///
/// Load-time failures are recovered by falling back to defaults and are
/// surfaced as warnings rather than propagated; save-time failures are the
/// only ones that reach callers.
///
/// # Examples
///
/// ```
/// use allerease::errors::StorageError;
/// use std::path::PathBuf;
///
/// let error = StorageError::Busy {
///     path: PathBuf::from("/data/allerease_v3_data.json"),
/// };
/// assert!(format!("{}", error).contains("another allerease process"));
/// ```
#[derive(Debug, Error)]
pub enum StorageError {
    /// Error when the state file cannot be read.
    #[error("Failed to read state file {path}: {source}")]
    Read {
        /// The path of the state file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the state file does not contain valid JSON.
    #[error("State file {path} is not valid JSON: {source}")]
    Parse {
        /// The path of the state file
        path: PathBuf,
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// Error when writing the replacement state file fails.
    #[error("Failed to write state file {path}: {source}")]
    Write {
        /// The path of the state file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the state file is locked by another process.
    #[error("State file {path} is in use by another allerease process. Please wait for it to finish.")]
    Busy {
        /// The path of the state file
        path: PathBuf,
    },
}

/// Represents specific error cases that can occur during the advisory
/// weather/AQI lookup.
///
/// Weather data is purely informational: every variant here is caught at
/// the operation boundary and rendered as "no weather data available"
/// rather than propagated into logging or reminder logic.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The weather endpoint is not configured.
    #[error("No weather endpoint configured. Set ALLEREASE_WEATHER_URL to enable weather lookups.")]
    NotConfigured,

    /// The weather endpoint could not be reached.
    #[error("Weather endpoint unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// The weather endpoint answered with a non-success status.
    #[error("Weather endpoint returned HTTP {status}: {body}")]
    BadStatus {
        /// The HTTP status code
        status: u16,
        /// The response body, for diagnostics
        body: String,
    },

    /// The weather endpoint answered with a body we could not interpret.
    #[error("Invalid response from weather endpoint: {0}")]
    InvalidResponse(String),
}

/// Represents all possible errors that can occur in the allerease application.
///
/// This enum is the central error type used across the application, with variants
/// for different error categories. It uses `thiserror` for deriving the `Error` trait
/// implementation and formatted error messages.
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    ///
    /// This variant automatically converts from `std::io::Error` through the `From` trait.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors in tracker logic (e.g., an invalid reminder time string).
    #[error("Tracker error: {0}")]
    Tracker(String),

    /// Errors while persisting or restoring application state.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Errors from the advisory weather lookup.
    #[error("Weather error: {0}")]
    Weather(#[from] WeatherError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// This type alias is used throughout the application to represent operations
/// that may fail with an `AppError`.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_app_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let app_error: AppError = io_error.into();

        match app_error {
            AppError::Io(inner) => {
                assert_eq!(inner.kind(), io::ErrorKind::NotFound);
            }
            _ => panic!("Expected AppError::Io variant"),
        }
    }

    #[test]
    fn test_app_error_display() {
        let config_error = AppError::Config("Invalid configuration".to_string());
        assert_eq!(
            format!("{}", config_error),
            "Configuration error: Invalid configuration"
        );

        let tracker_error = AppError::Tracker("Invalid reminder time".to_string());
        assert_eq!(
            format!("{}", tracker_error),
            "Tracker error: Invalid reminder time"
        );
    }

    #[test]
    fn test_storage_error_conversion_to_app_error() {
        let storage_error = StorageError::Busy {
            path: PathBuf::from("/data/allerease_v3_data.json"),
        };
        let app_error: AppError = storage_error.into();

        match app_error {
            AppError::Storage(StorageError::Busy { path }) => {
                assert_eq!(path, PathBuf::from("/data/allerease_v3_data.json"));
            }
            _ => panic!("Expected AppError::Storage variant"),
        }
    }

    #[test]
    fn test_storage_error_source_chaining() {
        use std::error::Error;

        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
        let storage_error = StorageError::Read {
            path: PathBuf::from("/data/allerease_v3_data.json"),
            source: io_error,
        };

        let source = storage_error
            .source()
            .expect("StorageError::Read should have a source");
        let source_io_error = source
            .downcast_ref::<io::Error>()
            .expect("Source should be an io::Error");
        assert_eq!(source_io_error.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_weather_error_display() {
        let error = WeatherError::NotConfigured;
        assert!(format!("{}", error).contains("ALLEREASE_WEATHER_URL"));

        let error = WeatherError::BadStatus {
            status: 503,
            body: "maintenance".to_string(),
        };
        let message = format!("{}", error);
        assert!(message.contains("503"));
        assert!(message.contains("maintenance"));
    }

    #[test]
    fn test_full_error_chain_traversal() {
        use std::error::Error;

        let io_error = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let storage_error = StorageError::Read {
            path: PathBuf::from("/data/allerease_v3_data.json"),
            source: io_error,
        };
        let app_error = AppError::Storage(storage_error);

        let mut error_chain = Vec::new();
        let mut current_error: &dyn Error = &app_error;
        loop {
            error_chain.push(current_error.to_string());
            match current_error.source() {
                Some(source) => current_error = source,
                None => break,
            }
        }

        assert_eq!(
            error_chain.len(),
            3,
            "Error chain should have 3 levels: AppError -> StorageError -> io::Error"
        );
        assert!(error_chain[0].contains("Storage error"));
        assert!(error_chain[1].contains("Failed to read state file"));
        assert!(error_chain[2].contains("no such file"));
    }
}
