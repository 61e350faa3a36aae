//! Configuration management for the allerease application.
//!
//! This module handles loading and validating configuration settings from
//! environment variables, with sensible defaults. It supports configuring the
//! data directory that holds the persisted state blob and the optional
//! advisory weather endpoint.
//!
//! # Environment Variables
//!
//! - `ALLEREASE_DIR`: Path to the data directory (defaults to ~/.local/share/allerease)
//! - `ALLEREASE_WEATHER_URL`: Base URL of the weather/AQI endpoint (optional)
//! - `HOME`: Used for expanding the default data directory path

use crate::constants;
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Configuration for the allerease application.
///
/// This struct holds the settings needed to run the application: where the
/// persisted state blob lives and, optionally, which endpoint to ask for
/// advisory weather data.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use allerease::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     data_dir: PathBuf::from("/path/to/data"),
///     weather_url: None,
/// };
/// assert!(config.validate().is_ok());
/// ```
pub struct Config {
    /// Directory where the state blob is stored.
    ///
    /// Loaded from the ALLEREASE_DIR environment variable with a fallback
    /// to ~/.local/share/allerease if not specified.
    pub data_dir: PathBuf,

    /// Base URL of the advisory weather/AQI endpoint, if configured.
    ///
    /// Loaded from ALLEREASE_WEATHER_URL. Weather lookups are purely
    /// informational; leaving this unset only disables the weather command.
    pub weather_url: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &"[REDACTED_PATH]")
            .field("weather_url", &self.weather_url.as_deref().map(|_| "[SET]"))
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The data directory path is expanded with `shellexpand` so `~` and
    /// environment variable references work.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The data directory path expansion fails
    /// - The resulting data directory path is empty
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use allerease::Config;
    ///
    /// match Config::load() {
    ///     Ok(config) => println!("Data directory: {}", config.data_dir.display()),
    ///     Err(err) => eprintln!("Failed to load config: {}", err),
    /// }
    /// ```
    pub fn load() -> AppResult<Self> {
        let data_dir_str = env::var(constants::ENV_VAR_DATA_DIR).unwrap_or_else(|_| {
            let home = env::var(constants::ENV_VAR_HOME).unwrap_or_else(|_| "".to_string());
            format!("{}/{}", home, constants::DEFAULT_DATA_SUBDIR)
        });

        // Expand the path (handles ~ and environment variables)
        let expanded_path = shellexpand::full(&data_dir_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;

        let data_dir = PathBuf::from(expanded_path.into_owned());

        if data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        let weather_url = env::var(constants::ENV_VAR_WEATHER_URL)
            .ok()
            .filter(|url| !url.trim().is_empty());

        Ok(Config {
            data_dir,
            weather_url,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Data directory path is empty" if the data directory path is empty
    /// - "Data directory must be an absolute path" if the path is relative
    /// - "Weather endpoint URL must start with http:// or https://" for a
    ///   malformed weather URL
    pub fn validate(&self) -> AppResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        if !self.data_dir.is_absolute() {
            return Err(AppError::Config(
                "Data directory must be an absolute path".to_string(),
            ));
        }

        if let Some(url) = &self.weather_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AppError::Config(
                    "Weather endpoint URL must start with http:// or https://".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Full path of the persisted state blob inside the data directory.
    pub fn state_file_path(&self) -> PathBuf {
        self.data_dir.join(constants::STATE_FILE_NAME)
    }
}
