//! # Configuration management for Rotunda Core
//!
//! This module provides configuration management for the Rotunda window
//! manager. It handles loading, saving, and validating engine settings.
//!
//! Every angular constant of the layout lives here so that hosts can
//! tune arc geometry, focus behavior, and drag feel without touching
//! engine code. Settings are loaded in the following order of priority:
//! 1. Explicit file passed by the host (highest priority)
//! 2. Configuration file in the user config directory
//! 3. Default values (lowest priority)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Rotunda.
///
/// This struct contains all configurable settings for the engine,
/// organized into logical groups. It supports serialization and
/// deserialization for persistence and provides validation methods.
///
/// # Example
///
/// ```rust
/// use rotunda_core::Config;
///
/// let config = Config::default();
/// assert_eq!(config.layout.display_cap, 6);
/// assert_eq!(config.layout.management_spacing, 20.0);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Arc geometry settings
    pub layout: LayoutConfig,
    /// Focus tracking settings
    pub focus: FocusConfig,
    /// Drag gesture settings
    pub drag: DragConfig,
    /// Advanced/experimental settings
    pub advanced: AdvancedConfig,
}

/// Arc geometry configuration settings.
///
/// All angles are in degrees. The arranged spacing is derived from the
/// display cap (`360 / display_cap`) so the arranged ring always uses
/// full-circle slots regardless of how many views are open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Maximum number of views on the displayed rail
    pub display_cap: usize,
    /// Slot spacing of the management arcs, in degrees
    pub management_spacing: f32,
    /// Elevation of the displayed arc in management mode, in degrees
    pub displayed_elevation: f32,
    /// Elevation of the hidden arc in management mode, in degrees
    pub hidden_elevation: f32,
    /// Elevation of the arranged ring, in degrees
    pub arranged_elevation: f32,
    /// Uniform view scale in arranged mode
    pub arranged_scale: f32,
    /// Uniform preview scale in management mode
    pub management_scale: f32,
}

/// Focus tracking configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusConfig {
    /// Angular tolerance around the gaze azimuth, in degrees
    pub tolerance: f32,
}

/// Drag gesture configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragConfig {
    /// Elevation distance a drag must cover to leave its origin arc,
    /// in degrees
    pub arc_leave_threshold: f32,
    /// Base angular speed of shift animations, in degrees per second
    pub shift_speed: f32,
    /// Angular distance under which a shifting view snaps to its
    /// target, in degrees
    pub settle_epsilon: f32,
}

/// Advanced/experimental configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvancedConfig {
    /// Enable debug mode
    pub debug_mode: bool,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            display_cap: 6,
            management_spacing: 20.0,
            displayed_elevation: -22.0,
            hidden_elevation: 27.0,
            arranged_elevation: 0.0,
            arranged_scale: 1.0,
            management_scale: 0.28,
        }
    }
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self { tolerance: 30.0 }
    }
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            arc_leave_threshold: 20.0,
            shift_speed: 90.0,
            settle_epsilon: 0.5,
        }
    }
}

impl Default for AdvancedConfig {
    fn default() -> Self {
        Self {
            debug_mode: false,
            log_level: "info".to_string(),
        }
    }
}

impl LayoutConfig {
    /// Slot spacing of the arranged ring, in degrees.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_core::config::LayoutConfig;
    ///
    /// assert_eq!(LayoutConfig::default().arranged_spacing(), 60.0);
    /// ```
    pub fn arranged_spacing(&self) -> f32 {
        360.0 / self.display_cap as f32
    }
}

impl Config {
    /// Load configuration from the default location or create default config.
    ///
    /// This method attempts to load configuration from the standard config file
    /// location. If the file doesn't exist or can't be loaded, it returns the
    /// default configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_core::Config;
    ///
    /// let config = Config::load_or_default().unwrap();
    /// ```
    pub fn load_or_default() -> Result<Self> {
        match Self::load() {
            Ok(config) => Ok(config),
            Err(_) => {
                let config = Self::default();
                // Try to save default config
                let _ = config.save();
                Ok(config)
            }
        }
    }

    /// Load configuration from the default config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use rotunda_core::Config;
    ///
    /// let config = Config::load()?;
    /// # Ok::<(), rotunda_core::Error>(())
    /// ```
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::load_from_file(&config_path)
    }

    /// Load configuration from a specific file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use rotunda_core::Config;
    /// use std::path::Path;
    ///
    /// let config = Config::load_from_file(Path::new("my_config.toml"))?;
    /// # Ok::<(), rotunda_core::Error>(())
    /// ```
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path()?;
        self.save_to_file(&config_path)
    }

    /// Save configuration to a specific file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path where to save the configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use rotunda_core::Config;
    /// use std::path::Path;
    ///
    /// let config = Config::default();
    /// config.save_to_file(Path::new("my_config.toml"))?;
    /// # Ok::<(), rotunda_core::Error>(())
    /// ```
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.validate()?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))?;

        // Ensure directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::config(format!("Failed to create config directory: {}", e)))?;
        }

        std::fs::write(path, content)
            .map_err(|e| Error::config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate the configuration values.
    ///
    /// This method checks that all configuration values are within
    /// acceptable ranges and combinations.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any configuration value is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_core::Config;
    ///
    /// let config = Config::default();
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        // Validate layout settings
        if self.layout.display_cap == 0 || self.layout.display_cap > 24 {
            return Err(Error::validation(
                "layout.display_cap",
                "Display cap must be between 1 and 24",
            ));
        }

        if self.layout.management_spacing <= 0.0 || self.layout.management_spacing > 90.0 {
            return Err(Error::validation(
                "layout.management_spacing",
                "Management spacing must be between 0 and 90 degrees",
            ));
        }

        if self.layout.displayed_elevation.abs() > 90.0
            || self.layout.hidden_elevation.abs() > 90.0
            || self.layout.arranged_elevation.abs() > 90.0
        {
            return Err(Error::validation(
                "layout.elevation",
                "Elevations must be within -90 to 90 degrees",
            ));
        }

        if self.layout.arranged_scale <= 0.0 || self.layout.management_scale <= 0.0 {
            return Err(Error::validation(
                "layout.scale",
                "View scales must be positive",
            ));
        }

        // Validate focus settings
        if self.focus.tolerance <= 0.0 || self.focus.tolerance > 180.0 {
            return Err(Error::validation(
                "focus.tolerance",
                "Focus tolerance must be between 0 and 180 degrees",
            ));
        }

        // Validate drag settings
        if self.drag.arc_leave_threshold <= 0.0 {
            return Err(Error::validation(
                "drag.arc_leave_threshold",
                "Arc leave threshold must be positive",
            ));
        }

        if self.drag.shift_speed <= 0.0 {
            return Err(Error::validation(
                "drag.shift_speed",
                "Shift speed must be positive",
            ));
        }

        if self.drag.settle_epsilon <= 0.0 {
            return Err(Error::validation(
                "drag.settle_epsilon",
                "Settle epsilon must be positive",
            ));
        }

        // Validate advanced settings
        if !["error", "warn", "info", "debug", "trace"].contains(&self.advanced.log_level.as_str())
        {
            return Err(Error::validation(
                "advanced.log_level",
                "Log level must be one of: error, warn, info, debug, trace",
            ));
        }

        Ok(())
    }

    /// Get the default configuration file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined.
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::config("Could not determine config directory"))?
            .join("rotunda");

        Ok(config_dir.join("config.toml"))
    }

    /// Get the configuration directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("rotunda"))
            .ok_or_else(|| Error::config("Could not determine config directory"))
    }

    /// Reset configuration to defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rotunda_core::Config;
    ///
    /// let mut config = Config::default();
    /// config.focus.tolerance = 45.0;
    /// config.reset_to_defaults();
    /// assert_eq!(config.focus.tolerance, 30.0);
    /// ```
    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }
}
