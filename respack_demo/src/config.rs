//! Configuration loading traits and types.
//!
//! The demo reads one TOML file: the common `[shared]` section plus a
//! `[layout]` section describing how raw result codes are decoded.
//!
//! # TOML Example
//!
//! ```toml
//! [shared]
//! log_level = "debug"
//! service_name = "respack-demo"
//!
//! [layout]
//! storage_bits = 8
//! aggregate_bits = 32
//!
//! [[layout.categories]]
//! name = "category"
//! width = 2
//!
//! [[layout.categories]]
//! name = "subcategory"
//! width = 2
//! ```

use respack::{LayoutError, RuntimeLayout};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::Level;

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// The `[layout]` section does not describe a valid layout.
    #[error("Invalid result layout: {0}")]
    Layout(#[from] LayoutError),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, includes dropped and replaced aggregate results.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Common configuration fields.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "respack-demo"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Application instance identifier.
    pub service_name: String,
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - `service_name` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            service_name: "respack-demo".to_string(),
        }
    }
}

/// One named category field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Label used in reports.
    pub name: String,
    /// Field width in bits.
    pub width: u32,
}

fn default_storage_bits() -> u32 {
    8
}

fn default_aggregate_bits() -> u32 {
    32
}

/// Layout of the raw result codes handled by `decode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Width of one result (8, 16, 32 or 64).
    #[serde(default = "default_storage_bits")]
    pub storage_bits: u32,

    /// Width of an aggregate (16, 32, 64 or 128).
    #[serde(default = "default_aggregate_bits")]
    pub aggregate_bits: u32,

    /// Categories from the most significant bit down.
    pub categories: Vec<CategoryConfig>,
}

impl LayoutConfig {
    /// Resolve the layout descriptor, checking the aggregate width as well.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Layout` for any descriptor `RuntimeLayout`
    /// rejects, and `ConfigError::ValidationError` for duplicate or empty
    /// category names.
    pub fn to_runtime(&self) -> Result<RuntimeLayout, ConfigError> {
        for (index, category) in self.categories.iter().enumerate() {
            if category.name.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "category {index} has no name"
                )));
            }
            if self.categories[..index].iter().any(|c| c.name == category.name) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate category name '{}'",
                    category.name
                )));
            }
        }

        let widths: Vec<u32> = self.categories.iter().map(|c| c.width).collect();
        let layout = RuntimeLayout::new(self.storage_bits, &widths)?;
        layout.aggregate_capacity(self.aggregate_bits)?;
        Ok(layout)
    }

    /// Category names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }
}

impl Default for LayoutConfig {
    /// The layout of the sample application's results.
    fn default() -> Self {
        Self {
            storage_bits: default_storage_bits(),
            aggregate_bits: default_aggregate_bits(),
            categories: vec![
                CategoryConfig {
                    name: "category".to_string(),
                    width: 2,
                },
                CategoryConfig {
                    name: "subcategory".to_string(),
                    width: 2,
                },
            ],
        }
    }
}

/// Full demo configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub shared: SharedConfig,

    #[serde(default)]
    pub layout: LayoutConfig,
}

impl DemoConfig {
    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns the first section error found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.layout.to_runtime().map(|_| ())
    }
}

/// Trait for loading configuration from TOML files.
///
/// Works with any type implementing `serde::de::DeserializeOwned`.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}
