//! Configuration file support.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/workout/config.toml`.

use crate::templates::{default_table, TemplateTable};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub templates: TemplatesConfig,

    #[serde(default)]
    pub timer: TimerConfig,

    #[serde(default)]
    pub custom: CustomDefaults,

    #[serde(default)]
    pub export: ExportConfig,
}

/// Template table source
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct TemplatesConfig {
    /// JSON or TOML template table; the built-in table is used when unset
    pub path: Option<PathBuf>,

    /// Program selected when none is given; defaults to the table's first program
    pub default_program: Option<String>,
}

/// Rest timer parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_session_seconds")]
    pub session_default_seconds: u32,

    #[serde(default = "default_session_seconds")]
    pub fallback_rest_seconds: u32,

    /// Clock period in milliseconds
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            session_default_seconds: default_session_seconds(),
            fallback_rest_seconds: default_session_seconds(),
            tick_millis: default_tick_millis(),
        }
    }
}

/// Pre-filled values for manually entered exercises
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CustomDefaults {
    #[serde(default = "default_sets")]
    pub sets: u32,

    #[serde(default = "default_reps")]
    pub reps: u32,

    #[serde(default)]
    pub weight: f64,

    #[serde(default = "default_rest")]
    pub rest: String,

    #[serde(default = "default_duration")]
    pub duration: String,
}

impl Default for CustomDefaults {
    fn default() -> Self {
        Self {
            sets: default_sets(),
            reps: default_reps(),
            weight: 0.0,
            rest: default_rest(),
            duration: default_duration(),
        }
    }
}

/// Where exported CSV files are written
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_dir")]
    pub dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: default_export_dir(),
        }
    }
}

// Default value functions
fn default_session_seconds() -> u32 {
    crate::timer::DEFAULT_REST_SECONDS
}

fn default_tick_millis() -> u64 {
    1000
}

fn default_sets() -> u32 {
    crate::types::DEFAULT_SETS
}

fn default_reps() -> u32 {
    crate::types::DEFAULT_REPS
}

fn default_rest() -> String {
    "60s".into()
}

fn default_duration() -> String {
    "30min".into()
}

fn default_export_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("workout")
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("workout")
            .join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// The configured template table, or the built-in one when no path is set
    pub fn template_table(&self) -> Result<TemplateTable> {
        match &self.templates.path {
            Some(path) => TemplateTable::load(path),
            None => Ok(default_table().clone()),
        }
    }

    /// Configured default program if the table has it, else the table's first program
    pub fn default_program(&self, table: &TemplateTable) -> Option<String> {
        self.templates
            .default_program
            .clone()
            .filter(|p| table.has_program(p))
            .or_else(|| table.programs().into_iter().next())
    }
}
