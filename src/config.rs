//! CLI configuration.
//!
//! Configuration is loaded in the following order (later overrides earlier):
//! 1. Default values
//! 2. YAML config file (if specified via DFATRACE_CONFIG or --config)
//! 3. Environment variables

use dfatrace_render::{DotRenderer, OutputFormat, Theme};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Diagram output configuration.
    pub output: OutputConfig,
    /// Diagram styling.
    pub theme: Theme,
}

impl Config {
    /// Loads configuration from `path` (or DFATRACE_CONFIG), then applies
    /// environment variable overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match std::env::var("DFATRACE_CONFIG") {
                Ok(path) => Self::from_file(&path)?,
                Err(_) => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.to_path_buf(), e))?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        self.output.apply_env_overrides();

        if let Ok(color) = std::env::var("DFATRACE_HIGHLIGHT_COLOR") {
            if !color.is_empty() {
                self.theme.highlight_color = color;
            }
        }
    }

    /// Checks values that deserialize fine but cannot be rendered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.theme.highlight_color.trim().is_empty() || self.theme.default_color.trim().is_empty()
        {
            return Err(ConfigError::ValidationError(
                "theme colours must not be empty".to_string(),
            ));
        }
        if self.theme.highlight_width <= 0.0 || self.theme.default_width <= 0.0 {
            return Err(ConfigError::ValidationError(
                "theme pen widths must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Diagram output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory diagrams are written under.
    pub dir: PathBuf,
    /// Artifact format.
    pub format: OutputFormat,
    /// Path or name of the graphviz `dot` executable.
    pub dot_binary: PathBuf,
    /// Keep the DOT source next to rendered images.
    pub keep_source: bool,
    /// Write each run into its own `session_<timestamp>` directory.
    pub sessions: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./assets"),
            format: OutputFormat::Png,
            dot_binary: PathBuf::from("dot"),
            keep_source: false,
            sessions: true,
        }
    }
}

impl OutputConfig {
    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("DFATRACE_OUTPUT_DIR") {
            self.dir = PathBuf::from(dir);
        }

        if let Ok(format) = std::env::var("DFATRACE_FORMAT") {
            match format.parse() {
                Ok(parsed) => self.format = parsed,
                Err(e) => tracing::warn!("ignoring DFATRACE_FORMAT: {}", e),
            }
        }

        if let Ok(binary) = std::env::var("DFATRACE_DOT") {
            self.dot_binary = PathBuf::from(binary);
        }

        if let Ok(keep) = std::env::var("DFATRACE_KEEP_SOURCE") {
            self.keep_source = keep == "1" || keep.to_lowercase() == "true";
        }

        if let Ok(sessions) = std::env::var("DFATRACE_SESSIONS") {
            self.sessions = sessions == "1" || sessions.to_lowercase() == "true";
        }
    }

    /// Builds the renderer described by this configuration.
    pub fn renderer(&self) -> DotRenderer {
        DotRenderer::new(self.format)
            .with_dot_binary(&self.dot_binary)
            .with_keep_source(self.keep_source)
    }
}

/// Configuration error.
#[derive(Debug)]
pub enum ConfigError {
    IoError(PathBuf, std::io::Error),
    ParseError(PathBuf, String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(path, e) => {
                write!(f, "failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::ValidationError(msg) => {
                write!(f, "configuration validation failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
