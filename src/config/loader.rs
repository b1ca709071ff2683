use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::ShellConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl ShellConfig {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/simshell/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("simshell").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// - If the file doesn't exist, returns `ShellConfig::default()`.
    /// - Otherwise behaves like [`ShellConfig::load_from`].
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(ShellConfig::default());
        }

        Self::load_from(&path)
    }

    /// Reads, parses and validates the given TOML file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: ShellConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The read chunk size is non-zero
    /// - Escape and quote characters differ and are not whitespace
    /// - Operators are non-empty, pairwise distinct and free of whitespace
    /// - The path separator is not whitespace
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.terminal.read_chunk_size == 0 {
            return Err(invalid("terminal.read_chunk_size must be greater than zero"));
        }
        // Line terminators must reach the line reader as data.
        if matches!(self.terminal.interrupt_byte, b'\n' | b'\r') {
            return Err(invalid("terminal.interrupt_byte must not be a line terminator"));
        }

        let syntax = &self.syntax;
        if syntax.escape_char == syntax.quote_char {
            return Err(invalid("syntax.escape_char and syntax.quote_char must differ"));
        }
        if syntax.escape_char.is_whitespace() || syntax.quote_char.is_whitespace() {
            return Err(invalid("syntax escape and quote characters must not be whitespace"));
        }

        let operators = syntax.operators();
        for (i, op) in operators.iter().enumerate() {
            if op.is_empty() || op.chars().any(char::is_whitespace) {
                return Err(ConfigError::ValidationError {
                    message: format!("Operator '{}' must be non-empty and contain no whitespace", op),
                });
            }
            if operators[..i].contains(op) {
                return Err(ConfigError::ValidationError {
                    message: format!("Operator '{}' is configured more than once", op),
                });
            }
        }

        if self.paths.separator.is_whitespace() {
            return Err(invalid("paths.separator must not be whitespace"));
        }

        Ok(())
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::ValidationError {
        message: message.to_string(),
    }
}
