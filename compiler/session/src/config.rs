use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use irbridge_diagnostics::{ColorChoice, UseColors};

/// Selects when diagnostic output is colored, see `UseColors`
pub const ENV_COLOR: &str = "IRBRIDGE_COLOR";
/// Renders the message prefix of a diagnostic in bold when set
pub const ENV_HIGHLIGHT: &str = "IRBRIDGE_HIGHLIGHT";
/// Disables diagnostic printing entirely when falsy
pub const ENV_ENABLED: &str = "IRBRIDGE_DEBUG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: {message}")]
    InvalidEnv { var: &'static str, message: String },
    #[error("invalid value for diagnostics.{key}: expected {expected}")]
    InvalidValue { key: String, expected: &'static str },
    #[error("unknown configuration key diagnostics.{0}")]
    UnknownKey(String),
    #[error("expected diagnostics to be a table")]
    NotATable,
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unable to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
}

/// Controls how diagnostics are rendered to the error stream
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DiagnosticsConfig {
    pub color: ColorChoice,
    pub highlight_prefix: bool,
    pub enabled: bool,
}
impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            color: ColorChoice::Auto,
            highlight_prefix: false,
            enabled: true,
        }
    }
}
impl DiagnosticsConfig {
    /// Builds a configuration from the defaults, overridden by the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides(|var| {
            env::var_os(var).map(|value| value.to_string_lossy().into_owned())
        })
    }

    /// Overrides any settings for which `lookup` has a value.
    ///
    /// `lookup` is called with the name of each recognized environment variable.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_COLOR) {
            let colors = value
                .parse::<UseColors>()
                .map_err(|message| ConfigError::InvalidEnv {
                    var: ENV_COLOR,
                    message: message.to_string(),
                })?;
            self.color = colors.into();
        }
        if let Some(value) = lookup(ENV_HIGHLIGHT) {
            self.highlight_prefix = parse_env_flag(ENV_HIGHLIGHT, &value)?;
        }
        if let Some(value) = lookup(ENV_ENABLED) {
            self.enabled = parse_env_flag(ENV_ENABLED, &value)?;
        }
        log::debug!("diagnostics configuration: {:?}", &self);
        Ok(self)
    }

    /// Reads the `[diagnostics]` table of the TOML document at `path`
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Reads the `[diagnostics]` table of a TOML document
    ///
    /// Other tables are ignored, so the settings can live alongside unrelated
    /// configuration. Missing keys keep their default values.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let document: toml::Value = source.parse()?;
        let mut config = Self::default();
        let table = match document.get("diagnostics") {
            None => return Ok(config),
            Some(toml::Value::Table(table)) => table,
            Some(_) => return Err(ConfigError::NotATable),
        };
        for (key, value) in table.iter() {
            match key.as_str() {
                "color" => {
                    config.color = value
                        .as_str()
                        .and_then(|s| s.parse::<UseColors>().ok())
                        .ok_or_else(|| ConfigError::InvalidValue {
                            key: key.clone(),
                            expected: "one of auto, always, ansi, never",
                        })?
                        .into();
                }
                "highlight_prefix" => {
                    config.highlight_prefix = expect_bool(key, value)?;
                }
                "enabled" => {
                    config.enabled = expect_bool(key, value)?;
                }
                _ => return Err(ConfigError::UnknownKey(key.clone())),
            }
        }
        Ok(config)
    }
}

fn expect_bool(key: &str, value: &toml::Value) -> Result<bool, ConfigError> {
    value.as_bool().ok_or_else(|| ConfigError::InvalidValue {
        key: key.to_string(),
        expected: "a boolean",
    })
}

fn parse_env_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim() {
        v if ["1", "true", "yes", "on"].iter().any(|t| v.eq_ignore_ascii_case(t)) => Ok(true),
        v if ["0", "false", "no", "off"].iter().any(|f| v.eq_ignore_ascii_case(f)) => Ok(false),
        other => Err(ConfigError::InvalidEnv {
            var,
            message: format!("expected a boolean, got '{}'", other),
        }),
    }
}
