mod config;

pub use self::config::{ConfigError, DiagnosticsConfig};
pub use self::config::{ENV_COLOR, ENV_ENABLED, ENV_HIGHLIGHT};
