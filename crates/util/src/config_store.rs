//! Loading of the OTP field configuration file.
//!
//! The configuration is a small JSON document deserialized into
//! [`OtpConfig`]. The file is looked up at an explicit path, then the
//! `OTPVIEW_CONFIG_PATH` override, then the standard configuration directory
//! (`~/.config/otpview/config.json` on most platforms). A missing file yields
//! defaults; a file that does not parse is logged and replaced by defaults;
//! values that parse but cannot build a field are reported as errors.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use otpview_types::{ConfigError, OtpConfig};
use thiserror::Error;
use tracing::{debug, warn};

use crate::path_processing::{app_config_dir, expand_tilde};

/// Environment variable allowing callers to override the config file path.
pub const CONFIG_PATH_ENV: &str = "OTPVIEW_CONFIG_PATH";

/// Default filename for the JSON payload.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Error surfaced when loading configuration fails.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// I/O failure other than a missing file.
    #[error("config I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Serialization failure while writing a config file.
    #[error("config serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The file parsed but describes a field that cannot be built.
    #[error("invalid config in {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
}

/// Configuration plus the path it was resolved from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub config: OtpConfig,
    /// Whether the file existed and was parsed.
    pub from_file: bool,
}

/// Resolves the config path: explicit argument, env override, default.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return expand_tilde(&path.to_string_lossy());
    }
    if let Ok(path) = env::var(CONFIG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }
    app_config_dir().join(CONFIG_FILE_NAME)
}

/// Loads and validates the configuration.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigLoadError> {
    let path = resolve_config_path(explicit);
    let (config, from_file) = read_config(&path)?;
    config.validate().map_err(|source| ConfigLoadError::Invalid {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), from_file, count = config.count, "loaded otp config");
    Ok(LoadedConfig { path, config, from_file })
}

/// Writes `config` as pretty JSON, creating parent directories.
pub fn save_config(path: &Path, config: &OtpConfig) -> Result<(), ConfigLoadError> {
    let io_err = |source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let data = serde_json::to_string_pretty(config)?;
    fs::write(path, data).map_err(io_err)?;
    Ok(())
}

fn read_config(path: &Path) -> Result<(OtpConfig, bool), ConfigLoadError> {
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(config) => Ok((config, true)),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse config file; using defaults"
                );
                Ok((OtpConfig::default(), false))
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok((OtpConfig::default(), false)),
        Err(source) => Err(ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
