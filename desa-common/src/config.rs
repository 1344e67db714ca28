//! Configuration loading and root folder resolution
//!
//! Bootstrap settings only: where the database lives, which port to serve,
//! how much artificial latency the store adds, and the log level.
//!
//! Resolution priority for every value:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing config file is not an error: a warning is logged and defaults apply.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the root folder
pub const ROOT_FOLDER_ENV: &str = "DESA_ROOT_FOLDER";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "desa.db";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Root folder holding the database (optional)
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// Explicit database file path, overrides `<root_folder>/desa.db`
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Artificial delay before every store read/write, in milliseconds
    #[serde(default = "default_store_latency_ms")]
    pub store_latency_ms: u64,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            database_path: None,
            port: default_port(),
            store_latency_ms: default_store_latency_ms(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_port() -> u16 {
    5780
}

fn default_store_latency_ms() -> u64 {
    300
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Command-line configuration overrides
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub root_folder: Option<PathBuf>,
    pub port: Option<u16>,
    pub store_latency_ms: Option<u64>,
}

/// Fully resolved bootstrap configuration
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub root_folder: PathBuf,
    pub database_path: PathBuf,
    pub port: u16,
    pub store_latency_ms: u64,
    pub log_level: String,
}

impl BootstrapConfig {
    /// Resolve configuration from CLI overrides, environment, TOML and defaults
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        let toml_config = load_toml_config(overrides.config_file.as_deref())?;

        let root_folder = resolve_root_folder(
            overrides.root_folder.as_deref(),
            ROOT_FOLDER_ENV,
            &toml_config,
        );
        let database_path = toml_config
            .database_path
            .clone()
            .unwrap_or_else(|| root_folder.join(DATABASE_FILE));

        Ok(Self {
            database_path,
            port: overrides.port.unwrap_or(toml_config.port),
            store_latency_ms: overrides
                .store_latency_ms
                .unwrap_or(toml_config.store_latency_ms),
            log_level: toml_config.logging.level,
            root_folder,
        })
    }
}

/// Load TOML bootstrap configuration
///
/// An explicitly named file must exist and parse. Without one, the platform
/// config locations are tried and defaults are used when none is found.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_file() {
            Some(path) => path,
            None => {
                warn!("No config file found, using built-in defaults");
                return Ok(TomlConfig::default());
            }
        },
    };

    let toml_str = std::fs::read_to_string(&path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    let config: TomlConfig = toml::from_str(&toml_str)
        .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

    info!("Loaded TOML configuration from {}", path.display());
    Ok(config)
}

/// Resolve the root folder: CLI argument, environment variable, TOML, default
pub fn resolve_root_folder(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    toml_config: &TomlConfig,
) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &toml_config.root_folder {
        return path.clone();
    }

    get_default_root_folder()
}

/// First existing config file among the platform locations
fn default_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("desa").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/desa/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Get OS-dependent default root folder path
pub fn get_default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        dirs::data_local_dir()
            .map(|d| d.join("desa"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/desa"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("desa"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/desa"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("desa"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\desa"))
    } else {
        PathBuf::from("./desa_data")
    }
}
