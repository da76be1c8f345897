use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

// =============================================================================
// Self-update constants
// =============================================================================

/// Name under which the tool is published to the npm registry
pub const PACKAGE_NAME: &str = "scaffold-cli";

/// Version of the running binary
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default base URL of the registry queried for the latest release
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

// =============================================================================
// Template constants
// =============================================================================

/// Branch used when neither the template nor the caller names one
pub const DEFAULT_BRANCH: &str = "main";

/// Hosts whose repositories default to `master` instead of `main`
pub const MASTER_BRANCH_HOSTS: &[&str] = &["gitee.com"];

// =============================================================================
// Time-related constants
// =============================================================================

/// Number of retries after the first failed clone
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Delay between clone attempts in milliseconds
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1_000;

/// Expected clone duration shown by the estimate reporter in milliseconds
pub const DEFAULT_CLONE_ESTIMATE_MS: u64 = 10_000;

/// Timeout for the whole latest-version request in milliseconds
pub const REGISTRY_TIMEOUT_MS: u64 = 5_000;

/// Timeout for establishing the registry connection in milliseconds
pub const REGISTRY_CONNECT_TIMEOUT_MS: u64 = 3_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// User configuration read from `config.json`
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ScaffoldConfig {
    /// Path to a `templates.json` replacing the built-in templates
    pub templates_path: Option<PathBuf>,
    pub default_branch: Option<String>,
    pub registry_url: Option<String>,
    pub update_check: UpdateCheckConfig,
    pub retry: RetryConfig,
}

/// Self-update check configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct UpdateCheckConfig {
    pub enabled: bool,
}

impl Default for UpdateCheckConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Clone retry configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RetryConfig {
    pub max_retries: u32,
    /// Delay between attempts in milliseconds
    pub retry_delay: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

impl RetryConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay)
    }
}

impl ScaffoldConfig {
    /// Loads the config file at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn default_branch(&self) -> &str {
        self.default_branch.as_deref().unwrap_or(DEFAULT_BRANCH)
    }

    pub fn registry_url(&self) -> &str {
        self.registry_url.as_deref().unwrap_or(DEFAULT_REGISTRY_URL)
    }
}

/// Returns the path to the config file.
/// Uses $XDG_CONFIG_HOME/scaffold/config.json if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/scaffold/config.json.
pub fn config_path() -> PathBuf {
    dir_with_env(
        std::env::var("XDG_CONFIG_HOME").ok(),
        dirs::home_dir(),
        ".config",
    )
    .join("config.json")
}

/// Returns the path to the data directory for scaffold.
/// Uses $XDG_DATA_HOME/scaffold if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/scaffold,
/// or ./scaffold if neither is available.
pub fn data_dir() -> PathBuf {
    dir_with_env(
        std::env::var("XDG_DATA_HOME").ok(),
        dirs::home_dir(),
        ".local/share",
    )
}

fn dir_with_env(
    xdg_home: Option<String>,
    home_dir: Option<PathBuf>,
    home_relative: &str,
) -> PathBuf {
    let base = xdg_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(home_relative)))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join("scaffold")
}
