//! Configuration management for iwmode

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::error::{IwmodeError, IwmodeResult};

/// Environment variable naming an alternate configuration file
pub const CONFIG_ENV_VAR: &str = "IWMODE_CONFIG";

/// System-wide configuration file, used when present
pub const DEFAULT_CONFIG_PATH: &str = "/etc/iwmode/iwmode.toml";

/// Main iwmode configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IwmodeConfig {
    /// External tool locations
    #[serde(default)]
    pub tools: ToolPaths,
    /// Command execution settings
    #[serde(default)]
    pub runner: RunnerSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolPaths {
    /// iproute2 `ip` binary
    #[serde(default = "default_ip")]
    pub ip: PathBuf,
    /// `iw` binary
    #[serde(default = "default_iw")]
    pub iw: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunnerSettings {
    /// Per-command timeout in seconds; unset waits indefinitely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_ip() -> PathBuf {
    PathBuf::from("ip")
}

fn default_iw() -> PathBuf {
    PathBuf::from("iw")
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            ip: default_ip(),
            iw: default_iw(),
        }
    }
}

impl ToolPaths {
    /// Map a bare program name onto its configured path.
    ///
    /// Programs other than `ip` and `iw` are returned unchanged.
    pub fn resolve(&self, program: &str) -> PathBuf {
        match program {
            "ip" => self.ip.clone(),
            "iw" => self.iw.clone(),
            other => PathBuf::from(other),
        }
    }
}

impl RunnerSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl IwmodeConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> IwmodeResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| IwmodeError::ConfigError(format!("Failed to read config: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| IwmodeError::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> IwmodeResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| IwmodeError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| IwmodeError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Locate and load the active configuration.
    ///
    /// Lookup order: `explicit`, then `$IWMODE_CONFIG`, then
    /// [`DEFAULT_CONFIG_PATH`]. A path given explicitly or through the
    /// environment must exist; a missing system file falls back to defaults.
    pub fn discover(explicit: Option<&Path>) -> IwmodeResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Self::load(PathBuf::from(path));
        }

        let system = Path::new(DEFAULT_CONFIG_PATH);
        if system.exists() {
            return Self::load(system);
        }

        Ok(Self::default())
    }
}
