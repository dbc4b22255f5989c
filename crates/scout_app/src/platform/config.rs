use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::LevelFilter;
use scout_engine::{BatchSettings, ProbeSettings, DEFAULT_BATCH_SIZE};
use scout_logging::{parse_level, scout_info, scout_warn};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILENAME: &str = "asset_scout.ron";

/// User-tunable settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    pub batch_size: NonZeroUsize,
    pub probe_timeout_ms: u64,
    pub connect_timeout_ms: u64,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub user_agent: Option<String>,
    pub log_level: String,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        let probe = ProbeSettings::default();
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            probe_timeout_ms: probe.probe_timeout.as_millis() as u64,
            connect_timeout_ms: probe.connect_timeout.as_millis() as u64,
            redirect_limit: probe.redirect_limit,
            max_bytes: probe.max_bytes,
            user_agent: None,
            log_level: "info".to_string(),
        }
    }
}

impl ScoutConfig {
    pub fn probe_settings(&self) -> ProbeSettings {
        let defaults = ProbeSettings::default();
        ProbeSettings {
            probe_timeout: Duration::from_millis(self.probe_timeout_ms.max(1)),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms.max(1)),
            redirect_limit: self.redirect_limit,
            max_bytes: self.max_bytes,
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
        }
    }

    pub fn batch_settings(&self) -> BatchSettings {
        BatchSettings {
            batch_size: self.batch_size,
        }
    }

    /// Configured level, or `Info` when the name is not recognized.
    pub fn log_level(&self) -> LevelFilter {
        parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

/// Where the active configuration came from; logged once logging is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Defaults,
    File(PathBuf),
    /// The file could not be read or parsed; defaults are in effect.
    Fallback { path: PathBuf, reason: String },
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::Defaults => scout_info!("Using default config"),
            ConfigSource::File(path) => scout_info!("Loaded config from {:?}", path),
            ConfigSource::Fallback { path, reason } => {
                scout_warn!("Ignoring config {:?}: {}", path, reason)
            }
        }
    }
}

/// Loads the config from `explicit`, else from the default file in the
/// working directory. A missing default file is not an error; a file that
/// cannot be read or parsed falls back to defaults.
pub fn load_config(explicit: Option<&Path>) -> (ScoutConfig, ConfigSource) {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILENAME);
            if !default_path.exists() {
                return (ScoutConfig::default(), ConfigSource::Defaults);
            }
            default_path
        }
    };

    let parsed = fs::read_to_string(&path)
        .map_err(|err| err.to_string())
        .and_then(|content| parse_config(&content).map_err(|err| err.to_string()));
    match parsed {
        Ok(config) => (config, ConfigSource::File(path)),
        Err(reason) => (
            ScoutConfig::default(),
            ConfigSource::Fallback { path, reason },
        ),
    }
}

pub fn parse_config(content: &str) -> Result<ScoutConfig, ron::error::SpannedError> {
    ron::from_str(content)
}
