use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{anyhow, Context, Result};
use crate::api::ApiConfig;

/// Environment variable overriding `api.url`
pub const API_URL_ENV: &str = "CITRIQ_API_URL";

/// Resolved runtime configuration
///
/// Read from `~/.citriq/rc`, a `key=value` file:
///
/// ```text
/// data.location=./citriq.db
/// api.url=http://localhost:3001
/// api.timeout=10
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_location: PathBuf,
    pub api: ApiConfig,
}

impl Config {
    /// Directory holding the rc file and the default database
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Ok(home.join(".citriq"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("rc"))
    }

    /// Load the rc file (if any) and apply environment overrides
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let config_dir = Self::config_dir()?;

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
            Self::parse(&content, &config_dir)
                .with_context(|| format!("Invalid config file: {}", config_path.display()))?
        } else {
            Self::defaults(&config_dir)
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api.base_url = url.trim().to_string();
            }
        }

        log::debug!("using database {} and API {}", config.data_location.display(), config.api.base_url);
        Ok(config)
    }

    fn defaults(config_dir: &Path) -> Self {
        Self {
            data_location: config_dir.join("citriq.db"),
            api: ApiConfig::default(),
        }
    }

    /// Parse rc content. Relative `data.location` paths resolve against `config_dir`.
    /// Blank lines, `#` comments and unknown keys are ignored.
    pub fn parse(content: &str, config_dir: &Path) -> Result<Self> {
        let mut config = Self::defaults(config_dir);

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim();

            match key.trim() {
                "data.location" => {
                    let path = PathBuf::from(value);
                    config.data_location = if path.is_relative() {
                        config_dir.join(path)
                    } else {
                        path
                    };
                }
                "api.url" => config.api.base_url = value.to_string(),
                "api.timeout" => {
                    let secs: u64 = value
                        .parse()
                        .with_context(|| format!("api.timeout must be a number of seconds, got '{}'", value))?;
                    config.api.timeout = Duration::from_secs(secs);
                }
                other => log::debug!("ignoring unknown config key '{}'", other),
            }
        }

        Ok(config)
    }
}
