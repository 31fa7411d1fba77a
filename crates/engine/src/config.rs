use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use metadata::TagMap;
use serde::{Deserialize, Serialize};

use crate::scheduler::DEFAULT_WORKERS;

pub const CONFIG_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub version: u32,
    pub host: String,
    pub token: String,
    pub workers: usize,
    pub page_size: usize,
    pub timeout_secs: u64,
    pub sections: Vec<String>,
    pub dry_run: bool,
    pub tag_overrides: BTreeMap<String, String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            host: "http://127.0.0.1:32400".to_string(),
            token: String::new(),
            workers: DEFAULT_WORKERS,
            page_size: 100,
            timeout_secs: 30,
            sections: Vec::new(),
            dry_run: false,
            tag_overrides: BTreeMap::new(),
        }
    }
}

impl SyncConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn tag_map(&self) -> TagMap {
        let mut tags = TagMap::builtin();
        tags.extend(
            self.tag_overrides
                .iter()
                .map(|(from, to)| (from.clone(), to.clone())),
        );
        tags
    }

    /// Applies `PLEX_HOST`, `PLEX_TOKEN` and `PLEX_WORKERS` on top of the file.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(
            env::var("PLEX_HOST").ok(),
            env::var("PLEX_TOKEN").ok(),
            env::var("PLEX_WORKERS").ok(),
        )
    }

    fn apply_overrides(
        &mut self,
        host: Option<String>,
        token: Option<String>,
        workers: Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = host.filter(|value| !value.trim().is_empty()) {
            self.host = host;
        }
        if let Some(token) = token.filter(|value| !value.trim().is_empty()) {
            self.token = token;
        }
        if let Some(workers) = workers.filter(|value| !value.trim().is_empty()) {
            self.workers = workers
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("PLEX_WORKERS={}", workers)))?;
        }
        self.normalize();
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host is empty".to_string()));
        }
        if self.token.trim().is_empty() {
            return Err(ConfigError::Invalid("token is empty".to_string()));
        }
        Ok(())
    }

    fn normalize(&mut self) {
        self.host = self.host.trim().trim_end_matches('/').to_string();
        self.token = self.token.trim().to_string();
        if self.workers == 0 {
            self.workers = DEFAULT_WORKERS;
        }
        if self.page_size == 0 {
            self.page_size = 100;
        }
        if self.timeout_secs == 0 {
            self.timeout_secs = 30;
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "io error: {}", err),
            ConfigError::Yaml(err) => write!(f, "yaml error: {}", err),
            ConfigError::Invalid(detail) => write!(f, "invalid config: {}", detail),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Yaml(err)
    }
}

pub fn config_path_from_env() -> PathBuf {
    match env::var("PLEX_LOCALIZE_CONFIG") {
        Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => default_config_path(),
    }
}

fn default_config_path() -> PathBuf {
    match env::current_exe() {
        Ok(exe) => exe
            .parent()
            .map(|dir| dir.join("config.yaml"))
            .unwrap_or_else(|| PathBuf::from("config.yaml")),
        Err(_) => PathBuf::from("config.yaml"),
    }
}

pub fn load_or_create_config(path: &Path) -> Result<(SyncConfig, bool), ConfigError> {
    if path.exists() {
        let contents = fs::read_to_string(path)?;
        let mut config: SyncConfig = serde_yaml::from_str(&contents)?;
        if config.version < CONFIG_VERSION {
            config.version = CONFIG_VERSION;
        }
        config.normalize();
        return Ok((config, false));
    }

    let config = SyncConfig::default();
    save_config(path, &config)?;
    Ok((config, true))
}

pub fn save_config(path: &Path, config: &SyncConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let contents = serde_yaml::to_string(config)?;
    fs::write(path, contents)?;
    Ok(())
}
