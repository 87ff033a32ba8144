use directories::ProjectDirs;
use notify::{EventKind, RecursiveMode, Watcher};
use placepick::geo::{DEFAULT_LOOKUP_URL, Locator};
use placepick::places::{DEFAULT_BASE_URL, DEFAULT_LANGUAGE, PlacesConfig};
use placepick::search::DEFAULT_RADIUS;
use placepick::spin::{DEFAULT_DURATION, MIN_TURNS};
use placepick::Coordinates;
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_radius: u32,
    pub default_keyword: String,
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_radius: DEFAULT_RADIUS,
            default_keyword: String::new(),
            timeout_secs: 15,
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SpinConfig {
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "duration_ms")]
    pub duration: Duration,
    pub turns: u32,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            turns: MIN_TURNS,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub places_url: String,
    pub language: String,
    /// Fixed search center. When unset the location comes from `geolocation_url`.
    pub location: Option<Coordinates>,
    pub geolocation_url: String,
    pub search: SearchConfig,
    pub spin: SpinConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            places_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            location: None,
            geolocation_url: DEFAULT_LOOKUP_URL.to_string(),
            search: SearchConfig::default(),
            spin: SpinConfig::default(),
        }
    }
}

impl Config {
    pub fn locator(&self) -> Locator {
        match self.location {
            Some(coords) => Locator::Fixed(coords),
            None => Locator::IpLookup {
                url: self.geolocation_url.clone(),
            },
        }
    }

    pub fn places(&self) -> PlacesConfig {
        PlacesConfig {
            base_url: self.places_url.clone(),
            api_key: self.api_key.clone(),
            language: self.language.clone(),
            timeout: Duration::from_secs(self.search.timeout_secs),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "troia", "lunchwheel").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// `LUNCHWHEEL_API_KEY`, `LUNCHWHEEL_SPIN__TURNS` and so on.
fn environment() -> config::Environment {
    config::Environment::with_prefix("LUNCHWHEEL")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(environment())
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default configuration: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

/// Saves and newly created files count. Deleting the file keeps the
/// configuration already loaded.
fn is_config_change(event: &notify::Event, config_path: &Path) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event.paths.iter().any(|p| p == config_path)
}

async fn watch_config(tx: &Sender<AppEvent>) -> Result<(), ConfigError> {
    let config_path = get_config_path()?;
    let config_dir = config_path
        .parent()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .to_path_buf();
    fs_err::create_dir_all(&config_dir)?;

    let (events_tx, events_rx) = async_channel::unbounded();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        let _ = events_tx.send_blocking(res);
    })?;
    watcher.watch(&config_dir, RecursiveMode::NonRecursive)?;
    log::debug!("Watching {}", config_path.display());

    while let Ok(res) = events_rx.recv().await {
        match res {
            Ok(event) if is_config_change(&event, &config_path) => {
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::warn!("Config watch error: {}", e),
        }
    }
    Ok(())
}

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    if let Err(e) = watch_config(&tx).await {
        log::error!("Config watcher stopped: {}", e);
    }
}
