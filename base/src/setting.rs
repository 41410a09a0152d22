use async_once_cell::OnceCell;
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde_derive::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use super::{util, CLI_NAME};

lazy_static! {
    pub static ref SETTINGS: Arc<OnceCell<Settings>> = Arc::new(OnceCell::new());
}

static DEFAULT_DB_FILE: &str = "lake.db";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Settings global store is unitialized")]
    Uninitialized,

    #[error("Could not locate program directories")]
    Directories,

    #[error("Path is not valid UTF-8: {0:?}")]
    InvalidPath(PathBuf),

    #[error("Could not parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not read config file or prepare data directory: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub db: String,

    #[serde(default)]
    pub pool: Pool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Seconds to wait when opening or acquiring a connection.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    8
}

impl Default for Pool {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout: default_connect_timeout(),
            sqlx_logging: false,
        }
    }
}

fn project_dirs() -> Result<ProjectDirs, SettingsError> {
    ProjectDirs::from("org", "apache", CLI_NAME).ok_or(SettingsError::Directories)
}

pub fn load(path: Option<PathBuf>) -> Result<Settings, SettingsError> {
    let path = match path {
        Some(path) => path,
        None => project_dirs()?.config_dir().join("config.toml"),
    };
    tracing::info! {?path, "Loading config file"};
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info! {?path, "Config file not found, using defaults"};
            String::new()
        }
        Err(e) => return Err(SettingsError::Io(e)),
    };
    let mut set = parse(content.as_str())?;
    set = generate_default(set)?;
    tracing::trace! {settings = ?set, "Loaded settings"};
    Ok(set)
}

pub fn parse(content: &str) -> Result<Settings, SettingsError> {
    Ok(toml::from_str(content)?)
}

pub fn generate_default(mut set: Settings) -> Result<Settings, SettingsError> {
    if set.db == String::default() {
        set.db = default_database_url(project_dirs()?.data_dir())?;
    }
    Ok(set)
}

/// Points at a SQLite file inside `data_dir`, creating the directory on the way.
pub fn default_database_url(data_dir: &Path) -> Result<String, SettingsError> {
    util::mkdirp(data_dir)?;
    Ok(format!(
        "sqlite://{}?mode=rwc",
        util::path_to_str(&data_dir.join(DEFAULT_DB_FILE))?
    ))
}

pub fn get_settings() -> Result<&'static Settings, SettingsError> {
    SETTINGS.get().ok_or(SettingsError::Uninitialized)
}
