use std::fs;
use std::path::{Path, PathBuf};

use dirs_next as dirs;
use serde::Deserialize;

use crate::error::AppError;

pub const DEFAULT_SEARCH_URL: &str = "https://search.maven.org/solrsearch/select";
pub const DEFAULT_REPOSITORY_URL: &str = "https://repo1.maven.org/maven2";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub launcher: LauncherConfig,
    #[serde(default)]
    pub deps: DepsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    pub docker: String,
    pub mount_root: String,
    pub mount_target: String,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            docker: "docker".to_string(),
            mount_root: "~/docker-mnt".to_string(),
            mount_target: "/mnt/docker-mnt".to_string(),
        }
    }
}

impl LauncherConfig {
    pub fn mount_root(&self) -> Result<PathBuf, AppError> {
        expand_home(&self.mount_root).map(PathBuf::from)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DepsConfig {
    pub maven: String,
    pub search_url: String,
    pub repository_url: String,
    pub http_timeout_secs: u64,
    pub work_dir: String,
}

impl Default for DepsConfig {
    fn default() -> Self {
        Self {
            maven: "mvn".to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            repository_url: DEFAULT_REPOSITORY_URL.to_string(),
            http_timeout_secs: 10,
            work_dir: ".".to_string(),
        }
    }
}

impl DepsConfig {
    pub fn work_dir(&self) -> Result<PathBuf, AppError> {
        expand_home(&self.work_dir).map(PathBuf::from)
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        let path = config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }
}

pub fn config_file_path() -> Result<PathBuf, AppError> {
    let config_root = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .ok_or_else(|| {
            AppError::config("Unable to determine configuration directory for this platform")
        })?;
    Ok(config_root.join("devkit").join("config.toml"))
}

pub fn expand_home(value: &str) -> Result<String, AppError> {
    if !value.starts_with('~') {
        return Ok(value.to_string());
    }
    let home_dir = dirs::home_dir().ok_or_else(|| {
        AppError::config("Unable to expand '~' because the home directory is unknown")
    })?;
    if value == "~" {
        Ok(home_dir.display().to_string())
    } else if let Some(stripped) = value.strip_prefix("~/") {
        Ok(home_dir.join(stripped).display().to_string())
    } else {
        Ok(value.to_string())
    }
}
