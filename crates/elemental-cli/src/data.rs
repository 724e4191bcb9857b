use crate::error::{CliError, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_FILE_NAME: &str = "config.toml";
const RULES_FILE_NAME: &str = "rules.toml";

/// Locations of the per-user configuration and rule overlay files.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    config_dir: PathBuf,
}

impl ProjectPaths {
    pub fn new() -> Result<Self> {
        let config_dir = ProjectDirs::from("org", "elemental", "elemental")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| {
                CliError::Config("Could not determine the configuration directory.".to_string())
            })?;
        debug!("Project configuration directory: {:?}", &config_dir);
        Ok(Self { config_dir })
    }

    pub fn with_custom_path(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// The configuration file read when `--config` is not given.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    /// The rule overlay applied when neither the command line nor the config file names one.
    pub fn rules_file(&self) -> PathBuf {
        self.config_dir.join(RULES_FILE_NAME)
    }

    pub fn existing_config_file(&self) -> Option<PathBuf> {
        Some(self.config_file()).filter(|path| path.is_file())
    }

    pub fn existing_rules_file(&self) -> Option<PathBuf> {
        Some(self.rules_file()).filter(|path| path.is_file())
    }
}
