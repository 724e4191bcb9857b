use crate::error::{CliError, Result};
use elemental::core::io::DatasetFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileRulesConfig {
    pub path: Option<PathBuf>,
    pub apply_radius_corrections: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileOutputConfig {
    pub path: Option<PathBuf>,
    pub format: Option<DatasetFormat>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FilePatchConfig {
    pub anchor: Option<String>,
    pub strict: Option<bool>,
    pub dry_run: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileGenerateConfig {
    pub input: Option<PathBuf>,
    pub allow_partial: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub rules: Option<FileRulesConfig>,
    pub output: Option<FileOutputConfig>,
    pub patch: Option<FilePatchConfig>,
    pub generate: Option<FileGenerateConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
