//! Reading the raw element feed and writing dataset artifacts.
//!
//! Feeds are read through the [`traits::RawDataSource`] trait and datasets are written
//! through [`traits::DatasetEmitter`]. Both artifact formats render values with the
//! shared [`literal::Literal`] type, which the patch workflows use as well so that
//! patched values look exactly like freshly emitted ones.

pub mod feed;
pub mod json;
pub mod literal;
pub mod traits;
pub mod typescript;

use literal::LiteralStyle;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// The on-disk format of an emitted dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    #[default]
    TypeScript,
    Json,
}

impl DatasetFormat {
    /// Picks the format from a file extension, defaulting to TypeScript.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DatasetFormat::Json,
            _ => DatasetFormat::TypeScript,
        }
    }

    pub fn literal_style(self) -> LiteralStyle {
        match self {
            DatasetFormat::TypeScript => LiteralStyle::TypeScript,
            DatasetFormat::Json => LiteralStyle::Json,
        }
    }
}

impl fmt::Display for DatasetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetFormat::TypeScript => f.write_str("typescript"),
            DatasetFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown dataset format '{0}' (expected 'typescript' or 'json')")]
pub struct UnknownFormat(pub String);

impl FromStr for DatasetFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(DatasetFormat::TypeScript),
            "json" => Ok(DatasetFormat::Json),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}
