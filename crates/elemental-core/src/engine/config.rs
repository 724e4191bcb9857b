use crate::core::io::DatasetFormat;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Field a newly inserted entry is placed after when the record lacks the target field.
pub const DEFAULT_ANCHOR_FIELD: &str = "uses";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Unknown derived field '{0}'")]
    UnknownDerivedField(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub format: DatasetFormat,
    pub rules_path: Option<PathBuf>,
    /// Overrides the rule set's own `apply-radius-corrections` switch when set.
    pub radius_corrections: Option<bool>,
    pub allow_partial: bool,
}

#[derive(Default)]
pub struct GenerateConfigBuilder {
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    format: Option<DatasetFormat>,
    rules_path: Option<PathBuf>,
    radius_corrections: Option<bool>,
    allow_partial: bool,
}

impl GenerateConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_path(mut self, path: PathBuf) -> Self {
        self.input_path = Some(path);
        self
    }
    pub fn output_path(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }
    pub fn format(mut self, format: DatasetFormat) -> Self {
        self.format = Some(format);
        self
    }
    pub fn rules_path(mut self, path: Option<PathBuf>) -> Self {
        self.rules_path = path;
        self
    }
    pub fn radius_corrections(mut self, enabled: Option<bool>) -> Self {
        self.radius_corrections = enabled;
        self
    }
    pub fn allow_partial(mut self, allow: bool) -> Self {
        self.allow_partial = allow;
        self
    }

    pub fn build(self) -> Result<GenerateConfig, ConfigError> {
        let output_path = self
            .output_path
            .ok_or(ConfigError::MissingParameter("output_path"))?;
        let format = self
            .format
            .unwrap_or_else(|| DatasetFormat::from_path(&output_path));
        Ok(GenerateConfig {
            input_path: self
                .input_path
                .ok_or(ConfigError::MissingParameter("input_path"))?,
            output_path,
            format,
            rules_path: self.rules_path,
            radius_corrections: self.radius_corrections,
            allow_partial: self.allow_partial,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatchConfig {
    pub artifact_path: PathBuf,
    pub request_path: PathBuf,
    pub anchor: String,
    pub strict: bool,
    pub dry_run: bool,
}

#[derive(Default)]
pub struct PatchConfigBuilder {
    artifact_path: Option<PathBuf>,
    request_path: Option<PathBuf>,
    anchor: Option<String>,
    strict: bool,
    dry_run: bool,
}

impl PatchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn artifact_path(mut self, path: PathBuf) -> Self {
        self.artifact_path = Some(path);
        self
    }
    pub fn request_path(mut self, path: PathBuf) -> Self {
        self.request_path = Some(path);
        self
    }
    pub fn anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn build(self) -> Result<PatchConfig, ConfigError> {
        Ok(PatchConfig {
            artifact_path: self
                .artifact_path
                .ok_or(ConfigError::MissingParameter("artifact_path"))?,
            request_path: self
                .request_path
                .ok_or(ConfigError::MissingParameter("request_path"))?,
            anchor: self
                .anchor
                .unwrap_or_else(|| DEFAULT_ANCHOR_FIELD.to_string()),
            strict: self.strict,
            dry_run: self.dry_run,
        })
    }
}

/// A record field that the `fix derived` workflow can recompute from the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DerivedField {
    Category,
    ElectronConfig,
    AtomicRadius,
    OxidationStates,
    ValenceElectrons,
    AlternativeNames,
}

impl DerivedField {
    pub const ALL: [DerivedField; 6] = [
        DerivedField::Category,
        DerivedField::ElectronConfig,
        DerivedField::AtomicRadius,
        DerivedField::OxidationStates,
        DerivedField::ValenceElectrons,
        DerivedField::AlternativeNames,
    ];

    /// Fields re-derived when none are selected explicitly.
    pub const DEFAULT: [DerivedField; 3] = [
        DerivedField::ValenceElectrons,
        DerivedField::OxidationStates,
        DerivedField::AtomicRadius,
    ];

    /// The record key of this field in emitted artifacts.
    pub fn key(self) -> &'static str {
        match self {
            DerivedField::Category => "category",
            DerivedField::ElectronConfig => "electronConfig",
            DerivedField::AtomicRadius => "atomicRadius",
            DerivedField::OxidationStates => "oxidationStates",
            DerivedField::ValenceElectrons => "valenceElectrons",
            DerivedField::AlternativeNames => "alternativeNames",
        }
    }
}

impl fmt::Display for DerivedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DerivedField {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        DerivedField::ALL
            .into_iter()
            .find(|field| field.key() == trimmed)
            .ok_or_else(|| ConfigError::UnknownDerivedField(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FixTask {
    /// Apply the radius correction table to `atomicRadius`.
    Radii,
    /// Add or refresh `alternativeNames` from the curated name tables.
    Names,
    /// Recompute the selected fields from a raw feed.
    Derived {
        input_path: PathBuf,
        fields: Vec<DerivedField>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FixConfig {
    pub artifact_path: PathBuf,
    pub task: FixTask,
    pub rules_path: Option<PathBuf>,
    pub anchor: String,
    pub strict: bool,
    pub dry_run: bool,
}

#[derive(Default)]
pub struct FixConfigBuilder {
    artifact_path: Option<PathBuf>,
    task: Option<FixTask>,
    rules_path: Option<PathBuf>,
    anchor: Option<String>,
    strict: bool,
    dry_run: bool,
}

impl FixConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn artifact_path(mut self, path: PathBuf) -> Self {
        self.artifact_path = Some(path);
        self
    }
    pub fn task(mut self, task: FixTask) -> Self {
        self.task = Some(task);
        self
    }
    pub fn rules_path(mut self, path: Option<PathBuf>) -> Self {
        self.rules_path = path;
        self
    }
    pub fn anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn build(self) -> Result<FixConfig, ConfigError> {
        Ok(FixConfig {
            artifact_path: self
                .artifact_path
                .ok_or(ConfigError::MissingParameter("artifact_path"))?,
            task: self.task.ok_or(ConfigError::MissingParameter("task"))?,
            rules_path: self.rules_path,
            anchor: self
                .anchor
                .unwrap_or_else(|| DEFAULT_ANCHOR_FIELD.to_string()),
            strict: self.strict,
            dry_run: self.dry_run,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_builder_requires_paths_and_infers_format() {
        let err = GenerateConfigBuilder::new().build().unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("output_path"));

        let config = GenerateConfigBuilder::new()
            .input_path("feed.json".into())
            .output_path("elements.json".into())
            .build()
            .unwrap();
        assert_eq!(config.format, DatasetFormat::Json);
        assert!(!config.allow_partial);

        let config = GenerateConfigBuilder::new()
            .input_path("feed.json".into())
            .output_path("elements.ts".into())
            .build()
            .unwrap();
        assert_eq!(config.format, DatasetFormat::TypeScript);
    }

    #[test]
    fn patch_builder_defaults_the_anchor() {
        let config = PatchConfigBuilder::new()
            .artifact_path("elements.ts".into())
            .request_path("patch.csv".into())
            .build()
            .unwrap();
        assert_eq!(config.anchor, DEFAULT_ANCHOR_FIELD);
    }

    #[test]
    fn fix_builder_requires_a_task() {
        let err = FixConfigBuilder::new()
            .artifact_path("elements.ts".into())
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("task"));
    }

    #[test]
    fn derived_fields_parse_from_record_keys() {
        assert_eq!(
            "valenceElectrons".parse::<DerivedField>(),
            Ok(DerivedField::ValenceElectrons)
        );
        assert_eq!(
            " atomicRadius ".parse::<DerivedField>(),
            Ok(DerivedField::AtomicRadius)
        );
        assert_eq!(
            "symbol".parse::<DerivedField>(),
            Err(ConfigError::UnknownDerivedField("symbol".into()))
        );
    }
}
