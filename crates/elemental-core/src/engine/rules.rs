use crate::core::models::element::{AltNameLocale, is_supported_atomic_number};
use crate::core::rules::{names, radii};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

/// Version of the derivation rule set implemented by this crate.
///
/// Overlays declaring a different version are rejected instead of being silently
/// merged into rules they were not written for.
pub const RULESET_VERSION: &str = "2";

/// The curated tables consulted during derivation.
///
/// A `RuleSet` is built once per pipeline run, either from the compiled-in tables
/// ([`RuleSet::builtin`]) or from those tables plus a TOML overlay
/// ([`RuleSet::load`]), and is only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    pub(crate) version: String,
    pub(crate) covalent_radii: BTreeMap<u32, f64>,
    pub(crate) radius_corrections: BTreeMap<u32, f64>,
    pub(crate) apply_radius_corrections: bool,
    pub(crate) alternative_names: BTreeMap<AltNameLocale, BTreeMap<u32, String>>,
}

#[derive(Debug, Error)]
pub enum RuleLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Rule set version '{found}' is not supported (expected '{expected}')")]
    VersionMismatch {
        found: String,
        expected: &'static str,
    },
    #[error("Invalid atomic number '{key}' in table '{table}'")]
    InvalidAtomicNumber { table: String, key: String },
    #[error("Invalid radius {value} for atomic number {atomic_number}")]
    InvalidRadius { atomic_number: u32, value: f64 },
    #[error("Unknown alternative-name locale '{0}' (expected 'af' or 'latin')")]
    UnknownLocale(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RuleOverlay {
    version: Option<String>,
    apply_radius_corrections: Option<bool>,
    #[serde(default)]
    radii: BTreeMap<String, f64>,
    #[serde(default)]
    radius_corrections: BTreeMap<String, f64>,
    #[serde(default)]
    alternative_names: BTreeMap<String, BTreeMap<String, String>>,
}

static BUILTIN: OnceLock<RuleSet> = OnceLock::new();

impl RuleSet {
    /// The process-wide rule set built from the compiled-in tables.
    ///
    /// Initialized on first access and immutable thereafter. The radius correction
    /// pass is off, so gaps in the covalent-radius table stay null until an overlay or
    /// caller opts in.
    pub fn builtin() -> &'static RuleSet {
        BUILTIN.get_or_init(Self::from_builtin_tables)
    }

    fn from_builtin_tables() -> Self {
        let covalent_radii = (1..=radii::COVALENT_RADII_PM.len() as u32)
            .filter_map(|z| radii::covalent_radius_pm(z).map(|pm| (z, f64::from(pm))))
            .collect();
        let radius_corrections = radii::RADIUS_CORRECTIONS_PM
            .iter()
            .map(|(z, pm)| (*z, f64::from(*pm)))
            .collect();

        let af = (1..=names::AFRIKAANS_NAMES.len() as u32)
            .filter_map(|z| names::afrikaans_name(z).map(|name| (z, name.to_string())))
            .collect();
        let latin = names::LATIN_NAMES
            .iter()
            .map(|(z, name)| (*z, name.to_string()))
            .collect();

        Self {
            version: RULESET_VERSION.to_string(),
            covalent_radii,
            radius_corrections,
            apply_radius_corrections: false,
            alternative_names: BTreeMap::from([
                (AltNameLocale::Af, af),
                (AltNameLocale::Latin, latin),
            ]),
        }
    }

    /// Loads a TOML overlay and applies it on top of the built-in tables.
    pub fn load(path: &Path) -> Result<Self, RuleLoadError> {
        let path_str = path.to_string_lossy().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| RuleLoadError::Io {
            path: path_str.clone(),
            source: e,
        })?;
        let rules = Self::from_overlay_str(&content, &path_str)?;
        debug!(
            "Loaded rule overlay from {} ({} radii, {} corrections).",
            path_str,
            rules.covalent_radii.len(),
            rules.radius_corrections.len()
        );
        Ok(rules)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, RuleLoadError> {
        Self::from_overlay_str(content, "<inline>")
    }

    fn from_overlay_str(content: &str, origin: &str) -> Result<Self, RuleLoadError> {
        let overlay: RuleOverlay = toml::from_str(content).map_err(|e| RuleLoadError::Toml {
            path: origin.to_string(),
            source: e,
        })?;
        let mut rules = Self::builtin().clone();
        rules.apply_overlay(overlay)?;
        Ok(rules)
    }

    fn apply_overlay(&mut self, overlay: RuleOverlay) -> Result<(), RuleLoadError> {
        if let Some(version) = overlay.version {
            if version != RULESET_VERSION {
                return Err(RuleLoadError::VersionMismatch {
                    found: version,
                    expected: RULESET_VERSION,
                });
            }
        }
        if let Some(apply) = overlay.apply_radius_corrections {
            self.apply_radius_corrections = apply;
        }

        for (key, value) in overlay.radii {
            let z = parse_atomic_number("radii", &key)?;
            self.covalent_radii.insert(z, checked_radius(z, value)?);
        }
        for (key, value) in overlay.radius_corrections {
            let z = parse_atomic_number("radius-corrections", &key)?;
            self.radius_corrections.insert(z, checked_radius(z, value)?);
        }

        for (locale_key, entries) in overlay.alternative_names {
            let locale = match locale_key.as_str() {
                "af" => AltNameLocale::Af,
                "latin" => AltNameLocale::Latin,
                _ => return Err(RuleLoadError::UnknownLocale(locale_key)),
            };
            let table = self.alternative_names.entry(locale).or_default();
            for (key, name) in entries {
                let z = parse_atomic_number(&format!("alternative-names.{}", locale_key), &key)?;
                table.insert(z, name);
            }
        }
        Ok(())
    }

    pub fn with_radius_corrections(mut self, enabled: bool) -> Self {
        self.apply_radius_corrections = enabled;
        self
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn apply_radius_corrections(&self) -> bool {
        self.apply_radius_corrections
    }

    pub fn covalent_radius(&self, atomic_number: u32) -> Option<f64> {
        self.covalent_radii.get(&atomic_number).copied()
    }

    pub fn radius_correction(&self, atomic_number: u32) -> Option<f64> {
        self.radius_corrections.get(&atomic_number).copied()
    }

    /// All correction-pass targets in ascending atomic-number order.
    pub fn radius_corrections(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.radius_corrections.iter().map(|(z, r)| (*z, *r))
    }

    pub fn alternative_name(&self, locale: AltNameLocale, atomic_number: u32) -> Option<&str> {
        self.alternative_names
            .get(&locale)?
            .get(&atomic_number)
            .map(String::as_str)
    }
}

fn parse_atomic_number(table: &str, key: &str) -> Result<u32, RuleLoadError> {
    key.trim()
        .parse::<u32>()
        .ok()
        .filter(|z| is_supported_atomic_number(i64::from(*z)))
        .ok_or_else(|| RuleLoadError::InvalidAtomicNumber {
            table: table.to_string(),
            key: key.to_string(),
        })
}

fn checked_radius(atomic_number: u32, value: f64) -> Result<f64, RuleLoadError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(RuleLoadError::InvalidRadius {
            atomic_number,
            value,
        })
    }
}
