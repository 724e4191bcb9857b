use serde::Deserialize;

/// One loosely-typed entry from the external element feed.
///
/// Every field may be missing; absent values degrade to safe defaults during
/// derivation instead of rejecting the whole feed. A missing `number` reads as 0,
/// which lies outside the supported range, so the entry is skipped.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawElement {
    #[serde(default)]
    pub number: i64,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub atomic_mass: Option<f64>,
    #[serde(default)]
    pub group: Option<i64>,
    #[serde(default)]
    pub period: Option<i64>,
    /// Free-text family label, e.g. "diatomic nonmetal".
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub electronegativity_pauling: Option<f64>,
    #[serde(default)]
    pub ionization_energies: Vec<f64>,
    #[serde(default)]
    pub electron_affinity: Option<f64>,
    /// Raw shell notation, e.g. "1s2 2s2 2p6".
    #[serde(default)]
    pub electron_configuration: Option<String>,
}

/// The top-level feed document: `{ "elements": [ ... ] }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFeed {
    #[serde(default)]
    pub elements: Vec<RawElement>,
}

/// Treats missing, non-finite, and zero values as "no data".
///
/// The feed uses zero as a placeholder for unmeasured quantities.
fn measured(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

impl RawElement {
    /// The IUPAC group, or `None` when absent or outside 1..=18.
    pub fn group(&self) -> Option<u8> {
        self.group
            .filter(|g| (1..=18).contains(g))
            .map(|g| g as u8)
    }

    pub fn period(&self) -> Option<u8> {
        self.period
            .filter(|p| (1..=7).contains(p))
            .map(|p| p as u8)
    }

    pub fn electronegativity(&self) -> Option<f64> {
        measured(self.electronegativity_pauling)
    }

    pub fn first_ionization_energy(&self) -> Option<f64> {
        measured(self.ionization_energies.first().copied())
    }

    pub fn electron_affinity(&self) -> Option<f64> {
        measured(self.electron_affinity)
    }

    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    pub fn electron_configuration(&self) -> &str {
        self.electron_configuration.as_deref().unwrap_or("")
    }
}
