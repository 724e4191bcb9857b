use super::progress::{Progress, ProgressReporter};
use super::rules::RuleSet;
use crate::core::derive::derive_fields;
use crate::core::models::element::{Element, ElementTable, is_supported_atomic_number};
use crate::core::models::raw::RawElement;
use std::fmt;
use tracing::{debug, warn};

/// Why a raw feed entry did not produce a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    OutOfRange,
    MissingSymbol,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::OutOfRange => "atomic number outside 1..=118",
            SkipReason::MissingSymbol => "missing symbol",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    pub number: i64,
    pub symbol: String,
    pub reason: SkipReason,
}

/// A record that was kept with a placeholder for a missing or unusable feed value.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultedField {
    pub atomic_number: u32,
    pub field: &'static str,
}

/// Written when the feed has no usable atomic mass.
pub const DEFAULT_ATOMIC_MASS: f64 = 0.0;
/// Written when the feed has no period in 1..=7.
pub const DEFAULT_PERIOD: u8 = 0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssemblyReport {
    pub assembled: usize,
    pub skipped: Vec<SkippedEntry>,
    pub defaulted: Vec<DefaultedField>,
}

impl AssemblyReport {
    /// Entries rejected for a missing symbol, excluding out-of-range numbers.
    pub fn rejected(&self) -> impl Iterator<Item = &SkippedEntry> {
        self.skipped
            .iter()
            .filter(|entry| entry.reason != SkipReason::OutOfRange)
    }
}

fn usable_atomic_mass(raw: &RawElement) -> Option<f64> {
    raw.atomic_mass.filter(|m| m.is_finite() && *m > 0.0)
}

/// Fields of `raw` that [`assemble_record`] fills with a placeholder.
pub fn defaulted_fields(raw: &RawElement) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if usable_atomic_mass(raw).is_none() {
        fields.push("atomicMass");
    }
    if raw.period().is_none() {
        fields.push("period");
    }
    fields
}

/// Builds one canonical record from a raw entry whose atomic number is supported.
///
/// Only a blank symbol rejects the entry. A missing atomic mass becomes
/// [`DEFAULT_ATOMIC_MASS`] and a missing period becomes [`DEFAULT_PERIOD`].
pub fn assemble_record(
    atomic_number: u32,
    raw: &RawElement,
    rules: &RuleSet,
) -> Result<Element, SkipReason> {
    let symbol = raw.symbol.trim();
    if symbol.is_empty() {
        return Err(SkipReason::MissingSymbol);
    }

    let derived = derive_fields(atomic_number, raw, rules);

    Ok(Element {
        symbol: symbol.to_string(),
        name: raw.name.trim().to_string(),
        atomic_number,
        atomic_mass: usable_atomic_mass(raw).unwrap_or(DEFAULT_ATOMIC_MASS),
        electron_config: derived.electron_config,
        group: raw.group(),
        period: raw.period().unwrap_or(DEFAULT_PERIOD),
        category: derived.category,
        electronegativity: raw.electronegativity(),
        ionization_energy: raw.first_ionization_energy(),
        electron_affinity: raw.electron_affinity(),
        atomic_radius: derived.atomic_radius,
        oxidation_states: derived.oxidation_states,
        valence_electrons: derived.valence_electrons,
        uses: Vec::new(),
        alternative_names: derived.alternative_names,
    })
}

/// Maps the raw feed onto an ordered element table.
///
/// Entries are processed in ascending atomic-number order. Numbers outside 1..=118 are
/// dropped without a warning; entries without a symbol are dropped with one. Both kinds
/// are listed in the returned report, along with every placeholder that was written.
pub fn assemble(
    raw_elements: &[RawElement],
    rules: &RuleSet,
    reporter: &ProgressReporter,
) -> (ElementTable, AssemblyReport) {
    let mut ordered: Vec<&RawElement> = raw_elements.iter().collect();
    ordered.sort_by_key(|raw| raw.number);

    let mut report = AssemblyReport::default();
    let mut elements = Vec::with_capacity(ordered.len());

    reporter.report(Progress::TaskStart {
        total_steps: ordered.len() as u64,
    });
    for raw in ordered {
        reporter.report(Progress::TaskIncrement);

        if !is_supported_atomic_number(raw.number) {
            debug!("Skipping feed entry with atomic number {}.", raw.number);
            report.skipped.push(SkippedEntry {
                number: raw.number,
                symbol: raw.symbol.clone(),
                reason: SkipReason::OutOfRange,
            });
            continue;
        }

        let atomic_number = raw.number as u32;
        match assemble_record(atomic_number, raw, rules) {
            Ok(element) => {
                for field in defaulted_fields(raw) {
                    warn!(
                        "Feed entry {} ('{}') has no usable {}; writing a placeholder.",
                        atomic_number, element.symbol, field
                    );
                    report.defaulted.push(DefaultedField {
                        atomic_number,
                        field,
                    });
                }
                debug!(
                    "Assembled {} ({}): category={}, valence={}.",
                    element.symbol, element.atomic_number, element.category, element.valence_electrons
                );
                elements.push(element);
            }
            Err(reason) => {
                warn!(
                    "Skipping feed entry {} ('{}'): {}.",
                    atomic_number, raw.symbol, reason
                );
                report.skipped.push(SkippedEntry {
                    number: raw.number,
                    symbol: raw.symbol.clone(),
                    reason,
                });
            }
        }
    }
    reporter.report(Progress::TaskFinish);

    report.assembled = elements.len();
    (ElementTable::new(elements), report)
}
