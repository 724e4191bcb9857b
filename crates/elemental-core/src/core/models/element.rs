use super::category::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

pub const MIN_ATOMIC_NUMBER: u32 = 1;
pub const MAX_ATOMIC_NUMBER: u32 = 118;

/// Returns `true` if `atomic_number` lies in the supported range 1..=118.
pub fn is_supported_atomic_number(atomic_number: i64) -> bool {
    (MIN_ATOMIC_NUMBER as i64..=MAX_ATOMIC_NUMBER as i64).contains(&atomic_number)
}

/// Locale or origin key of an alternative element name.
///
/// The declaration order is the emission order: `af` entries precede `latin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AltNameLocale {
    /// Afrikaans.
    Af,
    /// Historical Latin name from which the conventional symbol derives.
    Latin,
}

impl AltNameLocale {
    pub fn as_str(self) -> &'static str {
        match self {
            AltNameLocale::Af => "af",
            AltNameLocale::Latin => "latin",
        }
    }
}

/// A non-empty mapping from locale key to alternative name.
///
/// Records without any alternative name carry `None` instead of an empty mapping,
/// which is why this type can only be built through [`AlternativeNames::from_entries`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlternativeNames(BTreeMap<AltNameLocale, String>);

impl AlternativeNames {
    /// Collects the given entries, returning `None` when there are none.
    pub fn from_entries<I, S>(entries: I) -> Option<Self>
    where
        I: IntoIterator<Item = (AltNameLocale, S)>,
        S: Into<String>,
    {
        let map: BTreeMap<_, _> = entries
            .into_iter()
            .map(|(locale, name)| (locale, name.into()))
            .collect();
        (!map.is_empty()).then_some(Self(map))
    }

    pub fn get(&self, locale: AltNameLocale) -> Option<&str> {
        self.0.get(&locale).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AltNameLocale, &str)> {
        self.0.iter().map(|(locale, name)| (*locale, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The canonical record for one chemical element.
///
/// Records are assembled once from a raw feed entry plus the curated rule tables and
/// are never mutated afterwards. Field names serialize in camelCase, matching the
/// emitted dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Element symbol (e.g. "Fe").
    pub symbol: String,
    /// Canonical English name.
    pub name: String,
    /// Atomic number, the record key (1..=118).
    pub atomic_number: u32,
    /// Standard atomic mass in daltons, or 0 when the feed has none.
    pub atomic_mass: f64,
    /// Electron configuration with superscripted electron counts (e.g. "1s²2s²2p⁶").
    pub electron_config: String,
    /// IUPAC group (1..=18), absent for most inner-transition elements.
    pub group: Option<u8>,
    /// Period (1..=7), or 0 when the feed has none.
    pub period: u8,
    pub category: Category,
    /// Pauling electronegativity.
    pub electronegativity: Option<f64>,
    /// First ionization energy in kJ/mol.
    pub ionization_energy: Option<f64>,
    /// Electron affinity in kJ/mol.
    pub electron_affinity: Option<f64>,
    /// Covalent radius in picometres. Always emitted, as a number or explicit null.
    pub atomic_radius: Option<f64>,
    /// Common oxidation states, most representative first. Never empty.
    pub oxidation_states: Vec<i8>,
    pub valence_electrons: u8,
    pub uses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_names: Option<AlternativeNames>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatasetError {
    #[error("Atomic number {0} is outside the supported range 1..=118")]
    OutOfRange(u32),
    #[error("Records out of order: {next} follows {previous}")]
    OutOfOrder { previous: u32, next: u32 },
    #[error("Duplicate record for atomic number {0}")]
    Duplicate(u32),
    #[error("Missing records for atomic numbers {0:?}")]
    Missing(Vec<u32>),
    #[error("Record {0} has no oxidation states")]
    EmptyOxidationStates(u32),
}

/// The ordered, immutable collection of element records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementTable {
    elements: Vec<Element>,
}

impl ElementTable {
    /// Builds a table, ordering the records ascending by atomic number.
    pub fn new(mut elements: Vec<Element>) -> Self {
        elements.sort_by_key(|e| e.atomic_number);
        Self { elements }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Finds the element whose symbol matches `symbol` exactly.
    pub fn by_symbol(&self, symbol: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.symbol == symbol)
    }

    pub fn by_atomic_number(&self, atomic_number: u32) -> Option<&Element> {
        self.elements
            .iter()
            .find(|e| e.atomic_number == atomic_number)
    }

    /// Returns every element in `category`, in table order.
    pub fn by_category(&self, category: Category) -> Vec<&Element> {
        self.elements
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    /// Verifies the dataset invariants: one record per atomic number 1..=118, strictly
    /// ascending, and a non-empty oxidation-state list on every record.
    pub fn check_invariants(&self) -> Result<(), DatasetError> {
        for element in &self.elements {
            if !is_supported_atomic_number(element.atomic_number as i64) {
                return Err(DatasetError::OutOfRange(element.atomic_number));
            }
            if element.oxidation_states.is_empty() {
                return Err(DatasetError::EmptyOxidationStates(element.atomic_number));
            }
        }

        for pair in self.elements.windows(2) {
            let (previous, next) = (pair[0].atomic_number, pair[1].atomic_number);
            if previous == next {
                return Err(DatasetError::Duplicate(next));
            }
            if previous > next {
                return Err(DatasetError::OutOfOrder { previous, next });
            }
        }

        let missing: Vec<u32> = (MIN_ATOMIC_NUMBER..=MAX_ATOMIC_NUMBER)
            .filter(|n| self.by_atomic_number(*n).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(DatasetError::Missing(missing));
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a ElementTable {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_element;

    #[test]
    fn alternative_names_from_no_entries_is_none() {
        let names = AlternativeNames::from_entries(Vec::<(AltNameLocale, &str)>::new());
        assert!(names.is_none());
    }

    #[test]
    fn alternative_names_iterate_af_before_latin() {
        let names = AlternativeNames::from_entries([
            (AltNameLocale::Latin, "Stannum"),
            (AltNameLocale::Af, "Tin"),
        ])
        .unwrap();
        let keys: Vec<_> = names.iter().map(|(locale, _)| locale.as_str()).collect();
        assert_eq!(keys, vec!["af", "latin"]);
        assert_eq!(names.get(AltNameLocale::Latin), Some("Stannum"));
    }

    #[test]
    fn table_new_sorts_by_atomic_number() {
        let table = ElementTable::new(vec![
            sample_element(3, "Li"),
            sample_element(1, "H"),
            sample_element(2, "He"),
        ]);
        let numbers: Vec<_> = table.iter().map(|e| e.atomic_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn lookups_use_exact_matches() {
        let table = ElementTable::new(vec![sample_element(1, "H"), sample_element(2, "He")]);
        assert_eq!(table.by_symbol("He").map(|e| e.atomic_number), Some(2));
        assert!(table.by_symbol("he").is_none());
        assert_eq!(table.by_atomic_number(1).map(|e| e.symbol.as_str()), Some("H"));
        assert!(table.by_atomic_number(3).is_none());
    }

    #[test]
    fn by_category_preserves_table_order() {
        let mut a = sample_element(26, "Fe");
        a.category = Category::TransitionMetal;
        let mut b = sample_element(29, "Cu");
        b.category = Category::TransitionMetal;
        let c = sample_element(8, "O");
        let table = ElementTable::new(vec![b, c, a]);

        let found: Vec<_> = table
            .by_category(Category::TransitionMetal)
            .into_iter()
            .map(|e| e.atomic_number)
            .collect();
        assert_eq!(found, vec![26, 29]);
    }

    #[test]
    fn check_invariants_reports_duplicates_and_gaps() {
        let table = ElementTable::new(vec![sample_element(1, "H"), sample_element(1, "H")]);
        assert_eq!(table.check_invariants(), Err(DatasetError::Duplicate(1)));

        let table = ElementTable::new(vec![sample_element(1, "H"), sample_element(3, "Li")]);
        match table.check_invariants() {
            Err(DatasetError::Missing(missing)) => {
                assert_eq!(missing.first(), Some(&2));
                assert_eq!(missing.len(), 116);
            }
            other => panic!("expected missing records, got {:?}", other),
        }
    }

    #[test]
    fn check_invariants_rejects_empty_oxidation_states_and_out_of_range() {
        let mut element = sample_element(1, "H");
        element.oxidation_states.clear();
        let table = ElementTable::new(vec![element]);
        assert_eq!(
            table.check_invariants(),
            Err(DatasetError::EmptyOxidationStates(1))
        );

        let table = ElementTable::new(vec![sample_element(119, "Uue")]);
        assert_eq!(table.check_invariants(), Err(DatasetError::OutOfRange(119)));
    }

    #[test]
    fn serialization_omits_absent_alternative_names_but_keeps_null_radius() {
        let element = sample_element(1, "H");
        let json = serde_json::to_value(&element).unwrap();
        assert!(json.get("alternativeNames").is_none());
        assert!(json.get("atomicRadius").unwrap().is_null());
        assert_eq!(json["atomicNumber"], 1);
    }
}
