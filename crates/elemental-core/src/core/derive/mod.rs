//! Pure derivation of every computed field of an element record.
//!
//! Each submodule exposes one deterministic function of the raw inputs (and, for the
//! table lookups, the immutable [`RuleSet`]). [`derive_fields`] bundles them in the
//! order the record assembler needs: the category is resolved first because valence
//! and oxidation-state rules depend on it.

pub mod category;
pub mod electron_config;
pub mod lookup;
pub mod oxidation;
pub mod valence;

use crate::core::models::category::Category;
use crate::core::models::element::AlternativeNames;
use crate::core::models::raw::RawElement;
use crate::engine::rules::RuleSet;

/// The derived portion of one element record.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedFields {
    pub category: Category,
    pub valence_electrons: u8,
    pub oxidation_states: Vec<i8>,
    pub atomic_radius: Option<f64>,
    pub electron_config: String,
    pub alternative_names: Option<AlternativeNames>,
}

/// Computes every derived field for a raw entry with a supported atomic number.
pub fn derive_fields(atomic_number: u32, raw: &RawElement, rules: &RuleSet) -> DerivedFields {
    let group = raw.group();
    let category = category::resolve_category(atomic_number, group, raw.category_label());

    DerivedFields {
        category,
        valence_electrons: valence::valence_electrons(atomic_number, group, category),
        oxidation_states: oxidation::oxidation_states(atomic_number, group, category),
        atomic_radius: lookup::atomic_radius(atomic_number, rules),
        electron_config: electron_config::format_electron_config(raw.electron_configuration()),
        alternative_names: lookup::alternative_names(atomic_number, rules),
    }
}
