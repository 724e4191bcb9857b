use crate::core::models::element::{AltNameLocale, AlternativeNames};
use crate::engine::rules::RuleSet;

/// Resolves the atomic radius from the curated tables.
///
/// The covalent-radius table is consulted first. When the rule set enables the
/// correction pass, a correction entry for this atomic number replaces the table
/// value; atomic numbers without one keep the table value, including `None`.
pub fn atomic_radius(atomic_number: u32, rules: &RuleSet) -> Option<f64> {
    let corrected = rules
        .apply_radius_corrections()
        .then(|| rules.radius_correction(atomic_number))
        .flatten();
    corrected.or_else(|| rules.covalent_radius(atomic_number))
}

/// Merges the alternative-name tables for one element.
///
/// Only locales with an entry appear in the result; `None` means the record carries
/// no `alternativeNames` field at all.
pub fn alternative_names(atomic_number: u32, rules: &RuleSet) -> Option<AlternativeNames> {
    AlternativeNames::from_entries(
        [AltNameLocale::Af, AltNameLocale::Latin]
            .into_iter()
            .filter_map(|locale| {
                rules
                    .alternative_name(locale, atomic_number)
                    .map(|name| (locale, name.to_string()))
            }),
    )
}
