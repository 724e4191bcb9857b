use crate::core::models::category::Category;
use crate::core::rules::categories::{
    CATEGORY_OVERRIDES, SOURCE_CATEGORY_LABELS, UNMAPPED_LABEL_CATEGORY,
};

/// Resolves the category of an element.
///
/// The override rules in [`CATEGORY_OVERRIDES`] are evaluated top to bottom and the
/// first match wins; only when none fires is the feed label mapped through
/// [`SOURCE_CATEGORY_LABELS`]. Unmapped labels fall back to `nonmetal`.
pub fn resolve_category(atomic_number: u32, group: Option<u8>, source_label: &str) -> Category {
    CATEGORY_OVERRIDES
        .iter()
        .find(|rule| rule.predicate.matches(atomic_number, group))
        .map(|rule| rule.result)
        .unwrap_or_else(|| map_source_label(source_label))
}

fn map_source_label(label: &str) -> Category {
    SOURCE_CATEGORY_LABELS
        .get(label.trim())
        .copied()
        .unwrap_or(UNMAPPED_LABEL_CATEGORY)
}
