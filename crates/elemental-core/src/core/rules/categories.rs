use crate::core::models::category::Category;
use phf::{Map, phf_map};
use std::ops::RangeInclusive;

/// Maps the feed's free-text family labels onto the closed category enum.
pub static SOURCE_CATEGORY_LABELS: Map<&'static str, Category> = phf_map! {
    "diatomic nonmetal" => Category::Nonmetal,
    "polyatomic nonmetal" => Category::Nonmetal,
    "noble gas" => Category::NobleGas,
    "alkali metal" => Category::AlkaliMetal,
    "alkaline earth metal" => Category::AlkalineEarth,
    "transition metal" => Category::TransitionMetal,
    "post-transition metal" => Category::PostTransition,
    "metalloid" => Category::Metalloid,
    "halogen" => Category::Halogen,
    "lanthanide" => Category::Lanthanide,
    "actinide" => Category::Actinide,
};

/// Category assigned to feed labels that have no entry in [`SOURCE_CATEGORY_LABELS`].
pub const UNMAPPED_LABEL_CATEGORY: Category = Category::Nonmetal;

/// The condition under which a [`CategoryRule`] fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryPredicate {
    AtomicNumberIn(RangeInclusive<u32>),
    GroupIs(u8),
}

impl CategoryPredicate {
    pub fn matches(&self, atomic_number: u32, group: Option<u8>) -> bool {
        match self {
            CategoryPredicate::AtomicNumberIn(range) => range.contains(&atomic_number),
            CategoryPredicate::GroupIs(g) => group == Some(*g),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub predicate: CategoryPredicate,
    pub result: Category,
}

/// Override rules evaluated top to bottom before the feed label is consulted.
///
/// The superheavy range outranks the group rules: element 117 is a group 17 member
/// but resolves to `unknown-properties`, not `halogen`.
pub static CATEGORY_OVERRIDES: [CategoryRule; 3] = [
    CategoryRule {
        predicate: CategoryPredicate::AtomicNumberIn(109..=118),
        result: Category::UnknownProperties,
    },
    CategoryRule {
        predicate: CategoryPredicate::GroupIs(17),
        result: Category::Halogen,
    },
    CategoryRule {
        predicate: CategoryPredicate::GroupIs(18),
        result: Category::NobleGas,
    },
];
