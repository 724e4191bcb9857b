use crate::core::models::category::Category;

/// Transition metals are assigned two valence electrons (the outer s pair). This is
/// an approximation; the real count depends on the d occupancy, which is not parsed.
pub const TRANSITION_METAL_VALENCE: u8 = 2;

pub const INNER_TRANSITION_VALENCE: u8 = 3;

/// Approximates the number of valence electrons from group and category.
///
/// Rules, first match wins:
/// hydrogen 1, helium 2, groups 1-2 the group number, groups 13-18 the group minus
/// ten, transition metals [`TRANSITION_METAL_VALENCE`], lanthanides and actinides
/// [`INNER_TRANSITION_VALENCE`], everything else 0.
pub fn valence_electrons(atomic_number: u32, group: Option<u8>, category: Category) -> u8 {
    match (atomic_number, group) {
        (1, _) => 1,
        (2, _) => 2,
        (_, Some(g @ 1..=2)) => g,
        (_, Some(g @ 13..=18)) => g - 10,
        _ if category == Category::TransitionMetal => TRANSITION_METAL_VALENCE,
        _ if category.is_inner_transition() => INNER_TRANSITION_VALENCE,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hydrogen_and_helium_are_explicit() {
        assert_eq!(valence_electrons(1, Some(1), Category::Nonmetal), 1);
        assert_eq!(valence_electrons(2, Some(18), Category::NobleGas), 2);
        assert_eq!(valence_electrons(2, None, Category::NobleGas), 2);
    }

    #[test]
    fn main_groups_follow_the_group_number() {
        assert_eq!(valence_electrons(4, Some(2), Category::AlkalineEarth), 2);
        assert_eq!(valence_electrons(11, Some(1), Category::AlkaliMetal), 1);
        assert_eq!(valence_electrons(8, Some(16), Category::Nonmetal), 6);
        assert_eq!(valence_electrons(10, Some(18), Category::NobleGas), 8);
        assert_eq!(valence_electrons(13, Some(13), Category::PostTransition), 3);
    }

    #[test]
    fn transition_metals_are_two_regardless_of_group() {
        for (z, g) in [(21, 3), (26, 8), (29, 11), (30, 12), (74, 6)] {
            assert_eq!(valence_electrons(z, Some(g), Category::TransitionMetal), 2);
        }
        assert_eq!(valence_electrons(104, None, Category::TransitionMetal), 2);
    }

    #[test]
    fn inner_transition_and_unclassified_elements() {
        assert_eq!(valence_electrons(58, None, Category::Lanthanide), 3);
        assert_eq!(valence_electrons(92, None, Category::Actinide), 3);
        assert_eq!(valence_electrons(110, Some(10), Category::UnknownProperties), 0);
    }
}
