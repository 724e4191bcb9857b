use crate::core::models::category::Category;

/// Oxidation states of a transition metal in a group without a dedicated entry.
pub const UNLISTED_TRANSITION_STATES: &[i8] = &[2, 3];

/// Returns the common oxidation states, most representative first.
///
/// The list is never empty; elements no rule covers get `[0]`.
pub fn oxidation_states(atomic_number: u32, group: Option<u8>, category: Category) -> Vec<i8> {
    let states: &[i8] = match (atomic_number, group) {
        (1, _) => &[1, -1],
        (2, _) => &[0],
        (_, Some(1)) => &[1],
        (_, Some(2)) => &[2],
        (_, Some(13)) => &[3],
        (_, Some(14)) => &[4, 2, -4],
        (_, Some(15)) => &[5, 3, -3],
        (_, Some(16)) => &[6, 4, -2],
        (_, Some(17)) => &[7, 5, 3, 1, -1],
        (_, Some(18)) => &[0],
        (_, group) if category == Category::TransitionMetal => transition_metal_states(group),
        _ if category.is_inner_transition() => &[3, 2],
        _ => &[0],
    };
    states.to_vec()
}

fn transition_metal_states(group: Option<u8>) -> &'static [i8] {
    match group {
        Some(3) => &[3],
        Some(4) => &[4, 3, 2],
        Some(5) => &[5, 4, 3, 2],
        Some(6) => &[6, 5, 4, 3, 2],
        Some(7) => &[7, 6, 5, 4, 3, 2],
        Some(8) | Some(9) => &[3, 2],
        Some(10) => &[2],
        Some(11) => &[2, 1],
        Some(12) => &[2],
        _ => UNLISTED_TRANSITION_STATES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hydrogen_and_helium_are_explicit() {
        assert_eq!(oxidation_states(1, Some(1), Category::Nonmetal), vec![1, -1]);
        assert_eq!(oxidation_states(2, Some(18), Category::NobleGas), vec![0]);
    }

    #[test]
    fn main_group_states_are_keyed_by_group() {
        assert_eq!(oxidation_states(3, Some(1), Category::AlkaliMetal), vec![1]);
        assert_eq!(oxidation_states(12, Some(2), Category::AlkalineEarth), vec![2]);
        assert_eq!(oxidation_states(6, Some(14), Category::Nonmetal), vec![4, 2, -4]);
        assert_eq!(oxidation_states(17, Some(17), Category::Halogen), vec![7, 5, 3, 1, -1]);
        assert_eq!(oxidation_states(36, Some(18), Category::NobleGas), vec![0]);
    }

    #[test]
    fn group_rules_apply_before_category_rules() {
        assert_eq!(
            oxidation_states(114, Some(14), Category::UnknownProperties),
            vec![4, 2, -4]
        );
    }

    #[test]
    fn transition_metal_states_by_group_preserve_order() {
        assert_eq!(oxidation_states(21, Some(3), Category::TransitionMetal), vec![3]);
        assert_eq!(
            oxidation_states(25, Some(7), Category::TransitionMetal),
            vec![7, 6, 5, 4, 3, 2]
        );
        assert_eq!(oxidation_states(26, Some(8), Category::TransitionMetal), vec![3, 2]);
        assert_eq!(oxidation_states(29, Some(11), Category::TransitionMetal), vec![2, 1]);
        assert_eq!(oxidation_states(104, None, Category::TransitionMetal), vec![2, 3]);
    }

    #[test]
    fn inner_transition_and_fallback() {
        assert_eq!(oxidation_states(63, None, Category::Lanthanide), vec![3, 2]);
        assert_eq!(oxidation_states(94, None, Category::Actinide), vec![3, 2]);
        assert_eq!(oxidation_states(110, Some(10), Category::UnknownProperties), vec![0]);
    }
}
