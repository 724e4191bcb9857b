use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed chemical-family classification of an element.
///
/// Every emitted record carries exactly one of these values; unrecognized source
/// labels resolve to [`Category::Nonmetal`] during derivation, so no other value can
/// ever reach an output artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Nonmetal,
    NobleGas,
    AlkaliMetal,
    AlkalineEarth,
    TransitionMetal,
    PostTransition,
    Metalloid,
    Halogen,
    Lanthanide,
    Actinide,
    UnknownProperties,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Nonmetal,
        Category::NobleGas,
        Category::AlkaliMetal,
        Category::AlkalineEarth,
        Category::TransitionMetal,
        Category::PostTransition,
        Category::Metalloid,
        Category::Halogen,
        Category::Lanthanide,
        Category::Actinide,
        Category::UnknownProperties,
    ];

    /// The kebab-case name used in emitted datasets (e.g. `"noble-gas"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Nonmetal => "nonmetal",
            Category::NobleGas => "noble-gas",
            Category::AlkaliMetal => "alkali-metal",
            Category::AlkalineEarth => "alkaline-earth",
            Category::TransitionMetal => "transition-metal",
            Category::PostTransition => "post-transition",
            Category::Metalloid => "metalloid",
            Category::Halogen => "halogen",
            Category::Lanthanide => "lanthanide",
            Category::Actinide => "actinide",
            Category::UnknownProperties => "unknown-properties",
        }
    }

    pub fn is_inner_transition(self) -> bool {
        matches!(self, Category::Lanthanide | Category::Actinide)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    /// Parses the emitted kebab-case name of a category.
    ///
    /// This is the inverse of [`Category::as_str`]; it does not interpret raw feed
    /// labels such as `"alkali metal"` (see [`crate::core::rules::categories`]).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_from_str_agree_for_every_category() {
        for category in Category::ALL {
            let rendered = category.to_string();
            assert_eq!(Category::from_str(&rendered), Ok(category));
        }
    }

    #[test]
    fn from_str_rejects_raw_feed_labels() {
        assert_eq!(Category::from_str("alkali metal"), Err(()));
        assert_eq!(Category::from_str("Halogen"), Err(()));
        assert_eq!(Category::from_str(""), Err(()));
    }

    #[test]
    fn serde_uses_kebab_case_names() {
        let json = serde_json::to_string(&Category::UnknownProperties).unwrap();
        assert_eq!(json, "\"unknown-properties\"");
        let parsed: Category = serde_json::from_str("\"post-transition\"").unwrap();
        assert_eq!(parsed, Category::PostTransition);
    }

    #[test]
    fn only_lanthanides_and_actinides_are_inner_transition() {
        let inner: Vec<_> = Category::ALL
            .into_iter()
            .filter(|c| c.is_inner_transition())
            .collect();
        assert_eq!(inner, vec![Category::Lanthanide, Category::Actinide]);
    }
}
