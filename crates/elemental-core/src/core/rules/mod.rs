//! Curated, read-only reference tables.
//!
//! These are the built-in defaults from which [`crate::engine::rules::RuleSet`] is
//! assembled. They are compiled into the binary and never mutated; a versioned TOML
//! overlay can replace individual entries at load time.

pub mod categories;
pub mod names;
pub mod radii;
