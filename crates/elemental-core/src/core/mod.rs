//! # Core Module
//!
//! The fundamental building blocks of the element pipeline.
//!
//! - **Data Models** ([`models`]) - Canonical element records, categories, raw feed entries
//! - **Curated Tables** ([`rules`]) - Category map, covalent radii, alternative-name tables
//! - **Field Derivation** ([`derive`]) - Pure functions computing every derived field
//! - **Dataset I/O** ([`io`]) - Raw feed reading, literal rendering, dataset emitters
//! - **Structural Patching** ([`patch`]) - Depth-aware scanning and in-place record editing
//!
//! Nothing in this module holds state; everything it computes is a function of its
//! inputs and the immutable tables in [`rules`].

pub mod derive;
pub mod io;
pub mod models;
pub mod patch;
pub mod rules;
