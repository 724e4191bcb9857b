//! # Elemental Core Library
//!
//! Derives a canonical, closed-form record for every chemical element (atomic numbers
//! 1 through 118) from a raw external element feed, and incrementally patches previously
//! emitted datasets without regenerating them.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Element`, `Category`), the
//!   curated rule tables, pure field-derivation functions, dataset I/O, and the
//!   delimiter-aware structural scanner used to edit serialized datasets.
//!
//! - **[`engine`]: The Logic Core.** The process-wide immutable `RuleSet`, the record
//!   assembler that maps raw entries onto canonical records, the transactional artifact
//!   writer, progress reporting, and the error types shared by the workflows.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures: generating a dataset from
//!   a feed, applying a patch request to an existing artifact, and the targeted fix-up
//!   passes (radius corrections, alternative names, re-derived fields).

pub mod core;
pub mod engine;
pub mod workflows;

#[cfg(test)]
pub(crate) mod test_support;
