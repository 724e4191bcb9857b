//! # Engine Module
//!
//! Process-wide state and plumbing shared by the workflows.
//!
//! - **Rules** ([`rules`]) - the immutable, versioned [`rules::RuleSet`] of curated tables
//! - **Assembly** ([`assembler`]) - raw feed entries to an ordered [`crate::core::models::element::ElementTable`]
//! - **Configuration** ([`config`]) - per-workflow settings and their builders
//! - **Transactions** ([`transaction`]) - all-or-nothing rewrites of artifact files
//! - **Progress Monitoring** ([`progress`]) - progress events for front ends
//! - **Error Handling** ([`error`]) - the workflow-level error type

pub mod assembler;
pub mod config;
pub mod error;
pub mod progress;
pub mod rules;
pub mod transaction;
