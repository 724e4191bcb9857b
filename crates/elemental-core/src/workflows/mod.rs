//! # Workflows Module
//!
//! End-to-end procedures and the entry points for users of the library.
//!
//! - **Generation** ([`generate`]) - feed to rule set to records to an emitted artifact
//! - **Patching** ([`patch`]) - applies a CSV or in-memory patch request to an artifact
//! - **Fix-ups** ([`fix`]) - targeted passes expressed as patches: radius corrections,
//!   alternative names, and re-derived fields
//!
//! Every workflow reports progress through a
//! [`ProgressReporter`](crate::engine::progress::ProgressReporter) and returns a
//! [`PipelineError`](crate::engine::error::PipelineError) on failure. Artifacts are only
//! ever replaced as a whole, so a failed run leaves the previous file in place.

pub mod fix;
pub mod generate;
pub mod patch;

use crate::engine::error::PipelineError;
use crate::engine::rules::RuleSet;
use std::path::Path;

/// The built-in rule set, or the built-in set with the overlay at `path` applied.
pub(crate) fn load_rules(path: Option<&Path>) -> Result<RuleSet, PipelineError> {
    Ok(match path {
        Some(path) => RuleSet::load(path)?,
        None => RuleSet::builtin().clone(),
    })
}
