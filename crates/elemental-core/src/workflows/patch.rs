use crate::core::patch::editor::FieldAction;
use crate::core::patch::request::PatchRequest;
use crate::core::patch::{FieldChange, RecordFailure, apply_patch};
use crate::engine::config::PatchConfig;
use crate::engine::error::PipelineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::transaction::{ArtifactTransaction, TransactionOutcome};
use std::path::Path;
use tracing::{info, instrument, warn};

/// Summary of one patch run against an artifact.
#[derive(Debug, Clone)]
pub struct PatchReport {
    pub changes: Vec<FieldChange>,
    pub failures: Vec<RecordFailure>,
    pub outcome: TransactionOutcome,
}

impl PatchReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn count(&self, action: FieldAction) -> usize {
        self.changes.iter().filter(|c| c.action == action).count()
    }
}

/// Applies a CSV patch request to an artifact in place.
#[instrument(skip_all, name = "patch_workflow")]
pub fn run(config: &PatchConfig, reporter: &ProgressReporter) -> Result<PatchReport, PipelineError> {
    let request = reporter.phase("Loading", || PatchRequest::load_csv(&config.request_path))?;
    info!(
        "Loaded patch request with {} field edits across {} records.",
        request.field_count(),
        request.record_count()
    );

    patch_artifact(
        &config.artifact_path,
        &config.anchor,
        config.strict,
        config.dry_run,
        reporter,
        |_| Ok(request),
    )
}

/// The read-patch-commit cycle shared by every workflow that edits an artifact.
///
/// `build_request` receives the current artifact text, so callers can render values in
/// the artifact's own quoting style. Failed records are reported and skipped; with
/// `strict` set, any failure aborts the run and the artifact is left untouched.
pub(crate) fn patch_artifact(
    path: &Path,
    anchor: &str,
    strict: bool,
    dry_run: bool,
    reporter: &ProgressReporter,
    build_request: impl FnOnce(&str) -> Result<PatchRequest, PipelineError>,
) -> Result<PatchReport, PipelineError> {
    let mut changes = Vec::new();
    let mut failures = Vec::new();

    let outcome = reporter.phase("Patching", || {
        ArtifactTransaction::new(path)
            .dry_run(dry_run)
            .execute(|text| -> Result<String, PipelineError> {
                let request = build_request(text)?;
                reporter.report(Progress::TaskStart {
                    total_steps: request.record_count() as u64,
                });
                let outcome = apply_patch(text, &request, anchor);
                reporter.report(Progress::TaskFinish);

                if strict && !outcome.is_complete() {
                    return Err(PipelineError::PatchFailures {
                        failed: outcome.failures.len(),
                        total: request.record_count(),
                    });
                }
                changes = outcome.changes;
                failures = outcome.failures;
                Ok(outcome.text)
            })
    })?;

    if !failures.is_empty() {
        warn!(
            "{} record(s) could not be patched; see the report for details.",
            failures.len()
        );
    }
    info!(
        "Patched {:?}: {} field edits, {} failed records ({:?}).",
        path,
        changes.len(),
        failures.len(),
        outcome
    );

    Ok(PatchReport {
        changes,
        failures,
        outcome,
    })
}
