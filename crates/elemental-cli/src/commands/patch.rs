use crate::cli::{ConfigArgs, PatchArgs};
use crate::config::builder::build_patch_config;
use crate::data::ProjectPaths;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use elemental::core::patch::editor::FieldAction;
use elemental::engine::progress::ProgressReporter;
use elemental::engine::transaction::TransactionOutcome;
use elemental::workflows;
use elemental::workflows::patch::PatchReport;
use std::path::Path;
use tracing::{debug, info};

pub fn run(args: PatchArgs, opts: &ConfigArgs) -> Result<()> {
    let paths = ProjectPaths::new()?;
    let app_config = build_patch_config(&args, opts, &paths)?;
    if let Some(file) = &app_config.config_file {
        info!("Using configuration file {:?}.", file);
    }
    debug!("Patch configuration: {:?}", app_config.core_config);

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let report = workflows::patch::run(&app_config.core_config, &reporter)?;

    print_report(&report, &app_config.core_config.artifact_path);
    Ok(())
}

/// Prints the per-record outcome of a patch or fix run.
pub fn print_report(report: &PatchReport, artifact: &Path) {
    for failure in &report.failures {
        println!("  ✗ record {}: {}", failure.atomic_number, failure.error);
    }
    let status = match report.outcome {
        TransactionOutcome::Committed => "updated",
        TransactionOutcome::Unchanged => "already up to date",
        TransactionOutcome::Discarded => "not written (dry run)",
    };
    println!(
        "{}: {} replaced, {} inserted, {} unchanged, {} failed record(s); {}.",
        artifact.display(),
        report.count(FieldAction::Replaced),
        report.count(FieldAction::Inserted),
        report.count(FieldAction::Unchanged),
        report.failures.len(),
        status
    );
}
