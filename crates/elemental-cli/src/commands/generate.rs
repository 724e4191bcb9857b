use crate::cli::{ConfigArgs, GenerateArgs};
use crate::config::builder::build_generate_config;
use crate::data::ProjectPaths;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use elemental::engine::progress::ProgressReporter;
use elemental::engine::transaction::TransactionOutcome;
use elemental::workflows;
use tracing::{debug, info};

pub fn run(args: GenerateArgs, opts: &ConfigArgs) -> Result<()> {
    let paths = ProjectPaths::new()?;
    let app_config = build_generate_config(&args, opts, &paths)?;
    if let Some(file) = &app_config.config_file {
        info!("Using configuration file {:?}.", file);
    }
    debug!("Generate configuration: {:?}", app_config.core_config);

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let report = workflows::generate::run(&app_config.core_config, &reporter)?;

    for entry in report.assembly.rejected() {
        println!(
            "  ! skipped feed entry {} ('{}'): {}",
            entry.number, entry.symbol, entry.reason
        );
    }
    for entry in &report.assembly.defaulted {
        println!(
            "  ! record {} has no usable {} in the feed; wrote a placeholder",
            entry.atomic_number, entry.field
        );
    }
    let verb = match report.outcome {
        TransactionOutcome::Unchanged => "is already up to date",
        _ => "written",
    };
    println!(
        "{} records ({} format, rule set v{}) {}: {}",
        report.table.len(),
        report.format,
        report.ruleset_version,
        verb,
        report.output_path.display()
    );
    Ok(())
}
