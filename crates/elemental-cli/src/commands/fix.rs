use super::patch::print_report;
use crate::cli::{ConfigArgs, FixArgs};
use crate::config::builder::build_fix_config;
use crate::data::ProjectPaths;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use elemental::engine::progress::ProgressReporter;
use elemental::workflows;
use tracing::{debug, info};

pub fn run(args: FixArgs, opts: &ConfigArgs) -> Result<()> {
    let paths = ProjectPaths::new()?;
    let app_config = build_fix_config(&args.command, opts, &paths)?;
    if let Some(file) = &app_config.config_file {
        info!("Using configuration file {:?}.", file);
    }
    debug!("Fix configuration: {:?}", app_config.core_config);

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let report = workflows::fix::run(&app_config.core_config, &reporter)?;

    print_report(&report, &app_config.core_config.artifact_path);
    Ok(())
}
