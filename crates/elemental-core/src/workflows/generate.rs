use super::load_rules;
use crate::core::io::DatasetFormat;
use crate::core::io::feed::JsonFeed;
use crate::core::io::json::{EmitError, JsonDataset};
use crate::core::io::traits::{DatasetEmitter, RawDataSource};
use crate::core::io::typescript::TypeScriptModule;
use crate::core::models::element::ElementTable;
use crate::engine::assembler::{AssemblyReport, assemble};
use crate::engine::config::GenerateConfig;
use crate::engine::error::PipelineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::transaction::{ArtifactTransaction, TransactionOutcome};
use std::io;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// Summary of one generation run.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub table: ElementTable,
    pub assembly: AssemblyReport,
    pub output_path: PathBuf,
    pub format: DatasetFormat,
    pub ruleset_version: String,
    pub outcome: TransactionOutcome,
}

/// Renders `table` as a complete artifact in `format`.
pub fn render_dataset(table: &ElementTable, format: DatasetFormat) -> io::Result<String> {
    match format {
        DatasetFormat::TypeScript => TypeScriptModule::render(table),
        DatasetFormat::Json => JsonDataset::render(table).map_err(|e| match e {
            EmitError::Io(e) => e,
            EmitError::Json(e) => io::Error::from(e),
        }),
    }
}

/// Runs the full synthesis pipeline: feed and rules in, one artifact out.
///
/// The artifact is rendered completely in memory and then swapped in, so a failing
/// run never leaves a truncated file behind. An incomplete table is an error unless
/// `allow_partial` is set.
#[instrument(skip_all, name = "generate_workflow")]
pub fn run(
    config: &GenerateConfig,
    reporter: &ProgressReporter,
) -> Result<GenerateReport, PipelineError> {
    info!("Starting dataset generation from {:?}.", config.input_path);

    // === Phase 1: Load rules and feed ===
    let (rules, raw) = reporter.phase("Loading", || -> Result<_, PipelineError> {
        let mut rules = load_rules(config.rules_path.as_deref())?;
        if let Some(enabled) = config.radius_corrections {
            rules = rules.with_radius_corrections(enabled);
        }
        let raw = JsonFeed::read_from_path(&config.input_path)?;
        info!(
            "Loaded {} feed entries (rule set v{}, radius corrections {}).",
            raw.len(),
            rules.version(),
            if rules.apply_radius_corrections() { "on" } else { "off" }
        );
        Ok((rules, raw))
    })?;

    // === Phase 2: Assemble records ===
    let (table, assembly) = reporter.phase("Assembly", || assemble(&raw, &rules, reporter));
    info!(
        "Assembled {} records ({} feed entries skipped).",
        assembly.assembled,
        assembly.skipped.len()
    );

    // === Phase 3: Validate ===
    if let Err(e) = table.check_invariants() {
        if !config.allow_partial {
            return Err(e.into());
        }
        warn!("Emitting a partial dataset: {}", e);
    }

    // === Phase 4: Emit ===
    let outcome = reporter.phase("Emission", || -> Result<_, PipelineError> {
        let content =
            render_dataset(&table, config.format).map_err(|source| PipelineError::Emit {
                path: config.output_path.to_string_lossy().to_string(),
                source,
            })?;
        Ok(ArtifactTransaction::new(&config.output_path).replace(&content)?)
    })?;
    reporter.report(Progress::Message(format!(
        "Wrote {} records to {}",
        table.len(),
        config.output_path.display()
    )));
    info!(
        "Dataset written to {:?} as {} ({:?}).",
        config.output_path, config.format, outcome
    );

    Ok(GenerateReport {
        ruleset_version: rules.version().to_string(),
        table,
        assembly,
        output_path: config.output_path.clone(),
        format: config.format,
        outcome,
    })
}
