use clap::{Args, Parser, Subcommand};
use elemental::core::io::DatasetFormat;
use elemental::engine::config::DerivedField;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Elemental - derives a canonical periodic-table dataset from a raw element feed and patches emitted datasets in place.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Options shared by every command that reads the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a TOML configuration file.
    /// Defaults to `config.toml` in the user configuration directory, if present.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S patch.anchor=name
    #[arg(short = 'S', long = "set", global = true, value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the element dataset from a raw feed.
    Generate(GenerateArgs),
    /// Apply a CSV patch request to an emitted dataset.
    Patch(PatchArgs),
    /// Run a targeted fix-up pass over an emitted dataset.
    Fix(FixArgs),
    /// Show the configuration and rule file locations.
    Paths,
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the raw element feed (JSON).
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Path for the emitted dataset.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format. Inferred from the output extension when omitted.
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<DatasetFormat>,

    /// Rule overlay (TOML) applied on top of the built-in tables.
    #[arg(short, long, value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Fill curated radius gaps (e.g. elements 117 and 118) by trend analogy.
    #[arg(long)]
    pub radius_corrections: bool,

    /// Emit the dataset even when records are missing.
    #[arg(long)]
    pub allow_partial: bool,
}

/// Options shared by every command that edits an existing dataset.
#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    /// Path to the emitted dataset to edit in place.
    /// Defaults to `output.path` from the config file.
    #[arg(short, long, value_name = "PATH")]
    pub artifact: Option<PathBuf>,

    /// Field after which new fields are inserted.
    #[arg(long, value_name = "FIELD")]
    pub anchor: Option<String>,

    /// Fail without writing when any record cannot be patched.
    #[arg(long)]
    pub strict: bool,

    /// Report what would change without writing the dataset.
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

/// Arguments for the `patch` subcommand.
#[derive(Args, Debug)]
pub struct PatchArgs {
    #[command(flatten)]
    pub edit: EditArgs,

    /// CSV file with `atomic_number,field,value` rows.
    #[arg(long, required = true, value_name = "PATH")]
    pub request: PathBuf,
}

/// Arguments for the `fix` subcommand.
#[derive(Args, Debug)]
pub struct FixArgs {
    #[command(subcommand)]
    pub command: FixCommands,
}

/// Available fix-up passes.
#[derive(Subcommand, Debug)]
pub enum FixCommands {
    /// Apply the atomic radius correction table.
    Radii {
        #[command(flatten)]
        edit: EditArgs,
        /// Rule overlay (TOML) applied on top of the built-in tables.
        #[arg(short, long, value_name = "PATH")]
        rules: Option<PathBuf>,
    },
    /// Add or refresh `alternativeNames` from the curated name tables.
    Names {
        #[command(flatten)]
        edit: EditArgs,
        /// Rule overlay (TOML) applied on top of the built-in tables.
        #[arg(short, long, value_name = "PATH")]
        rules: Option<PathBuf>,
    },
    /// Recompute derived fields from a raw feed.
    Derived {
        #[command(flatten)]
        edit: EditArgs,
        /// Rule overlay (TOML) applied on top of the built-in tables.
        #[arg(short, long, value_name = "PATH")]
        rules: Option<PathBuf>,
        /// Path to the raw element feed (JSON).
        #[arg(short, long, value_name = "PATH")]
        input: Option<PathBuf>,
        /// Comma-separated record keys to recompute.
        /// Defaults to valenceElectrons,oxidationStates,atomicRadius.
        #[arg(long, value_name = "FIELDS", value_delimiter = ',')]
        fields: Vec<DerivedField>,
    },
}
