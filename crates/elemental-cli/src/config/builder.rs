use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileRulesConfig};
use super::models::AppConfig;
use crate::cli::{ConfigArgs, EditArgs, FixCommands, GenerateArgs, PatchArgs};
use crate::data::ProjectPaths;
use crate::error::{CliError, Result};
use elemental::engine::config::{
    FixConfig, FixConfigBuilder, FixTask, GenerateConfig, GenerateConfigBuilder, PatchConfig,
    PatchConfigBuilder,
};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Reads the config file layer and applies the `-S` overrides on top of it.
///
/// An explicit `--config` must exist; otherwise the per-user config file is used when
/// present, and an empty configuration when not.
pub fn load_file_config(
    opts: &ConfigArgs,
    paths: &ProjectPaths,
) -> Result<(FileConfig, Option<PathBuf>)> {
    let config_path = opts.config.clone().or_else(|| paths.existing_config_file());
    let file_config = match &config_path {
        Some(path) => FileConfig::from_file(path)?,
        None => {
            debug!("No configuration file found; using defaults.");
            FileConfig::default()
        }
    };
    Ok((apply_set_values(file_config, &opts.set_values)?, config_path))
}

pub fn build_generate_config(
    args: &GenerateArgs,
    opts: &ConfigArgs,
    paths: &ProjectPaths,
) -> Result<AppConfig<GenerateConfig>> {
    let defaults = DefaultsConfig::default();
    let (mut file_config, config_file) = load_file_config(opts, paths)?;

    let rules_file = file_config.rules.take().unwrap_or_default();
    let output_file = file_config.output.take().unwrap_or_default();
    let generate_file = file_config.generate.take().unwrap_or_default();

    let mut builder = GenerateConfigBuilder::new()
        .rules_path(resolve_rules_path(args.rules.as_deref(), &rules_file, paths))
        .radius_corrections(if args.radius_corrections {
            Some(true)
        } else {
            rules_file.apply_radius_corrections
        })
        .allow_partial(
            args.allow_partial
                || generate_file
                    .allow_partial
                    .unwrap_or(defaults.allow_partial),
        );

    if let Some(input) = args.input.clone().or(generate_file.input) {
        builder = builder.input_path(input);
    }
    if let Some(output) = args.output.clone().or(output_file.path) {
        builder = builder.output_path(output);
    }
    if let Some(format) = args.format.or(output_file.format).or(defaults.format) {
        builder = builder.format(format);
    }

    let core_config = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;
    Ok(AppConfig {
        config_file,
        core_config,
    })
}

pub fn build_patch_config(
    args: &PatchArgs,
    opts: &ConfigArgs,
    paths: &ProjectPaths,
) -> Result<AppConfig<PatchConfig>> {
    let defaults = DefaultsConfig::default();
    let (mut file_config, config_file) = load_file_config(opts, paths)?;
    let edit = merge_edit_args(&args.edit, &mut file_config, &defaults)?;

    let core_config = PatchConfigBuilder::new()
        .artifact_path(edit.artifact)
        .request_path(args.request.clone())
        .anchor(edit.anchor)
        .strict(edit.strict)
        .dry_run(edit.dry_run)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;
    Ok(AppConfig {
        config_file,
        core_config,
    })
}

pub fn build_fix_config(
    command: &FixCommands,
    opts: &ConfigArgs,
    paths: &ProjectPaths,
) -> Result<AppConfig<FixConfig>> {
    let defaults = DefaultsConfig::default();
    let (mut file_config, config_file) = load_file_config(opts, paths)?;
    let rules_file = file_config.rules.take().unwrap_or_default();

    let (edit_args, rules_arg, task) = match command {
        FixCommands::Radii { edit, rules } => (edit, rules, FixTask::Radii),
        FixCommands::Names { edit, rules } => (edit, rules, FixTask::Names),
        FixCommands::Derived {
            edit,
            rules,
            input,
            fields,
        } => {
            let input_path = input
                .clone()
                .or_else(|| file_config.generate.as_ref().and_then(|g| g.input.clone()))
                .ok_or_else(|| {
                    CliError::Config(
                        "A raw feed is required via --input or `generate.input` in the config file."
                            .to_string(),
                    )
                })?;
            let fields = if fields.is_empty() {
                defaults.derived_fields.clone()
            } else {
                fields.clone()
            };
            (edit, rules, FixTask::Derived { input_path, fields })
        }
    };
    let edit = merge_edit_args(edit_args, &mut file_config, &defaults)?;

    let core_config = FixConfigBuilder::new()
        .artifact_path(edit.artifact)
        .task(task)
        .rules_path(resolve_rules_path(rules_arg.as_deref(), &rules_file, paths))
        .anchor(edit.anchor)
        .strict(edit.strict)
        .dry_run(edit.dry_run)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;
    Ok(AppConfig {
        config_file,
        core_config,
    })
}

struct MergedEdit {
    artifact: PathBuf,
    anchor: String,
    strict: bool,
    dry_run: bool,
}

fn merge_edit_args(
    args: &EditArgs,
    file_config: &mut FileConfig,
    defaults: &DefaultsConfig,
) -> Result<MergedEdit> {
    let patch_file = file_config.patch.take().unwrap_or_default();
    let output_file = file_config.output.take().unwrap_or_default();

    let artifact = args.artifact.clone().or(output_file.path).ok_or_else(|| {
        CliError::Config(
            "A dataset is required via --artifact or `output.path` in the config file.".to_string(),
        )
    })?;
    Ok(MergedEdit {
        artifact,
        anchor: args
            .anchor
            .clone()
            .or(patch_file.anchor)
            .unwrap_or_else(|| defaults.anchor.clone()),
        strict: args.strict || patch_file.strict.unwrap_or(defaults.strict),
        dry_run: args.dry_run || patch_file.dry_run.unwrap_or(defaults.dry_run),
    })
}

fn resolve_rules_path(
    cli_arg: Option<&Path>,
    file_val: &FileRulesConfig,
    paths: &ProjectPaths,
) -> Option<PathBuf> {
    let resolved = cli_arg
        .map(Path::to_path_buf)
        .or_else(|| file_val.path.clone())
        .or_else(|| paths.existing_rules_file());
    match &resolved {
        Some(path) => debug!("Using rule overlay {:?}.", path),
        None => debug!("Using the built-in rule set."),
    }
    resolved
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "rules.path" => {
                config.rules.get_or_insert_with(Default::default).path =
                    Some(PathBuf::from(value_str));
            }
            "rules.apply-radius-corrections" => {
                config
                    .rules
                    .get_or_insert_with(Default::default)
                    .apply_radius_corrections = Some(parse_value(key, value_str, "boolean")?);
            }
            "output.path" => {
                config.output.get_or_insert_with(Default::default).path =
                    Some(PathBuf::from(value_str));
            }
            "output.format" => {
                config.output.get_or_insert_with(Default::default).format =
                    Some(parse_value(key, value_str, "format")?);
            }
            "patch.anchor" => {
                config.patch.get_or_insert_with(Default::default).anchor =
                    Some(value_str.to_string());
            }
            "patch.strict" => {
                config.patch.get_or_insert_with(Default::default).strict =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            "patch.dry-run" => {
                config.patch.get_or_insert_with(Default::default).dry_run =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            "generate.input" => {
                config.generate.get_or_insert_with(Default::default).input =
                    Some(PathBuf::from(value_str));
            }
            "generate.allow-partial" => {
                config
                    .generate
                    .get_or_insert_with(Default::default)
                    .allow_partial = Some(parse_value(key, value_str, "boolean")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use elemental::core::io::DatasetFormat;
    use elemental::engine::config::{DEFAULT_ANCHOR_FIELD, DerivedField};
    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn empty_paths() -> (TempDir, ProjectPaths) {
        let dir = tempdir().unwrap();
        let paths = ProjectPaths::with_custom_path(dir.path().join("config"));
        (dir, paths)
    }

    fn generate_args() -> GenerateArgs {
        GenerateArgs {
            input: None,
            output: None,
            format: None,
            rules: None,
            radius_corrections: false,
            allow_partial: false,
        }
    }

    fn edit_args(artifact: Option<&str>) -> EditArgs {
        EditArgs {
            artifact: artifact.map(PathBuf::from),
            anchor: None,
            strict: false,
            dry_run: false,
        }
    }

    fn write_config(dir: &Path, content: &str) -> ConfigArgs {
        let path = dir.join("elemental.toml");
        fs::write(&path, content).unwrap();
        ConfigArgs {
            config: Some(path),
            set_values: vec![],
        }
    }

    #[test]
    fn generate_uses_cli_values_and_defaults() {
        let (_dir, paths) = empty_paths();
        let mut args = generate_args();
        args.input = Some(PathBuf::from("feed.json"));
        args.output = Some(PathBuf::from("elements.json"));

        let app = build_generate_config(&args, &ConfigArgs::default(), &paths).unwrap();
        let cfg = app.core_config;
        assert!(app.config_file.is_none());
        assert_eq!(cfg.input_path, PathBuf::from("feed.json"));
        assert_eq!(cfg.format, DatasetFormat::Json);
        assert_eq!(cfg.rules_path, None);
        assert_eq!(cfg.radius_corrections, None);
        assert!(!cfg.allow_partial);
    }

    #[test]
    fn generate_reads_the_file_and_cli_wins() {
        let (dir, paths) = empty_paths();
        let opts = write_config(
            dir.path(),
            r#"
            [rules]
            path = "overlay.toml"
            apply-radius-corrections = false

            [output]
            path = "from-file.ts"
            format = "json"

            [generate]
            input = "file-feed.json"
            allow-partial = true
            "#,
        );
        let mut args = generate_args();
        args.output = Some(PathBuf::from("from-cli.ts"));
        args.radius_corrections = true;

        let app = build_generate_config(&args, &opts, &paths).unwrap();
        let cfg = app.core_config;
        assert_eq!(app.config_file, opts.config);
        assert_eq!(cfg.input_path, PathBuf::from("file-feed.json"));
        assert_eq!(cfg.output_path, PathBuf::from("from-cli.ts"));
        assert_eq!(cfg.format, DatasetFormat::Json);
        assert_eq!(cfg.rules_path, Some(PathBuf::from("overlay.toml")));
        assert_eq!(cfg.radius_corrections, Some(true));
        assert!(cfg.allow_partial);
    }

    #[test]
    fn generate_without_input_is_a_config_error() {
        let (_dir, paths) = empty_paths();
        let mut args = generate_args();
        args.output = Some(PathBuf::from("elements.ts"));
        let err = build_generate_config(&args, &ConfigArgs::default(), &paths).unwrap_err();
        assert!(matches!(err, CliError::Config(msg) if msg.contains("input_path")));
    }

    #[test]
    fn user_rules_file_is_picked_up_when_nothing_else_names_one() {
        let (_dir, paths) = empty_paths();
        fs::create_dir_all(paths.config_dir()).unwrap();
        fs::write(paths.rules_file(), "version = \"2\"\n").unwrap();

        let mut args = generate_args();
        args.input = Some(PathBuf::from("feed.json"));
        args.output = Some(PathBuf::from("elements.ts"));
        let app = build_generate_config(&args, &ConfigArgs::default(), &paths).unwrap();
        assert_eq!(app.core_config.rules_path, Some(paths.rules_file()));
    }

    #[test]
    fn set_values_override_the_file() {
        let (dir, paths) = empty_paths();
        let mut opts = write_config(dir.path(), "[patch]\nanchor = \"name\"\nstrict = false\n");
        opts.set_values = vec![
            "patch.anchor=symbol".to_string(),
            "patch.strict=true".to_string(),
            "output.path=elements.ts".to_string(),
        ];
        let args = PatchArgs {
            edit: edit_args(None),
            request: PathBuf::from("patch.csv"),
        };

        let cfg = build_patch_config(&args, &opts, &paths).unwrap().core_config;
        assert_eq!(cfg.artifact_path, PathBuf::from("elements.ts"));
        assert_eq!(cfg.anchor, "symbol");
        assert!(cfg.strict);
        assert!(!cfg.dry_run);
    }

    #[test]
    fn patch_defaults_to_the_uses_anchor() {
        let (_dir, paths) = empty_paths();
        let args = PatchArgs {
            edit: edit_args(Some("elements.ts")),
            request: PathBuf::from("patch.csv"),
        };
        let cfg = build_patch_config(&args, &ConfigArgs::default(), &paths)
            .unwrap()
            .core_config;
        assert_eq!(cfg.anchor, DEFAULT_ANCHOR_FIELD);
    }

    #[test]
    fn patch_without_artifact_is_a_config_error() {
        let (_dir, paths) = empty_paths();
        let args = PatchArgs {
            edit: edit_args(None),
            request: PathBuf::from("patch.csv"),
        };
        let err = build_patch_config(&args, &ConfigArgs::default(), &paths).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn fix_derived_defaults_its_fields_and_feed() {
        let (dir, paths) = empty_paths();
        let opts = write_config(dir.path(), "[generate]\ninput = \"feed.json\"\n");
        let command = FixCommands::Derived {
            edit: edit_args(Some("elements.ts")),
            rules: None,
            input: None,
            fields: vec![],
        };

        let cfg = build_fix_config(&command, &opts, &paths).unwrap().core_config;
        assert_eq!(
            cfg.task,
            FixTask::Derived {
                input_path: PathBuf::from("feed.json"),
                fields: DerivedField::DEFAULT.to_vec(),
            }
        );
    }

    #[test]
    fn fix_derived_without_a_feed_is_a_config_error() {
        let (_dir, paths) = empty_paths();
        let command = FixCommands::Derived {
            edit: edit_args(Some("elements.ts")),
            rules: None,
            input: None,
            fields: vec![DerivedField::Category],
        };
        let err = build_fix_config(&command, &ConfigArgs::default(), &paths).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn malformed_and_unknown_set_values_are_rejected() {
        for bad in ["patch.strict", "patch.strict=maybe", "patch.colour=red", "output.format=yaml"] {
            let err = apply_set_values(FileConfig::default(), &[bad.to_string()]).unwrap_err();
            assert!(matches!(err, CliError::Config(_)), "{bad}");
        }
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let (dir, paths) = empty_paths();
        let opts = ConfigArgs {
            config: Some(dir.path().join("absent.toml")),
            set_values: vec![],
        };
        assert!(matches!(
            load_file_config(&opts, &paths).unwrap_err(),
            CliError::Io(_)
        ));
    }
}
