use crate::cli::ConfigArgs;
use crate::data::ProjectPaths;
use crate::error::Result;
use elemental::engine::rules::RULESET_VERSION;
use std::path::Path;

pub fn run(opts: &ConfigArgs) -> Result<()> {
    let paths = ProjectPaths::new()?;
    let config_file = opts.config.clone().unwrap_or_else(|| paths.config_file());

    println!("Configuration directory: {}", paths.config_dir().display());
    println!("Configuration file:      {}", describe(&config_file));
    println!("Rule overlay:            {}", describe(&paths.rules_file()));
    println!("Built-in rule set:       v{}", RULESET_VERSION);
    Ok(())
}

fn describe(path: &Path) -> String {
    if path.is_file() {
        path.display().to_string()
    } else {
        format!("{} (not present)", path.display())
    }
}
