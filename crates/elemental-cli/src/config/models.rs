use std::path::PathBuf;

/// A fully merged library configuration plus where its file layer came from.
#[derive(Debug)]
pub struct AppConfig<C> {
    pub config_file: Option<PathBuf>,
    pub core_config: C,
}
