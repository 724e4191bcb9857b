use elemental::core::io::DatasetFormat;
use elemental::engine::config::{DEFAULT_ANCHOR_FIELD, DerivedField};

pub struct DefaultsConfig {
    pub format: Option<DatasetFormat>,
    pub anchor: String,
    pub strict: bool,
    pub dry_run: bool,
    pub allow_partial: bool,
    pub derived_fields: Vec<DerivedField>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            format: None,
            anchor: DEFAULT_ANCHOR_FIELD.to_string(),
            strict: false,
            dry_run: false,
            allow_partial: false,
            derived_fields: DerivedField::DEFAULT.to_vec(),
        }
    }
}
