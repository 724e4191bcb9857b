//! Incremental, structure-aware editing of emitted artifacts.
//!
//! [`scanner`] splits the record collection into records and fields without
//! interpreting values, [`editor`] queues field replacements and insertions against
//! that structure, and [`request`] describes which fields to change. [`apply_patch`]
//! ties them together with per-record failure isolation.

pub mod editor;
pub mod request;
pub mod scanner;

use crate::core::io::literal::LiteralStyle;
use editor::{FieldAction, PatchError, StructuralEditor};
use request::PatchRequest;
use scanner::CollectionScan;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub atomic_number: u32,
    pub field: String,
    pub action: FieldAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    pub atomic_number: u32,
    pub error: PatchError,
}

/// The edited text plus what happened to every requested field and record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub text: String,
    pub changes: Vec<FieldChange>,
    pub failures: Vec<RecordFailure>,
}

impl PatchOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn count(&self, action: FieldAction) -> usize {
        self.changes.iter().filter(|c| c.action == action).count()
    }
}

/// The quoting convention of an existing artifact.
///
/// Text without a record collection is treated as TypeScript.
pub fn literal_style_of(text: &str) -> LiteralStyle {
    match CollectionScan::parse(text) {
        Ok(scan) => editor::detect_style(&scan),
        Err(_) => LiteralStyle::TypeScript,
    }
}

/// Applies `request` to `text`, one record at a time.
///
/// A record that cannot be located unambiguously, or whose requested values fail
/// validation, is skipped and reported; the other records are still patched. When the
/// text has no record collection at all, every record fails and the text is returned
/// unchanged.
pub fn apply_patch(text: &str, request: &PatchRequest, anchor: &str) -> PatchOutcome {
    let mut editor = match StructuralEditor::new(text, anchor) {
        Ok(editor) => editor,
        Err(e) => {
            warn!("Cannot patch artifact: {}", e);
            return PatchOutcome {
                text: text.to_string(),
                changes: Vec::new(),
                failures: request
                    .iter()
                    .map(|(atomic_number, _)| RecordFailure {
                        atomic_number,
                        error: PatchError::Scan(e.clone()),
                    })
                    .collect(),
            };
        }
    };

    let mut changes = Vec::new();
    let mut failures = Vec::new();

    for (atomic_number, patches) in request.iter() {
        let fields = patches
            .iter()
            .map(|p| (p.field.as_str(), p.value.as_str()));
        let result = editor
            .locate(atomic_number)
            .and_then(|handle| editor.set_fields(handle, fields));

        match result {
            Ok(actions) => {
                for (patch, action) in patches.iter().zip(actions) {
                    debug!(
                        "Record {}: {} {:?}.",
                        atomic_number, patch.field, action
                    );
                    changes.push(FieldChange {
                        atomic_number,
                        field: patch.field.clone(),
                        action,
                    });
                }
            }
            Err(error) => {
                warn!("Skipping patch for record {}: {}", atomic_number, error);
                failures.push(RecordFailure {
                    atomic_number,
                    error,
                });
            }
        }
    }

    PatchOutcome {
        text: editor.finish(),
        changes,
        failures,
    }
}
