use super::traits::DatasetEmitter;
use crate::core::models::element::ElementTable;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A pretty-printed JSON array of records with the same camelCase keys as the
/// TypeScript module.
pub struct JsonDataset;

impl DatasetEmitter for JsonDataset {
    type Error = EmitError;

    fn write_to(table: &ElementTable, writer: &mut impl Write) -> Result<(), Self::Error> {
        serde_json::to_writer_pretty(&mut *writer, table.elements())?;
        writeln!(writer)?;
        Ok(())
    }
}
