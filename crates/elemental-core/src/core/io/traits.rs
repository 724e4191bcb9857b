use crate::core::models::element::ElementTable;
use crate::core::models::raw::RawElement;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// A read-only source of raw element entries.
pub trait RawDataSource {
    type Error: Error + From<io::Error>;

    /// Reads every raw entry from `reader`, in source order.
    fn read_from(reader: &mut impl Read) -> Result<Vec<RawElement>, Self::Error>;

    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RawElement>, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

/// Serializes an ordered element table into one artifact format.
///
/// Implementors write records in table order; the table is expected to be sorted
/// ascending by atomic number already.
pub trait DatasetEmitter {
    type Error: Error + From<io::Error>;

    /// Writes the complete artifact for `table`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails or serialization encounters issues.
    fn write_to(table: &ElementTable, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Renders the artifact into memory.
    fn render(table: &ElementTable) -> Result<String, Self::Error> {
        let mut buffer = Vec::new();
        Self::write_to(table, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }

    fn write_to_path<P: AsRef<Path>>(table: &ElementTable, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(table, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
