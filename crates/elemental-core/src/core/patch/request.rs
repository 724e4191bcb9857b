use crate::core::models::element::is_supported_atomic_number;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Atomic number {atomic_number} on row {row} is outside 1..=118")]
    OutOfRange { row: usize, atomic_number: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPatch {
    pub field: String,
    /// The new value, written as it should appear in the artifact (e.g. `[3, 2]`).
    pub value: String,
}

#[derive(Debug, Deserialize)]
struct RequestRow {
    atomic_number: u32,
    field: String,
    value: String,
}

/// Field edits grouped by record: `{atomicNumber -> [(field, value)]}`.
///
/// Records are visited in ascending atomic-number order; fields keep the order in
/// which they were first set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchRequest {
    records: BTreeMap<u32, Vec<FieldPatch>>,
}

impl PatchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `field` of record `atomic_number` to `value`, replacing any earlier value
    /// for the same field.
    pub fn set(
        &mut self,
        atomic_number: u32,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        let field = field.into();
        let value = value.into();
        let patches = self.records.entry(atomic_number).or_default();
        match patches.iter_mut().find(|p| p.field == field) {
            Some(existing) => existing.value = value,
            None => patches.push(FieldPatch { field, value }),
        }
        self
    }

    pub fn with(mut self, atomic_number: u32, field: &str, value: &str) -> Self {
        self.set(atomic_number, field, value);
        self
    }

    pub fn load_csv(path: &Path) -> Result<Self, RequestError> {
        let path_str = path.to_string_lossy().to_string();
        let reader = csv::Reader::from_path(path).map_err(|e| RequestError::Csv {
            path: path_str.clone(),
            source: e,
        })?;
        Self::from_csv(reader, &path_str)
    }

    pub fn from_csv_reader(reader: impl Read) -> Result<Self, RequestError> {
        Self::from_csv(csv::Reader::from_reader(reader), "<reader>")
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>, origin: &str) -> Result<Self, RequestError> {
        let mut request = Self::new();
        for (index, result) in reader.deserialize::<RequestRow>().enumerate() {
            let row = result.map_err(|e| RequestError::Csv {
                path: origin.to_string(),
                source: e,
            })?;
            if !is_supported_atomic_number(i64::from(row.atomic_number)) {
                return Err(RequestError::OutOfRange {
                    row: index + 1,
                    atomic_number: row.atomic_number,
                });
            }
            request.set(row.atomic_number, row.field.trim(), row.value);
        }
        Ok(request)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &[FieldPatch])> {
        self.records.iter().map(|(z, patches)| (*z, patches.as_slice()))
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn field_count(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn later_values_replace_earlier_ones_for_the_same_field() {
        let mut request = PatchRequest::new();
        request
            .set(50, "atomicRadius", "140")
            .set(50, "valenceElectrons", "4")
            .set(50, "atomicRadius", "145");

        let (z, patches) = request.iter().next().unwrap();
        assert_eq!(z, 50);
        assert_eq!(patches.len(), 2);
        assert_eq!(patches[0].field, "atomicRadius");
        assert_eq!(patches[0].value, "145");
        assert_eq!(request.field_count(), 2);
    }

    #[test]
    fn records_iterate_in_ascending_order() {
        let request = PatchRequest::new()
            .with(118, "atomicRadius", "120")
            .with(1, "valenceElectrons", "1");
        let order: Vec<_> = request.iter().map(|(z, _)| z).collect();
        assert_eq!(order, vec![1, 118]);
    }

    #[test]
    fn load_csv_reads_quoted_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("patch.csv");
        fs::write(
            &path,
            "atomic_number,field,value\n50,oxidationStates,\"[4, 2, -4]\"\n50,alternativeNames,\"{ af: 'Tin' }\"\n",
        )
        .unwrap();

        let request = PatchRequest::load_csv(&path).unwrap();
        let (_, patches) = request.iter().next().unwrap();
        assert_eq!(patches[0].value, "[4, 2, -4]");
        assert_eq!(patches[1].value, "{ af: 'Tin' }");
    }

    #[test]
    fn load_csv_rejects_bad_rows() {
        let result = PatchRequest::from_csv_reader("atomic_number,field,value\nabc,x,1\n".as_bytes());
        assert!(matches!(result, Err(RequestError::Csv { .. })));

        let result = PatchRequest::from_csv_reader("atomic_number,field,value\n119,x,1\n".as_bytes());
        assert!(matches!(
            result,
            Err(RequestError::OutOfRange {
                row: 1,
                atomic_number: 119
            })
        ));
    }
}
