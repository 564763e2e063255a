use csv::{ReaderBuilder, StringRecord, Trim};

use crate::features::FeatureError;

/// A parsed CSV document: one header row plus data records.
#[derive(Debug, Clone)]
pub struct CsvTable {
    headers: Vec<String>,
    records: Vec<StringRecord>,
}

impl CsvTable {
    /// Parse `bytes` as headed CSV. Headers and cells are trimmed; ragged
    /// rows, invalid UTF-8 and a missing header row are parse errors.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FeatureError> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| FeatureError::Csv(e.to_string()))?
            .iter()
            .map(str::to_owned)
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(FeatureError::Csv("missing header row".to_string()));
        }

        let records = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| FeatureError::Csv(e.to_string()))?;

        Ok(Self { headers, records })
    }

    pub fn records(&self) -> &[StringRecord] {
        &self.records
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Index of the first column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}
