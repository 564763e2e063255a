use hunter_common::error::HunterError;
use thiserror::Error;

use crate::table::CsvTable;

pub const FEATURE_COUNT: usize = 6;

/// Required feature columns, in the order the model consumes them.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "file_ops_rate",
    "failed_access_ratio",
    "new_procs_created",
    "network_conn_count",
    "unusual_file_types",
    "entropy_change",
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("row {row}, column {column}: {value:?} is not a number")]
    NotNumeric {
        row: usize,
        column: String,
        value: String,
    },

    #[error("field {0} is required")]
    MissingField(String),

    #[error("field {field} must be a number, got {value:?}")]
    InvalidField { field: String, value: String },

    #[error("CSV contains no data rows")]
    NoRows,

    #[error("could not parse CSV: {0}")]
    Csv(String),
}

impl From<FeatureError> for HunterError {
    fn from(err: FeatureError) -> Self {
        HunterError::Validation(err.to_string())
    }
}

/// Parse one cell as a finite float. Surrounding whitespace is ignored.
pub fn parse_cell(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// One observation in [`FEATURE_COLUMNS`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// Build a vector from `(field name, raw value)` pairs, e.g. submitted
    /// form fields. Pairs are taken positionally.
    pub fn parse_fields(fields: [(&str, &str); FEATURE_COUNT]) -> Result<Self, FeatureError> {
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, (name, raw)) in values.iter_mut().zip(fields) {
            if raw.trim().is_empty() {
                return Err(FeatureError::MissingField(name.to_owned()));
            }
            *slot = parse_cell(raw).ok_or_else(|| FeatureError::InvalidField {
                field: name.to_owned(),
                value: raw.to_owned(),
            })?;
        }
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureMatrix {
    rows: Vec<FeatureVector>,
}

impl FeatureMatrix {
    pub fn from_rows(rows: Vec<FeatureVector>) -> Self {
        Self { rows }
    }

    pub fn from_vector(vector: FeatureVector) -> Self {
        Self { rows: vec![vector] }
    }

    /// Select the required columns from `table`, reordered to
    /// [`FEATURE_COLUMNS`]. Extra columns are ignored. Missing columns are
    /// reported together, in canonical order, before any cell is read.
    pub fn from_table(table: &CsvTable) -> Result<Self, FeatureError> {
        let indices: Vec<Option<usize>> = FEATURE_COLUMNS
            .iter()
            .map(|column| table.column_index(column))
            .collect();

        let missing: Vec<String> = FEATURE_COLUMNS
            .iter()
            .zip(&indices)
            .filter(|(_, idx)| idx.is_none())
            .map(|(column, _)| (*column).to_owned())
            .collect();
        if !missing.is_empty() {
            return Err(FeatureError::MissingColumns(missing));
        }

        let indices: Vec<usize> = indices.into_iter().flatten().collect();
        let mut rows = Vec::with_capacity(table.row_count());

        for (row_idx, record) in table.records().iter().enumerate() {
            let mut values = [0.0; FEATURE_COUNT];
            for (slot, (column, &col_idx)) in values
                .iter_mut()
                .zip(FEATURE_COLUMNS.iter().zip(&indices))
            {
                let raw = record.get(col_idx).unwrap_or("");
                *slot = parse_cell(raw).ok_or_else(|| FeatureError::NotNumeric {
                    row: row_idx + 1,
                    column: (*column).to_owned(),
                    value: raw.to_owned(),
                })?;
            }
            rows.push(FeatureVector(values));
        }

        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[FeatureVector] {
        &self.rows
    }
}
