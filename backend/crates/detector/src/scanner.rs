use std::sync::Arc;

use hunter_common::error::{HunterError, HunterResult};

use crate::features::{FeatureError, FeatureMatrix, FeatureVector};
use crate::model::ProbabilityModel;
use crate::table::CsvTable;
use crate::verdict::{ScanSummary, ScoreResult};

/// Runs validated inputs through the shared model and shapes the verdict.
#[derive(Clone)]
pub struct Scanner {
    model: Arc<dyn ProbabilityModel>,
}

impl Scanner {
    pub fn new(model: Arc<dyn ProbabilityModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn scan_manual(&self, vector: FeatureVector) -> HunterResult<ScoreResult> {
        let fused = self.first_fused(&FeatureMatrix::from_vector(vector))?;
        Ok(ScoreResult::from_probability(fused))
    }

    /// Score every row of `table` but report only the first row's verdict.
    pub fn scan_table(&self, table: &CsvTable) -> HunterResult<ScanSummary> {
        let matrix = FeatureMatrix::from_table(table)?;
        if matrix.is_empty() {
            return Err(FeatureError::NoRows.into());
        }
        let fused = self.first_fused(&matrix)?;
        Ok(ScanSummary::new(matrix.len(), fused))
    }

    fn first_fused(&self, matrix: &FeatureMatrix) -> HunterResult<f64> {
        let probs = self.model.predict_proba(matrix)?;
        if probs.fused.len() != matrix.len() {
            return Err(HunterError::Model(format!(
                "{} returned {} probabilities for {} rows",
                self.model.name(),
                probs.fused.len(),
                matrix.len()
            )));
        }

        let first = probs.fused[0];
        if !(0.0..=1.0).contains(&first) {
            return Err(HunterError::Model(format!(
                "{} returned out-of-range probability {first}",
                self.model.name()
            )));
        }
        Ok(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Probabilities;
    use crate::verdict::Action;
    use std::sync::Mutex;

    const HEADER: &str = "file_ops_rate,failed_access_ratio,new_procs_created,network_conn_count,unusual_file_types,entropy_change";

    /// Returns `fused` cycled over the input rows and records what it saw.
    struct FixedModel {
        fused: Vec<f64>,
        seen: Mutex<Vec<FeatureMatrix>>,
    }

    impl FixedModel {
        fn new(fused: &[f64]) -> Arc<Self> {
            Arc::new(Self {
                fused: fused.to_vec(),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl ProbabilityModel for FixedModel {
        fn name(&self) -> &str {
            "fixed"
        }

        fn predict_proba(&self, matrix: &FeatureMatrix) -> HunterResult<Probabilities> {
            self.seen.lock().unwrap().push(matrix.clone());
            let fused: Vec<f64> = self.fused.iter().copied().cycle().take(matrix.len()).collect();
            Ok(Probabilities {
                primary: fused.clone(),
                secondary: fused.clone(),
                fused,
            })
        }
    }

    #[test]
    fn manual_scan_flags_high_probability() {
        let model = FixedModel::new(&[0.82]);
        let scanner = Scanner::new(model.clone());

        let result = scanner
            .scan_manual(FeatureVector::new([0.9, 0.8, 5.0, 100.0, 1.0, 0.7]))
            .expect("should scan");

        assert_eq!(result.action, Action::Alert);
        assert_eq!(result.probability, 82.0);
        let seen = model.seen.lock().unwrap();
        assert_eq!(seen[0].len(), 1);
        assert_eq!(seen[0].rows()[0].as_slice(), &[0.9, 0.8, 5.0, 100.0, 1.0, 0.7]);
    }

    #[test]
    fn table_scan_reports_row_count_and_first_verdict() {
        let scanner = Scanner::new(FixedModel::new(&[0.2, 0.9, 0.9]));
        let csv = format!("{HEADER}\n0.1,0.0,1,2,0,0.0\n0.9,0.8,5,100,1,0.7\n0.9,0.8,5,100,1,0.7\n");
        let table = CsvTable::from_bytes(csv.as_bytes()).expect("valid csv");

        let summary = scanner.scan_table(&table).expect("should scan");
        assert_eq!(
            summary,
            ScanSummary {
                rows: 3,
                first_action: Action::Ok,
                first_prob: 20.0,
            }
        );
    }

    #[test]
    fn table_scan_rejects_header_only_input() {
        let model = FixedModel::new(&[0.9]);
        let scanner = Scanner::new(model.clone());
        let table = CsvTable::from_bytes(format!("{HEADER}\n").as_bytes()).expect("valid csv");

        let err = scanner.scan_table(&table).unwrap_err();
        assert!(matches!(err, HunterError::Validation(msg) if msg == "CSV contains no data rows"));
        assert!(model.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn table_scan_rejects_missing_columns_before_scoring() {
        let model = FixedModel::new(&[0.9]);
        let scanner = Scanner::new(model.clone());
        let table = CsvTable::from_bytes(b"file_ops_rate,entropy_change\n0.1,0.2\n").expect("valid csv");

        let err = scanner.scan_table(&table).unwrap_err();
        assert!(matches!(err, HunterError::Validation(msg) if msg.contains("network_conn_count")));
        assert!(model.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn out_of_range_probability_is_a_model_error() {
        let scanner = Scanner::new(FixedModel::new(&[1.7]));
        let err = scanner
            .scan_manual(FeatureVector::new([0.0; 6]))
            .unwrap_err();
        assert!(matches!(err, HunterError::Model(_)));
    }
}
