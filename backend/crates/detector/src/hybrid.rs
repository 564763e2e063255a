//! The persisted hybrid detector: two logistic components over standardized
//! features, blended into one fused probability.

use std::path::Path;

use hunter_common::error::{HunterError, HunterResult};
use serde::Deserialize;

use crate::features::{FeatureMatrix, FeatureVector, FEATURE_COLUMNS, FEATURE_COUNT};
use crate::model::{Probabilities, ProbabilityModel};

#[derive(Debug, Clone, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogisticComponent {
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl LogisticComponent {
    fn probability(&self, z: &[f64; FEATURE_COUNT]) -> f64 {
        let logit: f64 = self
            .weights
            .iter()
            .zip(z)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.bias;
        sigmoid(logit)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HybridDetector {
    pub feature_names: Vec<String>,
    pub scaler: Scaler,
    pub primary: LogisticComponent,
    pub secondary: LogisticComponent,
    /// Share of the primary component in the fused probability.
    pub fusion_weight: f64,
}

/// Load the detector artifact at `path`. This is the only way the service
/// obtains a model; it runs once before the listener is bound.
pub fn load_detector(path: impl AsRef<Path>) -> HunterResult<HybridDetector> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .map_err(|e| HunterError::Model(format!("cannot read {}: {e}", path.display())))?;
    let detector = HybridDetector::from_json(&raw)?;
    tracing::info!(path = %path.display(), fusion_weight = detector.fusion_weight, "detector loaded");
    Ok(detector)
}

impl HybridDetector {
    pub fn from_json(raw: &str) -> HunterResult<Self> {
        let detector: Self = serde_json::from_str(raw)
            .map_err(|e| HunterError::Model(format!("malformed artifact: {e}")))?;
        detector.validate()?;
        Ok(detector)
    }

    fn validate(&self) -> HunterResult<()> {
        if self.feature_names != FEATURE_COLUMNS {
            return Err(HunterError::Model(format!(
                "feature_names must be {FEATURE_COLUMNS:?}, got {:?}",
                self.feature_names
            )));
        }

        let vectors = [
            ("scaler.mean", &self.scaler.mean),
            ("scaler.scale", &self.scaler.scale),
            ("primary.weights", &self.primary.weights),
            ("secondary.weights", &self.secondary.weights),
        ];
        for (label, values) in vectors {
            if values.len() != FEATURE_COUNT {
                return Err(HunterError::Model(format!(
                    "{label} has {} entries, expected {FEATURE_COUNT}",
                    values.len()
                )));
            }
            if values.iter().any(|v| !v.is_finite()) {
                return Err(HunterError::Model(format!("{label} contains a non-finite value")));
            }
        }

        if self.scaler.scale.iter().any(|s| *s == 0.0) {
            return Err(HunterError::Model("scaler.scale contains zero".to_string()));
        }
        if !self.primary.bias.is_finite() || !self.secondary.bias.is_finite() {
            return Err(HunterError::Model("component bias is not finite".to_string()));
        }
        if !(0.0..=1.0).contains(&self.fusion_weight) {
            return Err(HunterError::Model(format!(
                "fusion_weight must be within [0, 1], got {}",
                self.fusion_weight
            )));
        }

        Ok(())
    }

    fn standardize(&self, row: &FeatureVector) -> [f64; FEATURE_COUNT] {
        let mut z = [0.0; FEATURE_COUNT];
        for (i, x) in row.as_slice().iter().enumerate() {
            z[i] = (x - self.scaler.mean[i]) / self.scaler.scale[i];
        }
        z
    }
}

impl ProbabilityModel for HybridDetector {
    fn name(&self) -> &str {
        "hybrid"
    }

    fn predict_proba(&self, matrix: &FeatureMatrix) -> HunterResult<Probabilities> {
        let mut out = Probabilities {
            fused: Vec::with_capacity(matrix.len()),
            primary: Vec::with_capacity(matrix.len()),
            secondary: Vec::with_capacity(matrix.len()),
        };

        for row in matrix.rows() {
            let z = self.standardize(row);
            let p_primary = self.primary.probability(&z);
            let p_secondary = self.secondary.probability(&z);
            out.fused
                .push(self.fusion_weight * p_primary + (1.0 - self.fusion_weight) * p_secondary);
            out.primary.push(p_primary);
            out.secondary.push(p_secondary);
        }

        Ok(out)
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(fusion_weight: f64) -> serde_json::Value {
        serde_json::json!({
            "feature_names": FEATURE_COLUMNS,
            "scaler": { "mean": vec![0.0; 6], "scale": vec![1.0; 6] },
            "primary": { "weights": [1.0, 0.0, 0.0, 0.0, 0.0, 0.0], "bias": 0.0 },
            "secondary": { "weights": vec![0.0; 6], "bias": 0.0 },
            "fusion_weight": fusion_weight
        })
    }

    fn detector(fusion_weight: f64) -> HybridDetector {
        HybridDetector::from_json(&artifact(fusion_weight).to_string()).expect("valid artifact")
    }

    #[test]
    fn fuses_components_by_weight() {
        let d = detector(0.5);
        let matrix = FeatureMatrix::from_rows(vec![
            FeatureVector::new([0.0; 6]),
            FeatureVector::new([100.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        ]);

        let probs = d.predict_proba(&matrix).expect("should score");
        assert_eq!(probs.fused.len(), 2);
        assert!((probs.primary[0] - 0.5).abs() < 1e-12);
        assert!((probs.secondary[0] - 0.5).abs() < 1e-12);
        assert!((probs.fused[0] - 0.5).abs() < 1e-12);
        // primary saturates, secondary stays at 0.5
        assert!((probs.fused[1] - 0.75).abs() < 1e-9);
    }

    #[test]
    fn standardizes_before_scoring() {
        let mut raw = artifact(1.0);
        raw["scaler"]["mean"] = serde_json::json!([2.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        raw["scaler"]["scale"] = serde_json::json!([4.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
        let d = HybridDetector::from_json(&raw.to_string()).expect("valid artifact");

        let matrix = FeatureMatrix::from_vector(FeatureVector::new([2.0, 9.0, 9.0, 9.0, 9.0, 9.0]));
        let probs = d.predict_proba(&matrix).expect("should score");
        assert!((probs.fused[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn rejects_wrong_feature_names() {
        let mut raw = artifact(0.5);
        raw["feature_names"] = serde_json::json!(["a", "b", "c", "d", "e", "f"]);
        let err = HybridDetector::from_json(&raw.to_string()).unwrap_err();
        assert!(matches!(err, HunterError::Model(_)));
    }

    #[test]
    fn rejects_short_weight_vector() {
        let mut raw = artifact(0.5);
        raw["primary"]["weights"] = serde_json::json!([1.0, 2.0]);
        let err = HybridDetector::from_json(&raw.to_string()).unwrap_err();
        assert!(err.to_string().contains("primary.weights has 2 entries"));
    }

    #[test]
    fn rejects_zero_scale_and_bad_fusion_weight() {
        let mut raw = artifact(0.5);
        raw["scaler"]["scale"] = serde_json::json!([1.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
        assert!(HybridDetector::from_json(&raw.to_string()).is_err());

        assert!(HybridDetector::from_json(&artifact(1.5).to_string()).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        let err = HybridDetector::from_json("{ not json").unwrap_err();
        assert!(matches!(err, HunterError::Model(msg) if msg.starts_with("malformed artifact")));
    }

    #[test]
    fn load_detector_reports_missing_file() {
        let err = load_detector("/nonexistent/hunter/detector.json").unwrap_err();
        assert!(matches!(err, HunterError::Model(msg) if msg.contains("cannot read")));
    }

    #[test]
    fn bundled_artifact_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../../models/detector.json");
        let d = load_detector(path).expect("bundled artifact should load");
        let probs = d
            .predict_proba(&FeatureMatrix::from_vector(FeatureVector::new([
                0.9, 0.8, 5.0, 100.0, 1.0, 0.7,
            ])))
            .expect("should score");
        assert!((0.0..=1.0).contains(&probs.fused[0]));
    }
}
