use hunter_common::error::HunterResult;

use crate::features::FeatureMatrix;

/// Per-row probabilities returned by a detector. All three vectors have
/// one entry per input row.
#[derive(Debug, Clone, PartialEq)]
pub struct Probabilities {
    pub fused: Vec<f64>,
    pub primary: Vec<f64>,
    pub secondary: Vec<f64>,
}

pub trait ProbabilityModel: Send + Sync {
    fn name(&self) -> &str;
    fn predict_proba(&self, matrix: &FeatureMatrix) -> HunterResult<Probabilities>;
}
