use hunter_detector::{FeatureError, FeatureVector};
use serde::Deserialize;

/// Manual form: `f1..f6` map positionally onto the feature columns.
/// Fields default to empty so a missing field is reported by name.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ManualScanRequest {
    pub f1: String,
    pub f2: String,
    pub f3: String,
    pub f4: String,
    pub f5: String,
    pub f6: String,
}

impl ManualScanRequest {
    pub fn to_vector(&self) -> Result<FeatureVector, FeatureError> {
        FeatureVector::parse_fields([
            ("f1", self.f1.as_str()),
            ("f2", self.f2.as_str()),
            ("f3", self.f3.as_str()),
            ("f4", self.f4.as_str()),
            ("f5", self.f5.as_str()),
            ("f6", self.f6.as_str()),
        ])
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UrlScanRequest {
    pub url: String,
}
