//! Feature extraction, scoring and verdicts for the hybrid malware detector.
//!
//! The service loads one [`HybridDetector`] at startup through
//! [`load_detector`] and shares it behind the [`ProbabilityModel`] trait.

pub mod features;
pub mod hybrid;
pub mod model;
pub mod scanner;
pub mod table;
pub mod verdict;

pub use features::{FeatureError, FeatureMatrix, FeatureVector, FEATURE_COLUMNS, FEATURE_COUNT};
pub use hybrid::{load_detector, HybridDetector};
pub use model::{Probabilities, ProbabilityModel};
pub use scanner::Scanner;
pub use table::CsvTable;
pub use verdict::{Action, ScanSummary, ScoreResult, ALERT_THRESHOLD};
