use serde::Serialize;

/// Fused probability at or above which a row is flagged.
pub const ALERT_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Alert,
    Ok,
}

impl Action {
    pub fn from_probability(fused: f64) -> Self {
        if fused >= ALERT_THRESHOLD {
            Action::Alert
        } else {
            Action::Ok
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Alert => "alert",
            Action::Ok => "ok",
        }
    }
}

/// Probability as a percentage rounded to two decimals.
///
/// Rounds the exact binary value of `fused * 100`, so a product sitting just
/// below a decimal tie rounds down rather than being pushed onto the tie by a
/// second scaling.
pub fn to_percent(fused: f64) -> f64 {
    let percent = fused * 100.0;
    format!("{percent:.2}").parse().unwrap_or(percent)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub action: Action,
    #[serde(rename = "prob")]
    pub probability: f64,
}

impl ScoreResult {
    pub fn from_probability(fused: f64) -> Self {
        Self {
            action: Action::from_probability(fused),
            probability: to_percent(fused),
        }
    }
}

/// Multi-row outcome: total row count plus the first row's verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanSummary {
    pub rows: usize,
    pub first_action: Action,
    pub first_prob: f64,
}

impl ScanSummary {
    pub fn new(rows: usize, first_fused: f64) -> Self {
        let first = ScoreResult::from_probability(first_fused);
        Self {
            rows,
            first_action: first.action,
            first_prob: first.probability,
        }
    }
}
