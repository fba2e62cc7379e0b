use serde::{Deserialize, Serialize};

/// Calibration for the fallback heuristics used when an RFP leaves an axis unanchored.
///
/// The defaults are fixed calibration points rather than derived values: a nominal
/// reference price of 100,000, two points lost per delivery day, and five points per
/// warranty month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub reference_price: f64,
    pub delivery_decay_per_day: f64,
    pub warranty_points_per_month: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            reference_price: 100_000.0,
            delivery_decay_per_day: 2.0,
            warranty_points_per_month: 5.0,
        }
    }
}
