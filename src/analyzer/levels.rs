use crate::model::{AnalysisError, PriceLevels};

pub const BUY_LIMIT_RATIO: f64 = 0.95;
pub const STOP_LIMIT_RATIO: f64 = 0.90;
pub const FIBONACCI_RATIOS: [f64; 4] = [0.236, 0.382, 0.500, 0.618];

/// Support band and retracement levels derived from scalar prices.
pub struct LevelCalculator;

impl LevelCalculator {
    /// Recommended buy limit, 5% under the reference. Non-positive input is not rejected.
    pub fn buy_limit(reference_price: f64) -> f64 {
        reference_price * BUY_LIMIT_RATIO
    }

    /// Recommended stop limit, 10% under the reference.
    pub fn stop_limit(reference_price: f64) -> f64 {
        reference_price * STOP_LIMIT_RATIO
    }

    /// Retracements measured down from `high`. A flat range collapses every level onto `high`.
    pub fn fibonacci_levels(high: f64, low: f64) -> Result<PriceLevels, AnalysisError> {
        if high < low {
            return Err(AnalysisError::InvalidRange(format!(
                "high {high} is below low {low}"
            )));
        }
        let range = high - low;
        let [l1, l2, l3, l4] = FIBONACCI_RATIOS.map(|ratio| high - range * ratio);
        Ok(PriceLevels {
            level_23_6: l1,
            level_38_2: l2,
            level_50_0: l3,
            level_61_8: l4,
        })
    }
}
