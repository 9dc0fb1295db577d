use crate::analyzer::levels::LevelCalculator;
use crate::analyzer::market_indicators::RsiProvider;
use crate::analyzer::phase::PhaseClassifier;
use crate::model::{AnalysisError, AnalysisResult};
use crate::series::TimeSeries;
use tracing::debug;

/// Trait defining the interface for a series analyzer.
pub trait Analyzer {
    fn analyze(&self, series: &TimeSeries, rsi: &dyn RsiProvider) -> Result<AnalysisResult, AnalysisError>;
}

/// Combines the level calculator, phase classifier and an injected RSI
/// source into one result. Holds no state between runs.
pub struct IndicatorEngine;

impl IndicatorEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for IndicatorEngine {
    fn analyze(&self, series: &TimeSeries, rsi: &dyn RsiProvider) -> Result<AnalysisResult, AnalysisError> {
        let latest = series.latest()?;
        let high = series.high_of_period()?;
        let low = series.low_of_period()?;

        let last_close = latest.close();
        let current_price = last_close;
        let buy_limit = LevelCalculator::buy_limit(last_close);
        let stop_limit = LevelCalculator::stop_limit(last_close);
        let fibonacci = LevelCalculator::fibonacci_levels(high, low)?;

        if buy_limit == 0.0 {
            return Err(AnalysisError::InvalidRange(
                "buy limit is zero, price change percent is undefined".into(),
            ));
        }
        let price_change = current_price - buy_limit;
        let price_change_percent = price_change / buy_limit * 100.0;

        let phase = PhaseClassifier::classify(series);
        let rsi = rsi.rsi(series);

        debug!(
            "{}: {} observations, close {:.2}, range {:.2}-{:.2}, phase {:?}",
            series.symbol(),
            series.len(),
            last_close,
            low,
            high,
            phase
        );

        Ok(AnalysisResult {
            symbol: series.symbol().to_string(),
            as_of: latest.timestamp(),
            current_price,
            last_close,
            price_change,
            price_change_percent,
            last_volume: latest.volume(),
            high,
            low,
            buy_limit,
            stop_limit,
            rsi,
            fibonacci,
            phase,
        })
    }
}
