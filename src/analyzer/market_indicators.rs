use crate::series::TimeSeries;
use serde::Deserialize;

pub const NEUTRAL_RSI: f64 = 50.0;
pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Source of the RSI figure reported with an analysis.
pub trait RsiProvider: Send + Sync {
    fn rsi(&self, series: &TimeSeries) -> f64;
}

/// Any `Fn() -> f64` closure can stand in as a provider.
impl<F> RsiProvider for F
where
    F: Fn() -> f64 + Send + Sync,
{
    fn rsi(&self, _series: &TimeSeries) -> f64 {
        self()
    }
}

/// Reports the same value for every series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRsi(pub f64);

impl Default for FixedRsi {
    fn default() -> Self {
        Self(NEUTRAL_RSI)
    }
}

impl RsiProvider for FixedRsi {
    fn rsi(&self, _series: &TimeSeries) -> f64 {
        self.0
    }
}

/// Wilder-smoothed RSI over the series closes in time order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WilderRsi {
    pub period: usize,
}

impl Default for WilderRsi {
    fn default() -> Self {
        Self {
            period: DEFAULT_RSI_PERIOD,
        }
    }
}

impl RsiProvider for WilderRsi {
    fn rsi(&self, series: &TimeSeries) -> f64 {
        compute_rsi(&series.closes(), self.period).unwrap_or(NEUTRAL_RSI)
    }
}

/// Latest RSI for `closes` (oldest first), or `None` without `period + 1` closes.
pub fn compute_rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let period_f = period as f64;

    let (gains, losses) = deltas[..period].iter().fold((0.0, 0.0), |(g, l), &d| {
        if d > 0.0 { (g + d, l) } else { (g, l - d) }
    });
    let mut avg_gain = gains / period_f;
    let mut avg_loss = losses / period_f;

    for &delta in &deltas[period..] {
        let gain = delta.max(0.0);
        let loss = (-delta).max(0.0);
        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;
    }

    let rsi = if avg_gain + avg_loss == 0.0 {
        NEUTRAL_RSI
    } else if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    };

    rsi.is_finite().then_some(rsi)
}

/// RSI strategy as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RsiSettings {
    Fixed {
        #[serde(default = "neutral_rsi")]
        value: f64,
    },
    Wilder {
        #[serde(default = "default_period")]
        period: usize,
    },
}

fn neutral_rsi() -> f64 {
    NEUTRAL_RSI
}

fn default_period() -> usize {
    DEFAULT_RSI_PERIOD
}

impl Default for RsiSettings {
    fn default() -> Self {
        RsiSettings::Fixed { value: NEUTRAL_RSI }
    }
}

impl RsiSettings {
    pub fn build(&self) -> Box<dyn RsiProvider> {
        match *self {
            RsiSettings::Fixed { value } => Box::new(FixedRsi(value)),
            RsiSettings::Wilder { period } => Box::new(WilderRsi { period }),
        }
    }
}
