// Core structs: Observation, PriceLevels, Phase, AnalysisResult, error kinds
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// One intraday OHLCV sample. Fields are read-only after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    timestamp: NaiveDateTime,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

impl Observation {
    pub fn new(
        timestamp: NaiveDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn open(&self) -> f64 {
        self.open
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn close(&self) -> f64 {
        self.close
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }
}

/// Fibonacci retracement prices between the period low (0%) and high (100%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceLevels {
    pub level_23_6: f64,
    pub level_38_2: f64,
    pub level_50_0: f64,
    pub level_61_8: f64,
}

impl PriceLevels {
    /// Levels in ratio order: 23.6%, 38.2%, 50%, 61.8%.
    pub fn as_array(&self) -> [f64; 4] {
        [self.level_23_6, self.level_38_2, self.level_50_0, self.level_61_8]
    }
}

/// Wyckoff volume phase, decided by the first qualifying close/volume transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Accumulation,
    Distribution,
    PossibleWeakness,
    PossibleStrength,
    NoClearPhase,
}

impl Phase {
    pub fn description(&self) -> &'static str {
        match self {
            Phase::Accumulation => "Accumulation Phase Detected (Price up with high volume)",
            Phase::Distribution => "Distribution Phase Detected (Price down with high volume)",
            Phase::PossibleWeakness => "Possible Weakness (Price up with low volume)",
            Phase::PossibleStrength => "Possible Strength (Price down with low volume)",
            Phase::NoClearPhase => "No clear phase detected.",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Everything derived from one series in one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub symbol: String,
    pub as_of: NaiveDateTime,
    pub current_price: f64,
    pub last_close: f64,
    pub price_change: f64,
    pub price_change_percent: f64,
    pub last_volume: f64,
    pub high: f64,
    pub low: f64,
    pub buy_limit: f64,
    pub stop_limit: f64,
    pub rsi: f64,
    pub fibonacci: PriceLevels,
    pub phase: Phase,
}

#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub symbol: String,
    pub interval: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("time series contains no observations")]
    EmptySeries,
    #[error("invalid range: {0}")]
    InvalidRange(String),
    #[error("duplicate observation at {0}")]
    DuplicateTimestamp(NaiveDateTime),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    #[error("quote provider unavailable: {0}")]
    Unavailable(String),
    #[error("no data for symbol {0}")]
    NoDataForSymbol(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Failure of one symbol's fetch-and-analyze pipeline.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}
