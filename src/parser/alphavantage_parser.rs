// Alpha Vantage TIME_SERIES_INTRADAY payload parsing
use crate::model::{Observation, ProviderError};
use crate::series::TimeSeries;
use crate::utils::parse_timestamp;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

pub trait Parser {
    fn parse(&self, body: &str, symbol: &str) -> Result<TimeSeries, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct IntradayResponse {
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
    #[serde(flatten)]
    sections: HashMap<String, Value>,
}

/// Alpha Vantage sends every number as a string.
#[derive(Debug, Deserialize)]
struct IntradayBar {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

/// Parses the payload for one interval, e.g. `5min` reads `"Time Series (5min)"`.
pub struct AlphaVantageParser {
    interval: String,
}

impl AlphaVantageParser {
    pub fn new(interval: impl Into<String>) -> Self {
        Self {
            interval: interval.into(),
        }
    }

    fn series_key(&self) -> String {
        format!("Time Series ({})", self.interval)
    }
}

impl Parser for AlphaVantageParser {
    fn parse(&self, body: &str, symbol: &str) -> Result<TimeSeries, ProviderError> {
        let response: IntradayResponse = serde_json::from_str(body)
            .map_err(|e| ProviderError::Unavailable(format!("malformed response: {e}")))?;

        if let Some(throttled) = response.note.or(response.information) {
            return Err(ProviderError::Unavailable(throttled));
        }
        if let Some(message) = response.error_message {
            warn!("Alpha Vantage rejected {}: {}", symbol, message);
            return Err(ProviderError::NoDataForSymbol(symbol.to_string()));
        }

        let Some(raw_series) = response.sections.get(&self.series_key()) else {
            return Err(ProviderError::NoDataForSymbol(symbol.to_string()));
        };
        let bars: HashMap<String, IntradayBar> = serde_json::from_value(raw_series.clone())
            .map_err(|e| ProviderError::Unavailable(format!("malformed time series: {e}")))?;

        let mut series = TimeSeries::new(symbol);
        for (stamp, bar) in &bars {
            let observation = to_observation(stamp, bar)?;
            series
                .insert(observation)
                .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
        }

        if series.is_empty() {
            return Err(ProviderError::NoDataForSymbol(symbol.to_string()));
        }
        Ok(series)
    }
}

fn to_observation(stamp: &str, bar: &IntradayBar) -> Result<Observation, ProviderError> {
    let timestamp = parse_timestamp(stamp)
        .ok_or_else(|| ProviderError::Unavailable(format!("invalid timestamp: {stamp}")))?;
    Ok(Observation::new(
        timestamp,
        parse_number("open", &bar.open)?,
        parse_number("high", &bar.high)?,
        parse_number("low", &bar.low)?,
        parse_number("close", &bar.close)?,
        parse_number("volume", &bar.volume)?,
    ))
}

fn parse_number(field: &str, raw: &str) -> Result<f64, ProviderError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ProviderError::Unavailable(format!("invalid {field}: {raw:?}")))
}
