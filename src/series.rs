use crate::model::{AnalysisError, Observation};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Intraday observations for one symbol, keyed by timestamp.
///
/// Order-sensitive consumers must go through [`TimeSeries::ordered_ascending`];
/// the key order of the map is the only chronological guarantee.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    symbol: String,
    observations: BTreeMap<NaiveDateTime, Observation>,
}

impl TimeSeries {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            observations: BTreeMap::new(),
        }
    }

    pub fn from_observations<I>(symbol: impl Into<String>, observations: I) -> Result<Self, AnalysisError>
    where
        I: IntoIterator<Item = Observation>,
    {
        let mut series = Self::new(symbol);
        for observation in observations {
            series.insert(observation)?;
        }
        Ok(series)
    }

    /// Adds an observation. Timestamps are unique; a repeat is rejected.
    pub fn insert(&mut self, observation: Observation) -> Result<(), AnalysisError> {
        match self.observations.entry(observation.timestamp()) {
            Entry::Occupied(_) => Err(AnalysisError::DuplicateTimestamp(observation.timestamp())),
            Entry::Vacant(slot) => {
                slot.insert(observation);
                Ok(())
            }
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// The observation with the greatest timestamp.
    pub fn latest(&self) -> Result<&Observation, AnalysisError> {
        self.observations
            .last_key_value()
            .map(|(_, o)| o)
            .ok_or(AnalysisError::EmptySeries)
    }

    /// Highest `high` in the series. Seeded from negative infinity so that
    /// no assumption about positive prices is needed.
    pub fn high_of_period(&self) -> Result<f64, AnalysisError> {
        if self.is_empty() {
            return Err(AnalysisError::EmptySeries);
        }
        Ok(self
            .observations
            .values()
            .map(Observation::high)
            .fold(f64::NEG_INFINITY, f64::max))
    }

    /// Lowest `low` in the series.
    pub fn low_of_period(&self) -> Result<f64, AnalysisError> {
        if self.is_empty() {
            return Err(AnalysisError::EmptySeries);
        }
        Ok(self
            .observations
            .values()
            .map(Observation::low)
            .fold(f64::INFINITY, f64::min))
    }

    /// Observations sorted by timestamp, oldest first. The iterator is lazy
    /// and can be cloned to restart the walk.
    pub fn ordered_ascending(&self) -> impl Iterator<Item = &Observation> + Clone + '_ {
        self.observations.values()
    }

    /// Close prices, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        self.ordered_ascending().map(Observation::close).collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;

    pub(crate) fn at(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, 11)
            .and_then(|d| d.and_hms_opt(9, 30 + minute, 0))
            .unwrap()
    }

    pub(crate) fn bar(minute: u32, high: f64, low: f64, close: f64, volume: f64) -> Observation {
        Observation::new(at(minute), close, high, low, close, volume)
    }

    /// Builds a series from (close, volume) pairs at consecutive minutes.
    pub(crate) fn series_from(points: &[(f64, f64)]) -> TimeSeries {
        TimeSeries::from_observations(
            "TEST",
            points
                .iter()
                .enumerate()
                .map(|(i, &(close, volume))| bar(i as u32, close + 1.0, close - 1.0, close, volume)),
        )
        .unwrap()
    }

    #[test]
    fn empty_series_reports_empty_on_every_lookup() {
        let series = TimeSeries::new("DJT");
        assert_eq!(series.latest().unwrap_err(), AnalysisError::EmptySeries);
        assert_eq!(series.high_of_period().unwrap_err(), AnalysisError::EmptySeries);
        assert_eq!(series.low_of_period().unwrap_err(), AnalysisError::EmptySeries);
        assert_eq!(series.ordered_ascending().count(), 0);
    }

    #[test]
    fn latest_is_max_timestamp_not_insertion_order() {
        let mut series = TimeSeries::new("DJT");
        series.insert(bar(5, 11.0, 9.0, 10.0, 100.0)).unwrap();
        series.insert(bar(9, 13.0, 11.0, 12.0, 300.0)).unwrap();
        series.insert(bar(1, 9.0, 7.0, 8.0, 200.0)).unwrap();

        let latest = series.latest().unwrap();
        assert_eq!(latest.timestamp(), at(9));
        assert_eq!(latest.close(), 12.0);
    }

    #[test]
    fn duplicate_timestamp_is_rejected() {
        let mut series = TimeSeries::new("DJT");
        series.insert(bar(0, 11.0, 9.0, 10.0, 100.0)).unwrap();
        let err = series.insert(bar(0, 12.0, 8.0, 11.0, 50.0)).unwrap_err();
        assert_eq!(err, AnalysisError::DuplicateTimestamp(at(0)));
        assert_eq!(series.len(), 1);
        assert_eq!(series.latest().unwrap().close(), 10.0);
    }

    #[test]
    fn high_and_low_bound_every_observation() {
        let series = TimeSeries::from_observations(
            "DJT",
            vec![
                bar(3, 31.2, 29.8, 30.1, 10.0),
                bar(0, 32.5, 30.0, 31.0, 10.0),
                bar(2, 30.9, 28.4, 29.0, 10.0),
                bar(1, 31.7, 30.6, 31.5, 10.0),
            ],
        )
        .unwrap();

        let high = series.high_of_period().unwrap();
        let low = series.low_of_period().unwrap();
        assert_eq!(high, 32.5);
        assert_eq!(low, 28.4);
        for o in series.ordered_ascending() {
            assert!(high >= o.high());
            assert!(low <= o.low());
        }
    }

    #[test]
    fn high_is_not_masked_by_a_zero_seed() {
        let series = TimeSeries::from_observations(
            "BAD",
            vec![bar(0, -2.0, -5.0, -3.0, 1.0), bar(1, -1.5, -4.0, -2.0, 1.0)],
        )
        .unwrap();
        assert_eq!(series.high_of_period().unwrap(), -1.5);
        assert_eq!(series.low_of_period().unwrap(), -5.0);
    }

    #[test]
    fn ordered_ascending_sorts_and_restarts() {
        let series = TimeSeries::from_observations(
            "DJT",
            vec![bar(2, 1.0, 1.0, 3.0, 1.0), bar(0, 1.0, 1.0, 1.0, 1.0), bar(1, 1.0, 1.0, 2.0, 1.0)],
        )
        .unwrap();

        let walk = series.ordered_ascending();
        let first: Vec<f64> = walk.clone().map(Observation::close).collect();
        let second: Vec<f64> = walk.map(Observation::close).collect();
        assert_eq!(first, vec![1.0, 2.0, 3.0]);
        assert_eq!(first, second);
        assert_eq!(series.closes(), vec![1.0, 2.0, 3.0]);
    }
}
