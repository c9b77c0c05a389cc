//! Forecast series shapes shared by the weather binder and the provider
//! client. Mirrors the provider's daily block: parallel arrays, one entry
//! per date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A multi-day daily forecast for one location.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ForecastSeries {
    #[serde(default)]
    pub dates: Vec<NaiveDate>,
    #[serde(default)]
    pub daily_high: Vec<f64>,
    #[serde(default)]
    pub daily_low: Vec<f64>,
    #[serde(default)]
    pub feels_like_high: Vec<f64>,
    #[serde(default)]
    pub weather_code: Vec<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation_probability: Option<Vec<f64>>,
}

/// One day picked out of a [`ForecastSeries`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastEntry {
    pub date: NaiveDate,
    pub high: f64,
    pub low: f64,
    pub feels_like_high: f64,
    pub weather_code: u16,
    pub precipitation_probability: Option<f64>,
}

impl ForecastSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// True when every parallel array covers each date.
    pub fn is_consistent(&self) -> bool {
        let len = self.dates.len();
        self.daily_high.len() == len
            && self.daily_low.len() == len
            && self.feels_like_high.len() == len
            && self.weather_code.len() == len
            && self
                .precipitation_probability
                .as_ref()
                .map_or(true, |probs| probs.len() == len)
    }

    pub fn entry(&self, index: usize) -> Option<ForecastEntry> {
        if index >= self.len() || !self.is_consistent() {
            return None;
        }
        Some(ForecastEntry {
            date: self.dates[index],
            high: self.daily_high[index],
            low: self.daily_low[index],
            feels_like_high: self.feels_like_high[index],
            weather_code: self.weather_code[index],
            precipitation_probability: self
                .precipitation_probability
                .as_ref()
                .map(|probs| probs[index]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> ForecastSeries {
        ForecastSeries {
            dates: vec![
                NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            ],
            daily_high: vec![18.0, 21.5],
            daily_low: vec![9.0, 11.0],
            feels_like_high: vec![17.0, 20.0],
            weather_code: vec![0, 61],
            precipitation_probability: Some(vec![5.0, 80.0]),
        }
    }

    #[test]
    fn entry_reads_parallel_arrays() {
        let entry = series().entry(1).unwrap();
        assert_eq!(entry.weather_code, 61);
        assert_eq!(entry.precipitation_probability, Some(80.0));
    }

    #[test]
    fn ragged_series_yields_no_entries() {
        let mut ragged = series();
        ragged.daily_low.pop();
        assert!(!ragged.is_consistent());
        assert!(ragged.entry(0).is_none());
    }
}
