//! Technical indicator series.
//!
//! Every indicator used by the scan produces one scalar point per bar
//! index. Points inside the warm-up window carry `valid: false` and must
//! never influence signal generation; [`IndicatorSeries::value_at`] returns
//! `None` for them so callers cannot read a warm-up value by accident.

pub mod sma;
pub mod ema;
pub mod rsi;

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Rsi(usize),
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value at `index`, or `None` when out of range or still warming up.
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.values
            .get(index)
            .filter(|p| p.valid)
            .map(|p| p.value)
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Ema(period) => write!(f, "EMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_type_display() {
        assert_eq!(IndicatorType::Sma(200).to_string(), "SMA(200)");
        assert_eq!(IndicatorType::Ema(9).to_string(), "EMA(9)");
        assert_eq!(IndicatorType::Rsi(14).to_string(), "RSI(14)");
    }

    #[test]
    fn value_at_hides_warmup() {
        let series = IndicatorSeries {
            indicator_type: IndicatorType::Sma(2),
            values: vec![
                IndicatorPoint {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    valid: false,
                    value: 0.0,
                },
                IndicatorPoint {
                    date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                    valid: true,
                    value: 101.5,
                },
            ],
        };

        assert_eq!(series.value_at(0), None);
        assert_eq!(series.value_at(1), Some(101.5));
        assert_eq!(series.value_at(2), None);
    }
}
