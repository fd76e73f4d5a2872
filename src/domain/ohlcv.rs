//! OHLCV bar representation.

use chrono::NaiveDate;

/// One OHLCV sample for a single symbol and sampling period.
///
/// A bar series is always ordered by date ascending with no duplicate
/// dates; [`validate_series`] enforces this at the data boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Check ordering and uniqueness of a bar series.
///
/// Returns the offending index on the first out-of-order or duplicate date.
pub fn validate_series(bars: &[OhlcvBar]) -> Result<(), usize> {
    for i in 1..bars.len() {
        if bars[i].date <= bars[i - 1].date {
            return Err(i);
        }
    }
    Ok(())
}
