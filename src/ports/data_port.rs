//! Market-data access port.

use crate::domain::error::StratscanError;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;

/// Source of historical bars. Implementations must return the series
/// ordered by date ascending with no duplicate dates.
pub trait DataPort {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<OhlcvBar>, StratscanError>;

    fn list_symbols(&self) -> Result<Vec<String>, StratscanError>;

    /// (first date, last date, bar count) for a symbol, or `None` when no
    /// data exists.
    fn data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, StratscanError>;
}
