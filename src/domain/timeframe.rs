//! Bar timeframe selection and resampling.

use chrono::Datelike;

use super::error::StratscanError;
use super::ohlcv::OhlcvBar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Daily,
    Weekly,
    Monthly,
}

impl Timeframe {
    /// Resolve a request key (`1d`, `1wk`, `1mo`).
    pub fn from_key(key: &str) -> Result<Self, StratscanError> {
        match key {
            "1d" => Ok(Timeframe::Daily),
            "1wk" => Ok(Timeframe::Weekly),
            "1mo" => Ok(Timeframe::Monthly),
            _ => Err(StratscanError::UnknownTimeframe { key: key.into() }),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Timeframe::Daily => "1d",
            Timeframe::Weekly => "1wk",
            Timeframe::Monthly => "1mo",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Timeframe::Daily => "Daily",
            Timeframe::Weekly => "Weekly",
            Timeframe::Monthly => "Monthly",
        }
    }

    fn bucket(&self, bar: &OhlcvBar) -> (i32, u32) {
        match self {
            // Daily never aggregates; give every bar its own bucket.
            Timeframe::Daily => (bar.date.year(), bar.date.ordinal()),
            Timeframe::Weekly => {
                let iso = bar.date.iso_week();
                (iso.year(), iso.week())
            }
            Timeframe::Monthly => (bar.date.year(), bar.date.month()),
        }
    }
}

/// Aggregate an ordered daily series into the requested timeframe.
///
/// Each bucket takes the first open, max high, min low, last close, summed
/// volume, and the date of its last contained bar. Input order is preserved,
/// so the output is ordered whenever the input is.
pub fn resample(bars: &[OhlcvBar], timeframe: Timeframe) -> Vec<OhlcvBar> {
    if timeframe == Timeframe::Daily {
        return bars.to_vec();
    }

    let mut out: Vec<OhlcvBar> = Vec::new();
    let mut current: Option<((i32, u32), OhlcvBar)> = None;

    for bar in bars {
        let key = timeframe.bucket(bar);
        match &mut current {
            Some((open_key, agg)) if *open_key == key => {
                agg.high = agg.high.max(bar.high);
                agg.low = agg.low.min(bar.low);
                agg.close = bar.close;
                agg.date = bar.date;
                agg.volume += bar.volume;
            }
            _ => {
                if let Some((_, done)) = current.take() {
                    out.push(done);
                }
                current = Some((key, bar.clone()));
            }
        }
    }

    if let Some((_, done)) = current {
        out.push(done);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar(y: i32, m: u32, d: u32, open: f64, high: f64, low: f64, close: f64) -> OhlcvBar {
        OhlcvBar {
            symbol: "TEST".into(),
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            open,
            high,
            low,
            close,
            volume: 100,
        }
    }

    #[test]
    fn from_key_resolves() {
        assert_eq!(Timeframe::from_key("1d").unwrap(), Timeframe::Daily);
        assert_eq!(Timeframe::from_key("1wk").unwrap(), Timeframe::Weekly);
        assert_eq!(Timeframe::from_key("1mo").unwrap(), Timeframe::Monthly);
        assert!(Timeframe::from_key("4h").is_err());
    }

    #[test]
    fn daily_is_identity() {
        let bars = vec![
            bar(2024, 1, 1, 10.0, 11.0, 9.0, 10.5),
            bar(2024, 1, 2, 10.5, 12.0, 10.0, 11.0),
        ];
        assert_eq!(resample(&bars, Timeframe::Daily), bars);
    }

    #[test]
    fn weekly_aggregates_one_week() {
        // Mon 2024-01-01 .. Fri 2024-01-05 fall in the same ISO week.
        let bars = vec![
            bar(2024, 1, 1, 10.0, 11.0, 9.5, 10.5),
            bar(2024, 1, 2, 10.5, 12.0, 10.0, 11.5),
            bar(2024, 1, 3, 11.5, 11.8, 9.0, 9.5),
            bar(2024, 1, 4, 9.5, 10.0, 9.2, 9.8),
            bar(2024, 1, 5, 9.8, 10.5, 9.5, 10.2),
        ];
        let weekly = resample(&bars, Timeframe::Weekly);
        assert_eq!(weekly.len(), 1);

        let w = &weekly[0];
        assert_eq!(w.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(w.open, 10.0);
        assert_eq!(w.high, 12.0);
        assert_eq!(w.low, 9.0);
        assert_eq!(w.close, 10.2);
        assert_eq!(w.volume, 500);
    }

    #[test]
    fn weekly_splits_at_week_boundary() {
        // Fri 2024-01-05 and Mon 2024-01-08 are different ISO weeks.
        let bars = vec![
            bar(2024, 1, 5, 10.0, 11.0, 9.5, 10.5),
            bar(2024, 1, 8, 10.5, 12.0, 10.0, 11.5),
        ];
        let weekly = resample(&bars, Timeframe::Weekly);
        assert_eq!(weekly.len(), 2);
        assert_eq!(weekly[0].close, 10.5);
        assert_eq!(weekly[1].open, 10.5);
    }

    #[test]
    fn monthly_aggregates_by_calendar_month() {
        let bars = vec![
            bar(2024, 1, 30, 10.0, 11.0, 9.5, 10.5),
            bar(2024, 1, 31, 10.5, 12.0, 10.0, 11.5),
            bar(2024, 2, 1, 11.5, 13.0, 11.0, 12.5),
        ];
        let monthly = resample(&bars, Timeframe::Monthly);
        assert_eq!(monthly.len(), 2);

        assert_eq!(monthly[0].date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(monthly[0].open, 10.0);
        assert_eq!(monthly[0].high, 12.0);
        assert_eq!(monthly[0].close, 11.5);
        assert_eq!(monthly[0].volume, 200);

        assert_eq!(monthly[1].date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }

    #[test]
    fn resample_empty() {
        assert!(resample(&[], Timeframe::Weekly).is_empty());
    }
}
