#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;

use stratscan::domain::error::StratscanError;
pub use stratscan::domain::ohlcv::OhlcvBar;
use stratscan::ports::data_port::DataPort;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<OhlcvBar>, StratscanError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(StratscanError::Data {
                reason: reason.clone(),
            });
        }
        let mut bars = self.data.get(symbol).cloned().unwrap_or_default();
        bars.retain(|b| {
            start_date.is_none_or(|s| b.date >= s) && end_date.is_none_or(|e| b.date <= e)
        });
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, StratscanError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }

    fn data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, StratscanError> {
        match self.data.get(symbol) {
            Some(bars) if !bars.is_empty() => {
                let min = bars.iter().map(|b| b.date).min().unwrap();
                let max = bars.iter().map(|b| b.date).max().unwrap();
                Ok(Some((min, max, bars.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bar(symbol: &str, date_str: &str, close: f64) -> OhlcvBar {
    OhlcvBar {
        symbol: symbol.to_string(),
        date: NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        volume: 1000,
    }
}

/// Daily bars starting at `start_date`, one per `prices` entry.
pub fn bars_from_closes(symbol: &str, start_date: &str, prices: &[f64]) -> Vec<OhlcvBar> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    prices
        .iter()
        .enumerate()
        .map(|(i, &close)| OhlcvBar {
            symbol: symbol.to_string(),
            date: start + chrono::Duration::days(i as i64),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000,
        })
        .collect()
}

/// A price path that dips, rallies well past the start, then fades: enough
/// movement to trip crossover and RSI strategies with small periods.
pub fn dip_and_rally(length: usize) -> Vec<f64> {
    let drop = length / 3;
    let rise = length / 3;
    let mut prices = Vec::with_capacity(length);
    let mut price = 100.0;
    for _ in 0..drop {
        price -= 1.5;
        prices.push(price);
    }
    for _ in 0..rise {
        price += 3.0;
        prices.push(price);
    }
    while prices.len() < length {
        price -= 1.0;
        prices.push(price);
    }
    prices
}
