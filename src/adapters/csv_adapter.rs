//! CSV file data adapter.
//!
//! Bars for a symbol live in `<base>/<SYMBOL>.csv` with a header row and
//! `date,open,high,low,close,volume` columns, date formatted `YYYY-MM-DD`.

use crate::domain::error::StratscanError;
use crate::domain::ohlcv::{validate_series, OhlcvBar};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn read_all(&self, symbol: &str) -> Result<Vec<OhlcvBar>, StratscanError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| StratscanError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| StratscanError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let field = |idx: usize, name: &str| {
                record
                    .get(idx)
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .ok_or_else(|| StratscanError::Data {
                        reason: format!("{}: row {}: missing {} column", path.display(), row + 2, name),
                    })
            };

            let date = NaiveDate::parse_from_str(field(0, "date")?, "%Y-%m-%d").map_err(|e| {
                StratscanError::Data {
                    reason: format!("{}: row {}: invalid date: {}", path.display(), row + 2, e),
                }
            })?;

            let numeric = |idx: usize, name: &str| -> Result<f64, StratscanError> {
                field(idx, name)?
                    .parse()
                    .map_err(|e| StratscanError::Data {
                        reason: format!(
                            "{}: row {}: invalid {} value: {}",
                            path.display(),
                            row + 2,
                            name,
                            e
                        ),
                    })
            };

            let open = numeric(1, "open")?;
            let high = numeric(2, "high")?;
            let low = numeric(3, "low")?;
            let close = numeric(4, "close")?;
            let volume: i64 = field(5, "volume")?
                .parse()
                .map_err(|e| StratscanError::Data {
                    reason: format!(
                        "{}: row {}: invalid volume value: {}",
                        path.display(),
                        row + 2,
                        e
                    ),
                })?;

            bars.push(OhlcvBar {
                symbol: symbol.to_string(),
                date,
                open,
                high,
                low,
                close,
                volume,
            });
        }

        bars.sort_by_key(|b| b.date);
        if let Err(index) = validate_series(&bars) {
            return Err(StratscanError::Data {
                reason: format!(
                    "{}: duplicate bar date {}",
                    path.display(),
                    bars[index].date
                ),
            });
        }

        Ok(bars)
    }
}

impl DataPort for CsvAdapter {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<OhlcvBar>, StratscanError> {
        let mut bars = self.read_all(symbol)?;
        bars.retain(|b| {
            start_date.is_none_or(|s| b.date >= s) && end_date.is_none_or(|e| b.date <= e)
        });
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, StratscanError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| StratscanError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StratscanError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, StratscanError> {
        if !self.csv_path(symbol).exists() {
            return Ok(None);
        }
        let bars = self.read_all(symbol)?;
        Ok(match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date, bars.len())),
            _ => None,
        })
    }
}
