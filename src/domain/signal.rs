//! Buy/sell signals and the scan position state.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    Buy,
    Sell,
}

/// One emitted trading signal: the kind, the date of the triggering bar,
/// and that bar's close as reference price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signal {
    pub kind: SignalKind,
    pub date: NaiveDate,
    pub price: f64,
}

/// Position state threaded through the scan. One open position at a time;
/// no pyramiding, no shorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionState {
    Flat,
    Long,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            SignalKind::Buy => "BUY",
            SignalKind::Sell => "SELL",
        })
    }
}
