//! Trade records produced by the simulator boundary.

use chrono::NaiveDate;
use serde::Serialize;

/// A position the simulator is still holding at end-of-data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenPosition {
    pub quantity: i64,
    pub entry_price: f64,
    pub entry_date: NaiveDate,
}

impl OpenPosition {
    pub fn market_value(&self, price: f64) -> f64 {
        self.quantity as f64 * price
    }

    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        self.quantity as f64 * (price - self.entry_price)
    }
}

/// One completed round trip. `pnl` is realized profit net of commissions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosedTrade {
    pub quantity: i64,
    pub entry_date: NaiveDate,
    pub entry_price: f64,
    pub exit_date: NaiveDate,
    pub exit_price: f64,
    pub pnl: f64,
}

/// Mark-to-market account value at one bar close.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

/// Everything a simulator reports back for one backtest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationOutcome {
    pub closed_trades: Vec<ClosedTrade>,
    pub equity_curve: Vec<EquityPoint>,
    pub open_position: Option<OpenPosition>,
    pub final_equity: f64,
}
