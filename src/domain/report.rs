//! Aggregate statistics over a simulation outcome.

use serde::Serialize;

use super::indicator::sma::calculate_sma;
use super::ohlcv::OhlcvBar;
use super::signal::Signal;
use super::trade::{ClosedTrade, EquityPoint, OpenPosition, SimulationOutcome};

pub const DEFAULT_TREND_PERIOD: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendBucket {
    pub pnl: f64,
    pub trades: usize,
}

/// Realized P&L bucketed by the market regime at each trade's exit:
/// uptrend when the exit bar closes above the trend SMA, downtrend
/// otherwise (including exits before the trend SMA has warmed up).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendSplit {
    pub uptrend: TrendBucket,
    pub downtrend: TrendBucket,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestSummary {
    pub initial_capital: f64,
    pub final_equity: f64,
    pub net_pnl: f64,
    pub total_trades: usize,
    pub trades_won: usize,
    pub trades_lost: usize,
    pub win_rate: f64,
    pub max_drawdown: f64,
    pub trend: TrendSplit,
}

impl BacktestSummary {
    pub fn compute(
        bars: &[OhlcvBar],
        outcome: &SimulationOutcome,
        initial_capital: f64,
        trend_period: usize,
    ) -> Self {
        let trades = &outcome.closed_trades;

        let trades_won = trades.iter().filter(|t| t.pnl > 0.0).count();
        let trades_lost = trades.iter().filter(|t| t.pnl < 0.0).count();
        let win_rate = if trades.is_empty() {
            0.0
        } else {
            trades_won as f64 / trades.len() as f64
        };

        BacktestSummary {
            initial_capital,
            final_equity: outcome.final_equity,
            net_pnl: outcome.final_equity - initial_capital,
            total_trades: trades.len(),
            trades_won,
            trades_lost,
            win_rate,
            max_drawdown: compute_drawdown(&outcome.equity_curve),
            trend: compute_trend_split(bars, trades, trend_period),
        }
    }
}

/// Largest peak-to-trough decline of the equity curve, as a fraction of
/// the peak.
fn compute_drawdown(equity_curve: &[EquityPoint]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut max_dd = 0.0_f64;

    for point in equity_curve {
        if point.equity > peak {
            peak = point.equity;
        } else if peak > 0.0 {
            let dd = (peak - point.equity) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd
}

fn compute_trend_split(
    bars: &[OhlcvBar],
    trades: &[ClosedTrade],
    trend_period: usize,
) -> TrendSplit {
    let trend_sma = calculate_sma(bars, trend_period);
    let mut split = TrendSplit::default();

    for trade in trades {
        let uptrend = bars
            .binary_search_by_key(&trade.exit_date, |b| b.date)
            .ok()
            .and_then(|i| trend_sma.value_at(i).map(|sma| (i, sma)))
            .is_some_and(|(i, sma)| bars[i].close > sma);

        let bucket = if uptrend {
            &mut split.uptrend
        } else {
            &mut split.downtrend
        };
        bucket.pnl += trade.pnl;
        bucket.trades += 1;
    }

    split
}

/// Everything a report renderer needs for one backtest run.
#[derive(Debug, Clone, Serialize)]
pub struct BacktestReport {
    pub symbol: String,
    pub strategy: String,
    pub timeframe: String,
    pub summary: BacktestSummary,
    pub signals: Vec<Signal>,
    pub trades: Vec<ClosedTrade>,
    pub open_position: Option<OpenPosition>,
}
