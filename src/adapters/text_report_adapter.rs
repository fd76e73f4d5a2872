//! Plain-text report adapter.

use crate::domain::error::StratscanError;
use crate::domain::report::BacktestReport;
use crate::ports::report_port::ReportPort;

#[derive(Debug, Default)]
pub struct TextReportAdapter;

impl ReportPort for TextReportAdapter {
    fn render(&self, report: &BacktestReport) -> Result<String, StratscanError> {
        let mut out = String::new();
        let s = &report.summary;

        out.push_str(&format!("=== Backtest: {} ===\n", report.symbol));
        out.push_str(&format!("Strategy:         {}\n", report.strategy));
        out.push_str(&format!("Timeframe:        {}\n", report.timeframe));
        out.push('\n');
        out.push_str(&format!("Initial Capital:  {:.2}\n", s.initial_capital));
        out.push_str(&format!("Final Equity:     {:.2}\n", s.final_equity));
        out.push_str(&format!("Net P&L:          {:+.2}\n", s.net_pnl));
        out.push_str(&format!(
            "Trades:           {} ({} won / {} lost)\n",
            s.total_trades, s.trades_won, s.trades_lost
        ));
        out.push_str(&format!("Win Rate:         {:.1}%\n", s.win_rate * 100.0));
        out.push_str(&format!(
            "Max Drawdown:     -{:.1}%\n",
            s.max_drawdown * 100.0
        ));
        out.push('\n');
        out.push_str("Trend Split:\n");
        out.push_str(&format!(
            "  Uptrend:        {:+.2} over {} trades\n",
            s.trend.uptrend.pnl, s.trend.uptrend.trades
        ));
        out.push_str(&format!(
            "  Downtrend:      {:+.2} over {} trades\n",
            s.trend.downtrend.pnl, s.trend.downtrend.trades
        ));

        if !report.signals.is_empty() {
            out.push('\n');
            out.push_str("Signals:\n");
            for signal in &report.signals {
                out.push_str(&format!(
                    "  {}  {:<4}  {:.2}\n",
                    signal.date, signal.kind, signal.price
                ));
            }
        }

        if !report.trades.is_empty() {
            out.push('\n');
            out.push_str("Closed Trades:\n");
            for trade in &report.trades {
                out.push_str(&format!(
                    "  {} -> {}  qty {:>6}  {:.2} -> {:.2}  {:+.2}\n",
                    trade.entry_date,
                    trade.exit_date,
                    trade.quantity,
                    trade.entry_price,
                    trade.exit_price,
                    trade.pnl
                ));
            }
        }

        if let Some(open) = &report.open_position {
            out.push('\n');
            out.push_str(&format!(
                "Open Position:    qty {} @ {:.2} since {}\n",
                open.quantity, open.entry_price, open.entry_date
            ));
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::{BacktestSummary, TrendBucket, TrendSplit};
    use crate::domain::signal::{Signal, SignalKind};
    use crate::domain::trade::{ClosedTrade, OpenPosition};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn sample_report() -> BacktestReport {
        BacktestReport {
            symbol: "RELIANCE.NS".into(),
            strategy: "EMA Crossover (9/20)".into(),
            timeframe: "Daily".into(),
            summary: BacktestSummary {
                initial_capital: 100_000.0,
                final_equity: 103_250.0,
                net_pnl: 3_250.0,
                total_trades: 2,
                trades_won: 1,
                trades_lost: 1,
                win_rate: 0.5,
                max_drawdown: 0.031,
                trend: TrendSplit {
                    uptrend: TrendBucket {
                        pnl: 4_000.0,
                        trades: 1,
                    },
                    downtrend: TrendBucket {
                        pnl: -750.0,
                        trades: 1,
                    },
                },
            },
            signals: vec![
                Signal {
                    kind: SignalKind::Buy,
                    date: day(5),
                    price: 102.5,
                },
                Signal {
                    kind: SignalKind::Sell,
                    date: day(20),
                    price: 108.0,
                },
            ],
            trades: vec![ClosedTrade {
                quantity: 97,
                entry_date: day(5),
                entry_price: 102.5,
                exit_date: day(20),
                exit_price: 108.0,
                pnl: 523.2,
            }],
            open_position: None,
        }
    }

    #[test]
    fn renders_summary_block() {
        let text = TextReportAdapter.render(&sample_report()).unwrap();

        assert!(text.contains("=== Backtest: RELIANCE.NS ==="));
        assert!(text.contains("Strategy:         EMA Crossover (9/20)"));
        assert!(text.contains("Net P&L:          +3250.00"));
        assert!(text.contains("Win Rate:         50.0%"));
        assert!(text.contains("Max Drawdown:     -3.1%"));
    }

    #[test]
    fn renders_signals_and_trades() {
        let text = TextReportAdapter.render(&sample_report()).unwrap();

        assert!(text.contains("2024-01-05  BUY   102.50"));
        assert!(text.contains("2024-01-20  SELL  108.00"));
        assert!(text.contains("2024-01-05 -> 2024-01-20  qty     97  102.50 -> 108.00  +523.20"));
    }

    #[test]
    fn renders_open_position_when_present() {
        let mut report = sample_report();
        report.open_position = Some(OpenPosition {
            quantity: 40,
            entry_price: 99.0,
            entry_date: day(25),
        });

        let text = TextReportAdapter.render(&report).unwrap();
        assert!(text.contains("Open Position:    qty 40 @ 99.00 since 2024-01-25"));
    }

    #[test]
    fn omits_empty_sections() {
        let mut report = sample_report();
        report.signals.clear();
        report.trades.clear();

        let text = TextReportAdapter.render(&report).unwrap();
        assert!(!text.contains("Signals:"));
        assert!(!text.contains("Closed Trades:"));
        assert!(!text.contains("Open Position:"));
    }
}
