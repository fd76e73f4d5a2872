//! Backtest orchestration: scan, simulate, summarise.

use log::debug;

use super::error::StratscanError;
use super::ohlcv::OhlcvBar;
use super::report::{BacktestReport, BacktestSummary, DEFAULT_TREND_PERIOD};
use super::scan::generate_signals;
use super::strategy::StrategySpec;
use super::timeframe::Timeframe;
use crate::ports::simulator_port::{SimulatorConfig, TradeSimulator};

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub initial_capital: f64,
    pub commission_pct: f64,
    pub position_size: f64,
    pub trend_period: usize,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            initial_capital: 100_000.0,
            commission_pct: 0.2,
            position_size: 0.25,
            trend_period: DEFAULT_TREND_PERIOD,
        }
    }
}

/// Run one backtest over an already-materialised bar series.
///
/// `bars` must already be at the requested timeframe; `timeframe` is only
/// recorded in the report. An empty series is a [`StratscanError::NoData`]
/// for `symbol`; everything else propagates from the scan and simulator.
pub fn run_backtest(
    symbol: &str,
    bars: &[OhlcvBar],
    spec: &StrategySpec,
    timeframe: Timeframe,
    simulator: &dyn TradeSimulator,
    config: &BacktestConfig,
) -> Result<BacktestReport, StratscanError> {
    if bars.is_empty() {
        return Err(StratscanError::NoData {
            symbol: symbol.to_string(),
        });
    }

    let signals = generate_signals(bars, spec)?;
    debug!(
        "{}: {} bars scanned with {}, {} signals",
        symbol,
        bars.len(),
        spec.display_name(),
        signals.len()
    );

    let sim_config = SimulatorConfig {
        initial_capital: config.initial_capital,
        commission_pct: config.commission_pct,
        position_size: config.position_size,
    };
    let outcome = simulator.simulate(bars, &signals, &sim_config)?;

    let summary = BacktestSummary::compute(bars, &outcome, config.initial_capital, config.trend_period);

    Ok(BacktestReport {
        symbol: symbol.to_string(),
        strategy: spec.display_name(),
        timeframe: timeframe.display_name().to_string(),
        summary,
        signals,
        trades: outcome.closed_trades,
        open_position: outcome.open_position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::signal::Signal;
    use crate::domain::trade::SimulationOutcome;
    use chrono::NaiveDate;

    struct NullSimulator;

    impl TradeSimulator for NullSimulator {
        fn simulate(
            &self,
            _bars: &[OhlcvBar],
            _signals: &[Signal],
            config: &SimulatorConfig,
        ) -> Result<SimulationOutcome, StratscanError> {
            Ok(SimulationOutcome {
                closed_trades: vec![],
                equity_curve: vec![],
                open_position: None,
                final_equity: config.initial_capital,
            })
        }
    }

    fn make_bars(count: usize) -> Vec<OhlcvBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..count)
            .map(|i| OhlcvBar {
                symbol: "TEST".into(),
                date: start + chrono::Duration::days(i as i64),
                open: 100.0,
                high: 101.0,
                low: 99.0,
                close: 100.0,
                volume: 1000,
            })
            .collect()
    }

    #[test]
    fn empty_series_is_no_data() {
        let spec = StrategySpec::from_key("ema_cross").unwrap();
        let err = run_backtest(
            "XYZ",
            &[],
            &spec,
            Timeframe::Daily,
            &NullSimulator,
            &BacktestConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(err, StratscanError::NoData { symbol } if symbol == "XYZ"));
    }

    #[test]
    fn short_series_propagates_insufficient_data() {
        let spec = StrategySpec::from_key("golden_cross").unwrap();
        let err = run_backtest(
            "XYZ",
            &make_bars(50),
            &spec,
            Timeframe::Daily,
            &NullSimulator,
            &BacktestConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(err, StratscanError::InsufficientData { .. }));
    }

    #[test]
    fn report_carries_request_context() {
        let spec = StrategySpec::from_key("ema_cross").unwrap();
        let report = run_backtest(
            "RELIANCE.NS",
            &make_bars(30),
            &spec,
            Timeframe::Weekly,
            &NullSimulator,
            &BacktestConfig::default(),
        )
        .unwrap();

        assert_eq!(report.symbol, "RELIANCE.NS");
        assert_eq!(report.strategy, "EMA Crossover (9/20)");
        assert_eq!(report.timeframe, "Weekly");
        assert_eq!(report.summary.initial_capital, 100_000.0);
        assert_eq!(report.summary.net_pnl, 0.0);
    }
}
