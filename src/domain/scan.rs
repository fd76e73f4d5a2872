//! Forward signal scan over a bar series.
//!
//! The scan is a pure function: full bar slice in, ordered signal list
//! out. Position state is threaded through as a value, so a re-run over
//! identical input always yields an identical signal sequence.

use super::crossover::crossovers;
use super::error::StratscanError;
use super::indicator::ema::calculate_ema;
use super::indicator::rsi::calculate_rsi;
use super::indicator::sma::calculate_sma;
use super::indicator::IndicatorSeries;
use super::ohlcv::OhlcvBar;
use super::signal::{PositionState, Signal, SignalKind};
use super::strategy::StrategySpec;

/// Run the configured strategy over `bars`.
///
/// Refuses with [`StratscanError::InsufficientData`] when the series is
/// shorter than the strategy's largest lookback. Signals are taken at the
/// triggering bar's date and close; a position open at the last bar stays
/// open (no forced close).
pub fn generate_signals(
    bars: &[OhlcvBar],
    spec: &StrategySpec,
) -> Result<Vec<Signal>, StratscanError> {
    spec.validate()?;

    let minimum = spec.max_lookback();
    if bars.len() < minimum {
        return Err(StratscanError::InsufficientData {
            bars: bars.len(),
            minimum,
        });
    }

    let signals = match spec {
        StrategySpec::EmaCross { fast, slow } => cross_scan(
            bars,
            &calculate_ema(bars, *fast),
            &calculate_ema(bars, *slow),
        ),
        StrategySpec::GoldenCross { fast, slow } => cross_scan(
            bars,
            &calculate_sma(bars, *fast),
            &calculate_sma(bars, *slow),
        ),
        StrategySpec::Rsi {
            period,
            oversold,
            overbought,
        } => threshold_scan(bars, &calculate_rsi(bars, *period), *oversold, *overbought),
    };

    Ok(signals)
}

fn emit(signals: &mut Vec<Signal>, kind: SignalKind, bar: &OhlcvBar) {
    signals.push(Signal {
        kind,
        date: bar.date,
        price: bar.close,
    });
}

fn cross_scan(bars: &[OhlcvBar], fast: &IndicatorSeries, slow: &IndicatorSeries) -> Vec<Signal> {
    let crossings = crossovers(fast, slow);
    let mut signals = Vec::new();
    let mut state = PositionState::Flat;

    for (i, bar) in bars.iter().enumerate() {
        match (state, crossings[i]) {
            (PositionState::Flat, 1) => {
                emit(&mut signals, SignalKind::Buy, bar);
                state = PositionState::Long;
            }
            (PositionState::Long, -1) => {
                emit(&mut signals, SignalKind::Sell, bar);
                state = PositionState::Flat;
            }
            _ => {}
        }
    }

    signals
}

fn threshold_scan(
    bars: &[OhlcvBar],
    rsi: &IndicatorSeries,
    oversold: f64,
    overbought: f64,
) -> Vec<Signal> {
    let mut signals = Vec::new();
    let mut state = PositionState::Flat;

    for (i, bar) in bars.iter().enumerate() {
        let Some(value) = rsi.value_at(i) else {
            continue;
        };

        match state {
            PositionState::Flat if value < oversold => {
                emit(&mut signals, SignalKind::Buy, bar);
                state = PositionState::Long;
            }
            PositionState::Long if value > overbought => {
                emit(&mut signals, SignalKind::Sell, bar);
                state = PositionState::Flat;
            }
            _ => {}
        }
    }

    signals
}
