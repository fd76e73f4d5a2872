//! Trade-simulation port.
//!
//! Order filling, sizing, and commission accounting sit behind this trait
//! so the simulator can be swapped without touching the signal scan.

use crate::domain::error::StratscanError;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::signal::Signal;
use crate::domain::trade::SimulationOutcome;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    pub initial_capital: f64,
    /// Commission as a percentage of traded notional, charged on entry and
    /// exit.
    pub commission_pct: f64,
    /// Fraction of current cash committed per entry.
    pub position_size: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            initial_capital: 100_000.0,
            commission_pct: 0.2,
            position_size: 0.25,
        }
    }
}

pub trait TradeSimulator {
    /// Turn an ordered, alternating signal sequence into closed trades and
    /// an equity curve over `bars`.
    fn simulate(
        &self,
        bars: &[OhlcvBar],
        signals: &[Signal],
        config: &SimulatorConfig,
    ) -> Result<SimulationOutcome, StratscanError>;
}
