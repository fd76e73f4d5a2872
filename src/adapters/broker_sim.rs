//! Default trade simulator.
//!
//! Fills every signal at its reference price (the signal bar's close).
//! Entry quantity is whole shares, floor(cash * position_size / price);
//! commission is a percentage of traded notional on both legs. A buy that
//! cannot afford a single share is skipped, and the sell it would have
//! paired with falls through harmlessly because no position is open.

use log::{debug, warn};

use crate::domain::error::StratscanError;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::signal::{Signal, SignalKind};
use crate::domain::trade::{ClosedTrade, EquityPoint, OpenPosition, SimulationOutcome};
use crate::ports::simulator_port::{SimulatorConfig, TradeSimulator};

#[derive(Debug, Default)]
pub struct BrokerSim;

fn commission(notional: f64, config: &SimulatorConfig) -> f64 {
    notional * config.commission_pct / 100.0
}

impl TradeSimulator for BrokerSim {
    fn simulate(
        &self,
        bars: &[OhlcvBar],
        signals: &[Signal],
        config: &SimulatorConfig,
    ) -> Result<SimulationOutcome, StratscanError> {
        let mut cash = config.initial_capital;
        let mut position: Option<OpenPosition> = None;
        let mut entry_commission = 0.0;
        let mut closed_trades = Vec::new();
        let mut equity_curve = Vec::with_capacity(bars.len());
        let mut pending = signals.iter().peekable();

        for bar in bars {
            while let Some(signal) = pending.peek() {
                if signal.date > bar.date {
                    break;
                }
                if signal.date < bar.date {
                    return Err(StratscanError::Data {
                        reason: format!("signal on {} matches no bar", signal.date),
                    });
                }

                match signal.kind {
                    SignalKind::Buy if position.is_none() => {
                        let budget = cash * config.position_size;
                        let quantity = (budget / signal.price).floor() as i64;
                        let cost = quantity as f64 * signal.price;
                        let fee = commission(cost, config);

                        if quantity == 0 || cost + fee > cash {
                            warn!(
                                "skipping buy on {}: budget {:.2} cannot fill at {:.2}",
                                signal.date, budget, signal.price
                            );
                        } else {
                            cash -= cost + fee;
                            entry_commission = fee;
                            position = Some(OpenPosition {
                                quantity,
                                entry_price: signal.price,
                                entry_date: signal.date,
                            });
                            debug!(
                                "buy {} @ {:.2} on {} (fee {:.2})",
                                quantity, signal.price, signal.date, fee
                            );
                        }
                    }
                    SignalKind::Buy => {
                        warn!("ignoring buy on {}: already long", signal.date);
                    }
                    SignalKind::Sell => {
                        if let Some(open) = position.take() {
                            let proceeds = open.quantity as f64 * signal.price;
                            let fee = commission(proceeds, config);
                            cash += proceeds - fee;

                            let pnl = open.quantity as f64 * (signal.price - open.entry_price)
                                - entry_commission
                                - fee;
                            debug!(
                                "sell {} @ {:.2} on {} (pnl {:.2})",
                                open.quantity, signal.price, signal.date, pnl
                            );
                            closed_trades.push(ClosedTrade {
                                quantity: open.quantity,
                                entry_date: open.entry_date,
                                entry_price: open.entry_price,
                                exit_date: signal.date,
                                exit_price: signal.price,
                                pnl,
                            });
                            entry_commission = 0.0;
                        } else {
                            // Pair of a skipped buy; nothing to close.
                            debug!("ignoring sell on {}: no open position", signal.date);
                        }
                    }
                }

                pending.next();
            }

            let equity = cash
                + position
                    .as_ref()
                    .map_or(0.0, |open| open.market_value(bar.close));
            equity_curve.push(EquityPoint {
                date: bar.date,
                equity,
            });
        }

        if pending.peek().is_some() {
            return Err(StratscanError::Data {
                reason: "signal dated past the end of the bar series".into(),
            });
        }

        let final_equity = equity_curve.last().map_or(cash, |p| p.equity);

        Ok(SimulationOutcome {
            closed_trades,
            equity_curve,
            open_position: position,
            final_equity,
        })
    }
}
