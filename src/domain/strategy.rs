//! Strategy selection and parameters.

use super::error::StratscanError;

pub const DEFAULT_EMA_FAST: usize = 9;
pub const DEFAULT_EMA_SLOW: usize = 20;
pub const DEFAULT_RSI_PERIOD: usize = 14;
pub const DEFAULT_RSI_OVERSOLD: f64 = 30.0;
pub const DEFAULT_RSI_OVERBOUGHT: f64 = 70.0;
pub const DEFAULT_GOLDEN_FAST: usize = 50;
pub const DEFAULT_GOLDEN_SLOW: usize = 200;

/// A fully parameterised strategy selection.
///
/// Construct via [`StrategySpec::from_key`] for the documented defaults, or
/// build a variant directly and [`StrategySpec::validate`] it.
#[derive(Debug, Clone, PartialEq)]
pub enum StrategySpec {
    /// Long when the fast EMA crosses above the slow EMA, flat on the
    /// opposite cross.
    EmaCross { fast: usize, slow: usize },
    /// Long when RSI drops below `oversold`, flat when it rises above
    /// `overbought`.
    Rsi {
        period: usize,
        oversold: f64,
        overbought: f64,
    },
    /// EMA-cross shape over long-period SMAs.
    GoldenCross { fast: usize, slow: usize },
}

impl StrategySpec {
    /// Resolve a request key to its strategy with default parameters.
    pub fn from_key(key: &str) -> Result<Self, StratscanError> {
        match key {
            "ema_cross" => Ok(StrategySpec::EmaCross {
                fast: DEFAULT_EMA_FAST,
                slow: DEFAULT_EMA_SLOW,
            }),
            "rsi_strategy" => Ok(StrategySpec::Rsi {
                period: DEFAULT_RSI_PERIOD,
                oversold: DEFAULT_RSI_OVERSOLD,
                overbought: DEFAULT_RSI_OVERBOUGHT,
            }),
            "golden_cross" => Ok(StrategySpec::GoldenCross {
                fast: DEFAULT_GOLDEN_FAST,
                slow: DEFAULT_GOLDEN_SLOW,
            }),
            _ => Err(StratscanError::UnknownStrategy { key: key.into() }),
        }
    }

    /// All registered strategies with default parameters, in listing order.
    pub fn all() -> Vec<StrategySpec> {
        vec![
            StrategySpec::EmaCross {
                fast: DEFAULT_EMA_FAST,
                slow: DEFAULT_EMA_SLOW,
            },
            StrategySpec::Rsi {
                period: DEFAULT_RSI_PERIOD,
                oversold: DEFAULT_RSI_OVERSOLD,
                overbought: DEFAULT_RSI_OVERBOUGHT,
            },
            StrategySpec::GoldenCross {
                fast: DEFAULT_GOLDEN_FAST,
                slow: DEFAULT_GOLDEN_SLOW,
            },
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            StrategySpec::EmaCross { .. } => "ema_cross",
            StrategySpec::Rsi { .. } => "rsi_strategy",
            StrategySpec::GoldenCross { .. } => "golden_cross",
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            StrategySpec::EmaCross { fast, slow } => {
                format!("EMA Crossover ({}/{})", fast, slow)
            }
            StrategySpec::Rsi { .. } => "RSI Strategy (Oversold/Overbought)".to_string(),
            StrategySpec::GoldenCross { fast, slow } => {
                format!("Golden Cross ({}/{} SMA)", fast, slow)
            }
        }
    }

    /// The largest lookback period in use; the scan refuses series shorter
    /// than this.
    pub fn max_lookback(&self) -> usize {
        match self {
            StrategySpec::EmaCross { fast, slow } => (*fast).max(*slow),
            StrategySpec::Rsi { period, .. } => *period,
            StrategySpec::GoldenCross { fast, slow } => (*fast).max(*slow),
        }
    }

    pub fn validate(&self) -> Result<(), StratscanError> {
        let invalid = |name: &str, reason: &str| {
            Err(StratscanError::InvalidParameter {
                name: name.into(),
                reason: reason.into(),
            })
        };

        match self {
            StrategySpec::EmaCross { fast, slow } | StrategySpec::GoldenCross { fast, slow } => {
                if *fast == 0 || *slow == 0 {
                    return invalid("period", "must be at least 1");
                }
                if fast >= slow {
                    return invalid("fast_period", "must be smaller than slow_period");
                }
            }
            StrategySpec::Rsi {
                period,
                oversold,
                overbought,
            } => {
                if *period == 0 {
                    return invalid("rsi_period", "must be at least 1");
                }
                if !(0.0..100.0).contains(oversold) || *oversold <= 0.0 {
                    return invalid("oversold", "must be between 0 and 100 exclusive");
                }
                if !(0.0..=100.0).contains(overbought) || *overbought >= 100.0 {
                    return invalid("overbought", "must be between 0 and 100 exclusive");
                }
                if oversold >= overbought {
                    return invalid("oversold", "must be below overbought");
                }
            }
        }
        Ok(())
    }
}
