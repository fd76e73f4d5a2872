//! Range validation for backtest configuration.

use super::backtest::BacktestConfig;
use super::error::StratscanError;

/// Validate a fully built [`BacktestConfig`].
pub fn validate_backtest_config(config: &BacktestConfig) -> Result<(), StratscanError> {
    let invalid = |key: &str, reason: &str| {
        Err(StratscanError::ConfigInvalid {
            section: "backtest".into(),
            key: key.into(),
            reason: reason.into(),
        })
    };

    if !config.initial_capital.is_finite() || config.initial_capital <= 0.0 {
        return invalid("initial_capital", "must be a positive number");
    }
    if !config.commission_pct.is_finite() || !(0.0..100.0).contains(&config.commission_pct) {
        return invalid("commission_pct", "must be in [0, 100)");
    }
    if !config.position_size.is_finite()
        || config.position_size <= 0.0
        || config.position_size > 1.0
    {
        return invalid("position_size", "must be in (0, 1]");
    }
    if config.trend_period == 0 {
        return invalid("trend_period", "must be at least 1");
    }

    Ok(())
}
