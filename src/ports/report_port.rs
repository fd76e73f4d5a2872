//! Report rendering port.

use crate::domain::error::StratscanError;
use crate::domain::report::BacktestReport;

/// Render a backtest report to a string; the CLI decides where it goes.
pub trait ReportPort {
    fn render(&self, report: &BacktestReport) -> Result<String, StratscanError>;
}
