//! JSON report adapter.

use crate::domain::error::StratscanError;
use crate::domain::report::BacktestReport;
use crate::ports::report_port::ReportPort;

#[derive(Debug, Default)]
pub struct JsonReportAdapter;

impl ReportPort for JsonReportAdapter {
    fn render(&self, report: &BacktestReport) -> Result<String, StratscanError> {
        serde_json::to_string_pretty(report).map_err(|e| StratscanError::Report {
            reason: e.to_string(),
        })
    }
}
