pub mod csv_export;
pub mod json;
pub mod md;

use crate::error::ScorecardError;
use crate::types::report::ScorecardReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
    Csv,
}

pub fn render(
    report: &ScorecardReport,
    format: OutputFormat,
    precision: u32,
) -> Result<String, ScorecardError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(ScorecardError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report, precision as usize)),
        OutputFormat::Csv => csv_export::to_csv(report),
    }
}
