pub mod json;
pub mod md;

use crate::error::StarcutError;
use crate::types::rating::RatingReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(
    report: &RatingReport,
    format: OutputFormat,
    decimals: u8,
) -> Result<String, StarcutError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(StarcutError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report, decimals)),
    }
}
