use crate::types::rating::RatingReport;

pub fn to_json(report: &RatingReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
