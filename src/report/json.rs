use crate::types::report::WorkflowReport;

pub fn to_json(report: &WorkflowReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
