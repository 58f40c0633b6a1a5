pub mod json;
pub mod text;

use crate::error::E2eError;
use crate::types::report::WorkflowReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Text,
}

pub fn render(report: &WorkflowReport, format: OutputFormat) -> Result<String, E2eError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(E2eError::Json),
        OutputFormat::Text => Ok(text::to_text(report)),
    }
}
