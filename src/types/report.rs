use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Passed,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub name: String,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowReport {
    pub namespace: String,
    pub service: String,
    pub image: String,
    pub steps: Vec<StepOutcome>,
}

impl WorkflowReport {
    pub fn new(namespace: &str, service: &str, image: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            service: service.to_string(),
            image: image.to_string(),
            steps: Vec::new(),
        }
    }

    pub fn passed(&self) -> bool {
        self.steps
            .iter()
            .all(|step| step.status == StepStatus::Passed)
    }

    pub fn failed_step(&self) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|step| step.status == StepStatus::Failed)
    }
}
