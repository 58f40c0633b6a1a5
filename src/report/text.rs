use crate::types::report::{StepStatus, WorkflowReport};

pub fn to_text(report: &WorkflowReport) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "service {} in namespace {} (image {})\n",
        report.service, report.namespace, report.image
    ));
    for step in &report.steps {
        let marker = match step.status {
            StepStatus::Passed => "ok",
            StepStatus::Failed => "FAILED",
        };
        output.push_str(&format!("  [{marker}] {}\n", step.name));
        if let Some(message) = &step.message {
            for line in message.lines() {
                output.push_str(&format!("      {line}\n"));
            }
        }
    }
    let passed = report
        .steps
        .iter()
        .filter(|step| step.status == StepStatus::Passed)
        .count();
    output.push_str(&format!(
        "result: {} ({}/{} steps passed)\n",
        if report.passed() { "passed" } else { "failed" },
        passed,
        report.steps.len()
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::report::StepOutcome;

    #[test]
    fn text_report_marks_failed_step_with_message() {
        let mut report = WorkflowReport::new("ns", "hello", "img");
        report.steps.push(StepOutcome {
            name: "service list (empty)".to_string(),
            status: StepStatus::Passed,
            message: None,
        });
        report.steps.push(StepOutcome {
            name: "service create".to_string(),
            status: StepStatus::Failed,
            message: Some("command `kn service create` exited with code 1: boom".to_string()),
        });

        let rendered = to_text(&report);
        assert!(rendered.contains("  [ok] service list (empty)"));
        assert!(rendered.contains("  [FAILED] service create"));
        assert!(rendered.contains("      command `kn service create` exited"));
        assert!(rendered.ends_with("result: failed (1/2 steps passed)\n"));
    }
}
