use crate::collector::ResultCollector;
use crate::error::{E2eError, Result};
use crate::service;
use crate::types::report::{StepOutcome, StepStatus, WorkflowReport};
use tracing::warn;

pub const UPDATE_ARGS: [&str; 2] = ["--env", "TARGET=kn"];
pub const IMAGE_JSONPATH: &str = "jsonpath={.spec.template.spec.containers[0].image}";

/// Runs the basic service lifecycle against an empty namespace.
///
/// Steps run in order and stop at the first failure; the failing step is
/// the last one in the returned report. Harness errors such as an invalid
/// service name are returned as `Err` instead of being recorded.
pub fn basic_workflow(r: &mut ResultCollector<'_>, name: &str) -> Result<WorkflowReport> {
    let mut report = WorkflowReport::new(r.namespace(), name, r.image());

    let steps: [(&str, Step); 9] = [
        ("service list (empty)", list_empty),
        ("service create", service::service_create),
        ("service list", service::service_list),
        ("service list --output name", service::service_list_output),
        ("service describe", service::service_describe),
        ("service update", update),
        ("service describe -o jsonpath", check_image),
        ("service delete", service::service_delete),
        ("service list (deleted)", service::service_list_absent),
    ];

    for (step, run) in steps {
        match run(r, name) {
            Ok(()) => report.steps.push(StepOutcome {
                name: step.to_string(),
                status: StepStatus::Passed,
                message: None,
            }),
            Err(e) if e.is_scenario_failure() => {
                warn!(step, error = %e, "workflow step failed");
                report.steps.push(StepOutcome {
                    name: step.to_string(),
                    status: StepStatus::Failed,
                    message: Some(e.to_string()),
                });
                break;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(report)
}

type Step = fn(&mut ResultCollector<'_>, &str) -> Result<()>;

fn list_empty(r: &mut ResultCollector<'_>, _name: &str) -> Result<()> {
    service::service_list_empty(r)
}

fn update(r: &mut ResultCollector<'_>, name: &str) -> Result<()> {
    service::service_update(r, name, &UPDATE_ARGS)
}

fn check_image(r: &mut ResultCollector<'_>, name: &str) -> Result<()> {
    let out = service::service_describe_with_jsonpath(r, name, IMAGE_JSONPATH)?;
    if out.contains(r.image()) {
        return Ok(());
    }
    let command = r
        .results()
        .last()
        .map(|result| result.command_line())
        .unwrap_or_default();
    Err(E2eError::MissingOutput {
        command,
        missing: vec![r.image().to_string()],
        stdout: out,
    })
}
