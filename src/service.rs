use crate::collector::ResultCollector;
use crate::error::{E2eError, Result};
use tracing::info;

pub const NO_SERVICES_FOUND: &str = "No services found.";
pub const SERVICE_RESOURCE: &str = "service.serving.knative.dev";

/// Creates `name` with the collector's image and waits for it to become ready.
pub fn service_create(r: &mut ResultCollector<'_>, name: &str) -> Result<()> {
    validate_name(name)?;
    info!(service = name, "creating service");
    let image = r.image().to_string();
    let out = r.run(&["service", "create", name, "--image", image.as_str()]);
    r.assert_no_error(&out)?;
    let namespace = r.namespace().to_string();
    r.assert_stdout_contains_all_ignore_case(
        &out,
        &["service", name, "creating", "namespace", namespace.as_str(), "ready"],
    )
}

pub fn service_list_empty(r: &mut ResultCollector<'_>) -> Result<()> {
    info!("listing services, expecting none");
    let out = r.run(&["service", "list"]);
    r.assert_no_error(&out)?;
    r.assert_stdout_contains_all(&out, &[NO_SERVICES_FOUND])
}

pub fn service_list(r: &mut ResultCollector<'_>, name: &str) -> Result<()> {
    validate_name(name)?;
    info!(service = name, "listing service");
    let out = r.run(&["service", "list", name]);
    r.assert_no_error(&out)?;
    r.assert_stdout_contains_all(&out, &[name])
}

/// Lists all services and requires `name` to be gone.
pub fn service_list_absent(r: &mut ResultCollector<'_>, name: &str) -> Result<()> {
    validate_name(name)?;
    info!(service = name, "listing services, expecting service to be absent");
    let out = r.run(&["service", "list"]);
    r.assert_no_error(&out)?;
    r.assert_stdout_contains_none(&out, &[name])
}

pub fn service_list_output(r: &mut ResultCollector<'_>, name: &str) -> Result<()> {
    validate_name(name)?;
    info!(service = name, "listing service by resource name");
    let out = r.run(&["service", "list", name, "--output", "name"]);
    r.assert_no_error(&out)?;
    r.assert_stdout_contains_all(&out, &[name, SERVICE_RESOURCE])
}

pub fn service_describe(r: &mut ResultCollector<'_>, name: &str) -> Result<()> {
    validate_name(name)?;
    info!(service = name, "describing service");
    let out = r.run(&["service", "describe", name]);
    r.assert_no_error(&out)?;
    let namespace = r.namespace().to_string();
    let image = r.image().to_string();
    r.assert_stdout_contains_all(&out, &[name, namespace.as_str(), image.as_str()])?;
    r.assert_stdout_contains_all(
        &out,
        &["Conditions", "ConfigurationsReady", "Ready", "RoutesReady"],
    )?;
    r.assert_stdout_contains_all(&out, &["Name", "Namespace", "URL", "Age", "Revisions"])
}

/// Updates `name` with extra `args` such as `--env KEY=VALUE`.
pub fn service_update(r: &mut ResultCollector<'_>, name: &str, args: &[&str]) -> Result<()> {
    validate_name(name)?;
    info!(service = name, ?args, "updating service");
    let mut full_args = vec!["service", "update", name];
    full_args.extend_from_slice(args);
    let out = r.run(full_args.as_slice());
    r.assert_no_error(&out)?;
    r.assert_stdout_contains_all_ignore_case(&out, &["updating", "service", name, "ready"])
}

pub fn service_delete(r: &mut ResultCollector<'_>, name: &str) -> Result<()> {
    validate_name(name)?;
    info!(service = name, "deleting service");
    let out = r.run(&["service", "delete", "--wait", name]);
    r.assert_no_error(&out)?;
    let namespace = r.namespace().to_string();
    r.assert_stdout_contains_all(
        &out,
        &[
            "Service",
            name,
            "successfully deleted in namespace",
            namespace.as_str(),
        ],
    )
}

/// Returns the raw output of `service describe -o <jsonpath>`.
pub fn service_describe_with_jsonpath(
    r: &mut ResultCollector<'_>,
    name: &str,
    jsonpath: &str,
) -> Result<String> {
    validate_name(name)?;
    info!(service = name, jsonpath, "describing service with jsonpath");
    let out = r.run(&["service", "describe", name, "-o", jsonpath]);
    r.assert_no_error(&out)?;
    Ok(out.stdout().to_string())
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(E2eError::InvalidServiceName(name.to_string()));
    }
    Ok(())
}
