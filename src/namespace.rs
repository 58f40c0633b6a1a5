use crate::error::{E2eError, Result};
use crate::result::CommandResult;
use crate::runner::CommandRunner;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

static NAMESPACE_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Returns `<prefix><n>`, unique within this process.
pub fn next_namespace(prefix: &str) -> String {
    let id = NAMESPACE_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{prefix}{id}")
}

/// Creates and removes test namespaces through `kubectl`.
#[derive(Debug, Clone)]
pub struct NamespaceManager {
    kubectl: CommandRunner,
}

impl NamespaceManager {
    pub fn new(kubectl: CommandRunner) -> Self {
        Self { kubectl }
    }

    pub fn create(&self, namespace: &str) -> Result<CommandResult> {
        info!(namespace, "creating namespace");
        self.expect_success(self.kubectl.run(&["create", "namespace", namespace]))
    }

    pub fn delete(&self, namespace: &str) -> Result<CommandResult> {
        info!(namespace, "deleting namespace");
        self.expect_success(self.kubectl.run(&["delete", "namespace", namespace]))
    }

    fn expect_success(&self, result: CommandResult) -> Result<CommandResult> {
        if result.success() {
            Ok(result)
        } else {
            Err(E2eError::CommandFailed {
                command: result.command_line(),
                exit_code: result.exit_code(),
                stderr: result.stderr().to_string(),
            })
        }
    }
}
