use crate::result::{CommandResult, NO_EXIT_CODE};
use crate::types::config::{ClientConfig, KubectlConfig, NamespacePlacement, DEFAULT_NAMESPACE_FLAG};
use chrono::Utc;
use std::collections::BTreeMap;
use std::process::{Command, ExitStatus};
use std::time::Instant;
use tracing::debug;

/// Invokes one CLI binary inside a fixed namespace.
///
/// A runner is built once per test session and never mutated afterwards;
/// every [`CommandRunner::run`] call spawns a fresh process and blocks until it exits.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    binary: String,
    prefix_args: Vec<String>,
    namespace: String,
    namespace_flag: Option<String>,
    placement: NamespacePlacement,
    env: BTreeMap<String, String>,
}

impl CommandRunner {
    pub fn new(binary: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            prefix_args: Vec::new(),
            namespace: namespace.into(),
            namespace_flag: Some(DEFAULT_NAMESPACE_FLAG.to_string()),
            placement: NamespacePlacement::Append,
            env: BTreeMap::new(),
        }
    }

    pub fn from_client_config(config: &ClientConfig, namespace: impl Into<String>) -> Self {
        Self {
            binary: config.binary.clone(),
            prefix_args: config.prefix_args.clone(),
            namespace: namespace.into(),
            namespace_flag: Some(config.namespace_flag.clone()).filter(|flag| !flag.is_empty()),
            placement: config.namespace_placement,
            env: config.env.clone(),
        }
    }

    /// Runner for `kubectl`; namespace-scoped calls pass the namespace explicitly.
    pub fn from_kubectl_config(config: &KubectlConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            prefix_args: config.prefix_args.clone(),
            namespace: String::new(),
            namespace_flag: None,
            placement: NamespacePlacement::Append,
            env: config.env.clone(),
        }
    }

    pub fn with_prefix_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefix_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_namespace_flag(mut self, flag: Option<&str>, placement: NamespacePlacement) -> Self {
        self.namespace_flag = flag.map(ToString::to_string);
        self.placement = placement;
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Full argument vector passed to the process for `args`.
    pub fn build_args<S: AsRef<str>>(&self, args: &[S]) -> Vec<String> {
        let namespace_args: Vec<String> = match &self.namespace_flag {
            Some(flag) if !self.namespace.is_empty() => vec![flag.clone(), self.namespace.clone()],
            _ => Vec::new(),
        };

        let mut full = self.prefix_args.clone();
        if self.placement == NamespacePlacement::Prefix {
            full.extend(namespace_args.iter().cloned());
        }
        full.extend(args.iter().map(|arg| arg.as_ref().to_string()));
        if self.placement == NamespacePlacement::Append {
            full.extend(namespace_args);
        }
        full
    }

    /// Runs the binary and captures its output verbatim.
    ///
    /// Never fails: a process that cannot be spawned is reported as a
    /// result with exit code [`NO_EXIT_CODE`] and the spawn error on stderr.
    pub fn run<S: AsRef<str>>(&self, args: &[S]) -> CommandResult {
        let full_args = self.build_args(args);
        let started_at = Utc::now();
        let clock = Instant::now();

        let output = Command::new(&self.binary)
            .args(&full_args)
            .envs(&self.env)
            .output();
        let duration_ms = u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX);

        let (stdout, stderr, exit_code, signal) = match output {
            Ok(output) => {
                let signal = termination_signal(&output.status);
                let mut stderr = String::from_utf8_lossy(&output.stderr).into_owned();
                if let Some(signal) = signal {
                    if !stderr.is_empty() && !stderr.ends_with('\n') {
                        stderr.push('\n');
                    }
                    stderr.push_str(&format!("{} terminated by signal {}\n", self.binary, signal));
                }
                (
                    String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr,
                    output.status.code().unwrap_or(NO_EXIT_CODE),
                    signal,
                )
            }
            Err(e) => (
                String::new(),
                format!("failed to run {}: {}", self.binary, e),
                NO_EXIT_CODE,
                None,
            ),
        };

        let result = CommandResult::new(
            self.binary.clone(),
            full_args,
            stdout,
            stderr,
            exit_code,
            started_at,
            duration_ms,
        )
        .with_signal(signal);
        debug!(
            command = %result.command_line(),
            exit_code = result.exit_code(),
            duration_ms = result.duration_ms(),
            "command finished"
        );
        result
    }
}

#[cfg(unix)]
fn termination_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn termination_signal(_status: &ExitStatus) -> Option<i32> {
    None
}
