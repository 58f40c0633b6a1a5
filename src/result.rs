use chrono::{DateTime, Utc};
use serde::Serialize;

/// Exit code reported when the process could not be spawned or was killed by a signal.
pub const NO_EXIT_CODE: i32 = -1;

/// Captured outcome of a single client invocation.
#[derive(Debug, Clone, Serialize)]
pub struct CommandResult {
    command: String,
    args: Vec<String>,
    stdout: String,
    stderr: String,
    exit_code: i32,
    started_at: DateTime<Utc>,
    duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    signal: Option<i32>,
    expect_error: bool,
}

impl CommandResult {
    pub(crate) fn new(
        command: String,
        args: Vec<String>,
        stdout: String,
        stderr: String,
        exit_code: i32,
        started_at: DateTime<Utc>,
        duration_ms: u64,
    ) -> Self {
        Self {
            command,
            args,
            stdout,
            stderr,
            exit_code,
            started_at,
            duration_ms,
            signal: None,
            expect_error: false,
        }
    }

    pub(crate) fn with_signal(mut self, signal: Option<i32>) -> Self {
        self.signal = signal;
        self
    }

    pub(crate) fn expecting_error(mut self) -> Self {
        self.expect_error = true;
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Arguments in the order they were passed to the process, prefix included.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Signal that terminated the process, if any.
    pub fn signal(&self) -> Option<i32> {
        self.signal
    }

    /// True when the command was run by a caller that expects it to fail.
    pub fn expect_error(&self) -> bool {
        self.expect_error
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Renders the invocation the way it would be typed into a shell.
    pub fn command_line(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn quote(token: &str) -> String {
    let plain = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:@,%+".contains(c));
    if plain {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', r"'\''"))
    }
}
