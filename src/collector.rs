use crate::error::{E2eError, Result};
use crate::matching;
use crate::result::CommandResult;
use crate::runner::CommandRunner;
use std::fmt::Write as _;

/// Runs commands through a [`CommandRunner`] and keeps every result for later diagnosis.
#[derive(Debug)]
pub struct ResultCollector<'a> {
    runner: &'a CommandRunner,
    image: String,
    results: Vec<CommandResult>,
}

impl<'a> ResultCollector<'a> {
    pub fn new(runner: &'a CommandRunner, image: impl Into<String>) -> Self {
        Self {
            runner,
            image: image.into(),
            results: Vec::new(),
        }
    }

    pub fn runner(&self) -> &CommandRunner {
        self.runner
    }

    pub fn namespace(&self) -> &str {
        self.runner.namespace()
    }

    /// Image used when a scenario creates a service.
    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn results(&self) -> &[CommandResult] {
        &self.results
    }

    pub fn run<S: AsRef<str>>(&mut self, args: &[S]) -> CommandResult {
        let result = self.runner.run(args);
        self.results.push(result.clone());
        result
    }

    /// Runs a command the caller expects to fail; pair with [`Self::assert_error`].
    pub fn run_expect_error<S: AsRef<str>>(&mut self, args: &[S]) -> CommandResult {
        let result = self.runner.run(args).expecting_error();
        self.results.push(result.clone());
        result
    }

    pub fn assert_no_error(&self, result: &CommandResult) -> Result<()> {
        if result.success() {
            return Ok(());
        }
        Err(E2eError::CommandFailed {
            command: result.command_line(),
            exit_code: result.exit_code(),
            stderr: result.stderr().to_string(),
        })
    }

    /// Succeeds only when the command failed.
    pub fn assert_error(&self, result: &CommandResult) -> Result<()> {
        if !result.success() {
            return Ok(());
        }
        Err(E2eError::UnexpectedSuccess {
            command: result.command_line(),
            stdout: result.stdout().to_string(),
        })
    }

    pub fn assert_stdout_contains_all(&self, result: &CommandResult, needles: &[&str]) -> Result<()> {
        check_missing(result, matching::missing(result.stdout(), needles))
    }

    pub fn assert_stdout_contains_all_ignore_case(
        &self,
        result: &CommandResult,
        needles: &[&str],
    ) -> Result<()> {
        check_missing(result, matching::missing_ignore_case(result.stdout(), needles))
    }

    pub fn assert_stdout_contains_none(&self, result: &CommandResult, needles: &[&str]) -> Result<()> {
        let found = matching::present(result.stdout(), needles);
        if found.is_empty() {
            return Ok(());
        }
        Err(E2eError::UnexpectedOutput {
            command: result.command_line(),
            found,
            stdout: result.stdout().to_string(),
        })
    }

    /// Every command run so far with its exit code and output.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== {} command(s) in namespace {:?} ===",
            self.results.len(),
            self.namespace()
        );
        for (index, result) in self.results.iter().enumerate() {
            let _ = writeln!(
                out,
                "[{}] {} {}\n    exit code: {} ({} ms){}",
                index + 1,
                result.started_at().format("%H:%M:%S%.3f"),
                result.command_line(),
                result.exit_code(),
                result.duration_ms(),
                if result.expect_error() {
                    ", error expected"
                } else {
                    ""
                }
            );
            write_stream(&mut out, "stdout", result.stdout());
            write_stream(&mut out, "stderr", result.stderr());
        }
        out
    }
}

fn check_missing(result: &CommandResult, missing: Vec<String>) -> Result<()> {
    if missing.is_empty() {
        return Ok(());
    }
    Err(E2eError::MissingOutput {
        command: result.command_line(),
        missing,
        stdout: result.stdout().to_string(),
    })
}

fn write_stream(out: &mut String, label: &str, content: &str) {
    if content.is_empty() {
        return;
    }
    let _ = writeln!(out, "    --- {label} ---");
    for line in content.lines() {
        let _ = writeln!(out, "    {line}");
    }
}
