use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("command `{command}` exited with code {exit_code}: {stderr}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("command `{command}` succeeded but was expected to fail\n--- stdout ---\n{stdout}")]
    UnexpectedSuccess { command: String, stdout: String },

    #[error("output of `{command}` is missing {missing:?}\n--- stdout ---\n{stdout}")]
    MissingOutput {
        command: String,
        missing: Vec<String>,
        stdout: String,
    },

    #[error("output of `{command}` unexpectedly contains {found:?}\n--- stdout ---\n{stdout}")]
    UnexpectedOutput {
        command: String,
        found: Vec<String>,
        stdout: String,
    },

    #[error("invalid service name: {0:?}")]
    InvalidServiceName(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl E2eError {
    /// True for failures of the client under test, as opposed to harness setup problems.
    pub fn is_scenario_failure(&self) -> bool {
        matches!(
            self,
            Self::CommandFailed { .. }
                | Self::UnexpectedSuccess { .. }
                | Self::MissingOutput { .. }
                | Self::UnexpectedOutput { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, E2eError>;
