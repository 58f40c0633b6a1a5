use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kn-e2e",
    version,
    about = "End-to-end checks for the kn client's service commands"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the service create/list/describe/update/delete lifecycle
    Workflow(WorkflowCommand),
    /// Run a single client command and print the captured result as JSON
    Exec(ExecCommand),
}

/// Settings shared by every subcommand that talks to the client.
#[derive(Args)]
pub struct ClientArgs {
    /// Directory holding kn-e2e.toml
    #[arg(long, default_value = ".")]
    pub config_dir: PathBuf,

    /// Path to the client binary
    #[arg(long)]
    pub kn: Option<String>,

    /// Namespace to run in; derived from the configured prefix when omitted
    #[arg(short, long)]
    pub namespace: Option<String>,
}

#[derive(Args)]
pub struct WorkflowCommand {
    #[command(flatten)]
    pub client: ClientArgs,

    /// Name of the service to create
    #[arg(long)]
    pub service: Option<String>,

    /// Image the service is created from
    #[arg(long)]
    pub image: Option<String>,

    /// Create the namespace with kubectl first and delete it afterwards
    #[arg(long)]
    pub create_namespace: bool,

    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct ExecCommand {
    #[command(flatten)]
    pub client: ClientArgs,

    /// Arguments passed to the client
    #[arg(last = true, required = true)]
    pub args: Vec<String>,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Text,
}
