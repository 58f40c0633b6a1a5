mod cli;

use clap::Parser;
use kn_e2e::config;
use kn_e2e::namespace::{next_namespace, NamespaceManager};
use kn_e2e::report;
use kn_e2e::types::config::E2eConfig;
use kn_e2e::workflow;
use kn_e2e::{CommandRunner, E2eError, ResultCollector};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const FAILED: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_config(args: &cli::ClientArgs) -> Result<E2eConfig, E2eError> {
    if !args.config_dir.is_dir() {
        return Err(E2eError::PathNotFound(
            args.config_dir.display().to_string(),
        ));
    }
    let mut cfg = config::load_config(&args.config_dir)?;
    if let Some(kn) = &args.kn {
        cfg.client.binary = kn.clone();
    }
    Ok(cfg)
}

fn run() -> Result<i32, E2eError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    match cli.command {
        cli::Commands::Workflow(cmd) => run_workflow(&cmd, cli.quiet),
        cli::Commands::Exec(cmd) => run_exec(&cmd),
    }
}

fn run_workflow(cmd: &cli::WorkflowCommand, quiet: bool) -> Result<i32, E2eError> {
    let mut cfg = load_config(&cmd.client)?;
    if let Some(image) = &cmd.image {
        cfg.test.image = image.clone();
    }
    let service = cmd
        .service
        .clone()
        .unwrap_or_else(|| cfg.test.service.clone());
    let namespace = cmd
        .client
        .namespace
        .clone()
        .or_else(|| cfg.test.namespace.clone())
        .unwrap_or_else(|| next_namespace(&cfg.test.namespace_prefix));

    let namespaces = cmd
        .create_namespace
        .then(|| NamespaceManager::new(CommandRunner::from_kubectl_config(&cfg.kubectl)));
    if let Some(manager) = &namespaces {
        manager.create(&namespace)?;
    }

    let runner = CommandRunner::from_client_config(&cfg.client, namespace.as_str());
    let mut collector = ResultCollector::new(&runner, cfg.test.image.as_str());
    info!(%namespace, %service, binary = runner.binary(), "running service workflow");
    let outcome = workflow::basic_workflow(&mut collector, &service);

    if let Some(manager) = &namespaces {
        if let Err(e) = manager.delete(&namespace) {
            warn!(%namespace, error = %e, "namespace cleanup failed");
        }
    }

    let workflow_report = outcome?;
    let format = match cmd.format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Text => report::OutputFormat::Text,
    };

    if workflow_report.passed() {
        if !quiet {
            println!("{}", report::render(&workflow_report, format)?);
        }
        Ok(exit_code::SUCCESS)
    } else {
        println!("{}", report::render(&workflow_report, format)?);
        eprint!("{}", collector.dump());
        Ok(exit_code::FAILED)
    }
}

fn run_exec(cmd: &cli::ExecCommand) -> Result<i32, E2eError> {
    let cfg = load_config(&cmd.client)?;
    let namespace = cmd
        .client
        .namespace
        .clone()
        .or_else(|| cfg.test.namespace.clone())
        .unwrap_or_default();

    let runner = CommandRunner::from_client_config(&cfg.client, namespace);
    let result = runner.run(cmd.args.as_slice());
    println!("{}", serde_json::to_string_pretty(&result)?);

    if result.success() {
        Ok(exit_code::SUCCESS)
    } else {
        Ok(exit_code::FAILED)
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            let code = if e.is_scenario_failure() {
                exit_code::FAILED
            } else {
                exit_code::RUNTIME_FAILURE
            };
            std::process::exit(code);
        }
    }
}
