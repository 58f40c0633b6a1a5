#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Writes a kn-e2e.toml that routes kn and kubectl to the shell stand-ins.
fn write_fake_config(dir: &Path, state: &Path) {
    let config = format!(
        r#"
[client]
binary = "sh"
prefix_args = ['{kn}']

[client.env]
FAKE_KN_STATE = '{state}'

[kubectl]
binary = "sh"
prefix_args = ['{kubectl}']

[kubectl.env]
FAKE_KN_STATE = '{state}'

[test]
service = "hello"
"#,
        kn = fixture("fake-kn.sh").display(),
        kubectl = fixture("fake-kubectl.sh").display(),
        state = state.display(),
    );
    fs::write(dir.join("kn-e2e.toml"), config).expect("config should write");
}

struct Sandbox {
    home: TempDir,
    config: TempDir,
    state: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let sandbox = Self {
            home: TempDir::new().expect("home dir should be created"),
            config: TempDir::new().expect("config dir should be created"),
            state: TempDir::new().expect("state dir should be created"),
        };
        write_fake_config(sandbox.config.path(), sandbox.state.path());
        sandbox
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("kn-e2e").expect("binary should compile");
        cmd.env("HOME", self.home.path())
            .env_remove("KN_E2E_BINARY")
            .env_remove("KN_E2E_NAMESPACE")
            .env_remove("KN_E2E_IMAGE")
            .env_remove("RUST_LOG");
        cmd
    }

    fn config_dir(&self) -> &Path {
        self.config.path()
    }
}

#[test]
fn workflow_passes_against_fake_client() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("workflow")
        .arg("--config-dir")
        .arg(sandbox.config_dir())
        .args(["--namespace", "kne2etests-cli"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("service hello in namespace kne2etests-cli"))
        .stdout(predicate::str::contains("[ok] service delete"))
        .stdout(predicate::str::contains("result: passed (9/9 steps passed)"));
}

#[test]
fn workflow_json_report_lists_steps() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("workflow")
        .arg("--config-dir")
        .arg(sandbox.config_dir())
        .args(["--service", "greeter", "--format", "json"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"service\": \"greeter\""))
        .stdout(predicate::str::contains("\"namespace\": \"kne2etests"))
        .stdout(predicate::str::contains("\"status\": \"passed\""))
        .stdout(predicate::str::contains("\"status\": \"failed\"").not());
}

#[test]
fn workflow_creates_and_removes_namespace() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("workflow")
        .arg("--config-dir")
        .arg(sandbox.config_dir())
        .args(["--namespace", "scratch", "--create-namespace", "--image", "registry.local/hello:v1"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("(image registry.local/hello:v1)"));

    assert!(!sandbox.state.path().join("scratch").exists());
}

#[test]
fn workflow_fails_when_namespace_is_not_empty() {
    let sandbox = Sandbox::new();
    let namespace_dir = sandbox.state.path().join("dirty");
    fs::create_dir_all(&namespace_dir).expect("namespace dir should create");
    fs::write(namespace_dir.join("leftover"), "img\n").expect("leftover service should write");

    sandbox
        .cmd()
        .arg("workflow")
        .arg("--config-dir")
        .arg(sandbox.config_dir())
        .args(["--namespace", "dirty"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[FAILED] service list (empty)"))
        .stdout(predicate::str::contains("No services found."))
        .stderr(predicate::str::contains("1 command(s) in namespace \"dirty\""))
        .stderr(predicate::str::contains("leftover"));
}

#[test]
fn workflow_reports_missing_client_binary() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("workflow")
        .arg("--config-dir")
        .arg(sandbox.config_dir())
        .args(["--kn", "kn-e2e-definitely-not-installed"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("failed to run kn-e2e-definitely-not-installed"));
}

#[test]
fn workflow_rejects_missing_config_dir() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("workflow")
        .arg("--config-dir")
        .arg(sandbox.config_dir().join("absent"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("path does not exist"))
        .stderr(predicate::str::contains("absent"));
}

#[test]
fn workflow_rejects_broken_config() {
    let sandbox = Sandbox::new();
    fs::write(sandbox.config_dir().join("kn-e2e.toml"), "[client\n").expect("config should write");

    sandbox
        .cmd()
        .arg("workflow")
        .arg("--config-dir")
        .arg(sandbox.config_dir())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("config parse error"));
}

#[test]
fn namespace_creation_failure_is_a_command_failure() {
    let sandbox = Sandbox::new();
    fs::create_dir_all(sandbox.state.path().join("taken")).expect("namespace dir should create");

    sandbox
        .cmd()
        .arg("workflow")
        .arg("--config-dir")
        .arg(sandbox.config_dir())
        .args(["--namespace", "taken", "--create-namespace"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn exec_prints_captured_result_as_json() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("exec")
        .arg("--config-dir")
        .arg(sandbox.config_dir())
        .args(["-n", "ns1", "--", "service", "list"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"stdout\": \"No services found.\\n\""))
        .stdout(predicate::str::contains("\"exit_code\": 0"))
        .stdout(predicate::str::contains("\"ns1\""));
}

#[test]
fn exec_mirrors_client_failure() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("exec")
        .arg("--config-dir")
        .arg(sandbox.config_dir())
        .args(["--", "service", "describe", "ghost"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"exit_code\": 1"))
        .stdout(predicate::str::contains("not found"));
}

#[test]
fn env_override_replaces_client_binary() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("KN_E2E_BINARY", "kn-e2e-definitely-not-installed")
        .arg("exec")
        .arg("--config-dir")
        .arg(sandbox.config_dir())
        .args(["--", "version"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"exit_code\": -1"));
}
