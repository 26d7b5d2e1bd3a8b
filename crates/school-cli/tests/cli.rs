use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn school_cli(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("school-cli").expect("binary built");
    cmd.env_remove("SCHOOL_API_URL")
        .env_remove("RUST_LOG")
        .arg("--config-dir")
        .arg(config_dir.path());
    cmd
}

#[test]
fn help_lists_command_groups() {
    let dir = TempDir::new().expect("temp dir");
    school_cli(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("auth"))
        .stdout(predicate::str::contains("payments"))
        .stdout(predicate::str::contains("SCHOOL_API_URL"));
}

#[test]
fn missing_api_url_explains_how_to_set_it() {
    let dir = TempDir::new().expect("temp dir");
    school_cli(&dir)
        .args(["fees", "statement", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("api_url"))
        .stderr(predicate::str::contains("school-cli config set --url"));
}

#[test]
fn unreachable_server_prints_network_message() {
    let dir = TempDir::new().expect("temp dir");
    school_cli(&dir)
        .args(["--api-url", "http://127.0.0.1:1", "fees", "statement", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Network error: Check your internet connection",
        ));
}

#[test]
fn zero_payment_is_rejected_without_server() {
    let dir = TempDir::new().expect("temp dir");
    school_cli(&dir)
        .args([
            "--api-url",
            "http://127.0.0.1:1",
            "payments",
            "submit",
            "4",
            "0",
            "--method",
            "cash",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be greater than 0"));
}

#[test]
fn config_set_then_show() {
    let dir = TempDir::new().expect("temp dir");
    school_cli(&dir)
        .args(["config", "set", "--url", "https://school.example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration saved successfully."));

    assert!(dir.path().join("config.toml").exists());

    school_cli(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://school.example.com"));
}
