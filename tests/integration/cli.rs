//! Binary-level tests

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use tempfile::TempDir;

/// Command isolated from the invoking environment
fn setup_angle(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("setup-angle");
    cmd.env("SETUP_ANGLE_CONFIG", temp.path().join("config.toml"))
        .env("RUNNER_TOOL_CACHE", temp.path().join("toolcache"))
        .env("RUNNER_TEMP", temp.path().join("tmp"))
        .env_remove("INPUT_ANGLE-BRANCH")
        .env_remove("INPUT_BRANCH")
        .env_remove("GITHUB_OUTPUT")
        .env_remove("S3_ENDPOINT_URL")
        .env_remove("S3_BUCKET_NAME")
        .env_remove("S3_PATH_PREFIX");
    cmd
}

#[test]
fn help_displays() {
    let temp = TempDir::new().unwrap();
    setup_angle(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pre-built ANGLE binaries"));
}

#[test]
fn version_displays() {
    let temp = TempDir::new().unwrap();
    setup_angle(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("setup-angle"));
}

#[test]
fn branches_plain_lists_newest_first() {
    let temp = TempDir::new().unwrap();
    setup_angle(&temp)
        .args(["branches", "--format", "plain"])
        .assert()
        .success()
        .stdout("fdff117\nchromium/5615\n");
}

#[test]
fn branches_json_marks_default() {
    let temp = TempDir::new().unwrap();
    setup_angle(&temp)
        .args(["branches", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"default\": true"));
}

#[test]
fn unsupported_branch_fails_without_outputs() {
    let temp = TempDir::new().unwrap();
    let output_file = temp.path().join("github_output");

    setup_angle(&temp)
        .env("GITHUB_OUTPUT", &output_file)
        .env("INPUT_ANGLE-BRANCH", "chromium/1")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "::error::Unsupported ANGLE branch 'chromium/1'",
        ))
        .stdout(predicate::str::contains("fdff117, chromium/5615"));

    assert!(!output_file.exists());
}

#[cfg(target_os = "linux")]
#[test]
fn linux_host_is_unsupported() {
    let temp = TempDir::new().unwrap();
    setup_angle(&temp)
        .assert()
        .failure()
        .stdout(predicate::str::contains("::error::Unsupported platform: linux"));
}

#[test]
fn legacy_branch_input_is_ignored() {
    let temp = TempDir::new().unwrap();
    // An invalid legacy value must not be validated
    setup_angle(&temp)
        .env("INPUT_BRANCH", "not-a-branch")
        .env("INPUT_ANGLE-BRANCH", "also-not-a-branch")
        .assert()
        .failure()
        .stdout(predicate::str::contains("'also-not-a-branch'"))
        .stdout(predicate::str::contains("'not-a-branch'").not());
}

#[test]
fn cache_list_on_empty_cache() {
    let temp = TempDir::new().unwrap();
    setup_angle(&temp)
        .args(["cache", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No cached ANGLE installations"));
}

#[test]
fn config_path_honors_override() {
    let temp = TempDir::new().unwrap();
    setup_angle(&temp)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_show_applies_environment() {
    let temp = TempDir::new().unwrap();
    setup_angle(&temp)
        .env("S3_BUCKET_NAME", "from-environment")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bucket = \"from-environment\""))
        .stdout(predicate::str::contains("[storage]"));
}

#[test]
fn invalid_config_file_is_reported() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.toml"), "[storage\n").unwrap();

    setup_angle(&temp)
        .args(["branches"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn invalid_config_fails_install_run_through_ci_host() {
    let temp = TempDir::new().unwrap();
    let output_file = temp.path().join("github_output");
    std::fs::write(temp.path().join("config.toml"), "[storage\n").unwrap();

    setup_angle(&temp)
        .env("GITHUB_OUTPUT", &output_file)
        .assert()
        .failure()
        .stdout(predicate::str::starts_with(
            "::error::Invalid configuration at ",
        ));

    assert!(!output_file.exists());
}

#[test]
fn empty_runner_locations_count_as_unset() {
    let temp = TempDir::new().unwrap();
    setup_angle(&temp)
        .env("RUNNER_TOOL_CACHE", "")
        .env("RUNNER_TEMP", "")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[storage]"));
}

#[cfg(target_os = "linux")]
#[test]
fn empty_runner_locations_reach_the_install_run() {
    let temp = TempDir::new().unwrap();
    setup_angle(&temp)
        .env("RUNNER_TOOL_CACHE", "")
        .env("RUNNER_TEMP", "")
        .assert()
        .failure()
        .stdout(predicate::str::contains("::error::Unsupported platform: linux"));
}
