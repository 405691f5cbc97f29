//! Integration tests for the command line surface
//!
//! None of these reach the network: each invocation fails or exits during
//! argument parsing or configuration loading.

use assert_cmd::Command;
use tempfile::TempDir;

fn vacancy_stats(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vacancy-stats").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("SUPERJOB_API_KEY")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_help() {
    let temp_dir = TempDir::new().unwrap();
    let output = vacancy_stats(&temp_dir)
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let help = String::from_utf8_lossy(&output);
    assert!(help.contains("--source"));
    assert!(help.contains("--resilient"));
}

/// SuperJob without a key aborts before any request
#[test]
fn test_superjob_without_key() {
    let temp_dir = TempDir::new().unwrap();
    let output = vacancy_stats(&temp_dir)
        .args(["--source", "superjob"])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();

    let stderr = String::from_utf8_lossy(&output);
    assert!(
        stderr.contains("SUPERJOB_API_KEY"),
        "stderr should name the missing variable: {stderr}"
    );
}

/// The default selection includes SuperJob, so the key is required too
#[test]
fn test_all_sources_without_key() {
    let temp_dir = TempDir::new().unwrap();
    vacancy_stats(&temp_dir).assert().failure();
}

#[test]
fn test_zero_concurrency_rejected() {
    let temp_dir = TempDir::new().unwrap();
    vacancy_stats(&temp_dir)
        .args(["--source", "hh", "--concurrency", "0"])
        .assert()
        .failure();
}

#[test]
fn test_page_size_out_of_range() {
    let temp_dir = TempDir::new().unwrap();
    vacancy_stats(&temp_dir)
        .args(["--source", "hh", "--page-size", "101"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_date_from() {
    let temp_dir = TempDir::new().unwrap();
    vacancy_stats(&temp_dir)
        .args(["--source", "hh", "--hh-date-from", "01.02.2024"])
        .assert()
        .failure();
}

#[test]
fn test_unknown_source() {
    let temp_dir = TempDir::new().unwrap();
    vacancy_stats(&temp_dir)
        .args(["--source", "linkedin"])
        .assert()
        .failure();
}
