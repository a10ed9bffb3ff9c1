#![allow(clippy::unwrap_used)]
//! CLI smoke tests to verify basic command functionality.
//!
//! Everything here runs without network access and without a TTY.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn lingua(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lingua").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("NO_COLOR", "1")
        .env_remove("API_KEY");
    cmd
}

fn write_config(config_home: &TempDir, contents: &str) {
    let dir = config_home.path().join("lingua-buddy");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), contents).unwrap();
}

#[test]
fn test_help_displays_usage() {
    let home = TempDir::new().unwrap();
    lingua(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("AI tutor"))
        .stdout(predicate::str::contains("--language"))
        .stdout(predicate::str::contains("--model"))
        .stdout(predicate::str::contains("--endpoint"));
}

#[test]
fn test_version_displays_version() {
    let home = TempDir::new().unwrap();
    lingua(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_languages_list() {
    let home = TempDir::new().unwrap();
    lingua(&home)
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("Spanish"))
        .stdout(predicate::str::contains("Japanese"))
        .stdout(predicate::str::contains("pt"));
}

#[test]
fn test_unsupported_language_is_usage_error() {
    let home = TempDir::new().unwrap();
    lingua(&home)
        .args(["--language", "Klingon"])
        .assert()
        .code(exitcode::USAGE)
        .stderr(predicate::str::contains("Unsupported language: 'Klingon'"));
}

#[test]
fn test_unsupported_language_in_config_file_is_usage_error() {
    let home = TempDir::new().unwrap();
    write_config(&home, "[lingua]\nlanguage = \"Elvish\"\n");

    lingua(&home)
        .assert()
        .code(exitcode::USAGE)
        .stderr(predicate::str::contains("Elvish"));
}

#[test]
fn test_broken_config_is_configuration_error() {
    let home = TempDir::new().unwrap();
    write_config(&home, "[lingua\nlanguage = ");

    lingua(&home)
        .args(["configure", "--show"])
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_configure_show_without_config() {
    let home = TempDir::new().unwrap();
    lingua(&home)
        .args(["configure", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current defaults"))
        .stdout(predicate::str::contains("(not set, export API_KEY)"));
}

#[test]
fn test_configure_show_reads_config_file() {
    let home = TempDir::new().unwrap();
    write_config(
        &home,
        "[lingua]\nlanguage = \"Italian\"\nmodel = \"gemini-2.5-pro\"\n\n[provider]\napi_key = \"from-file\"\n",
    );

    lingua(&home)
        .args(["configure", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Italian"))
        .stdout(predicate::str::contains("gemini-2.5-pro"))
        .stdout(predicate::str::contains("(set)"));
}
