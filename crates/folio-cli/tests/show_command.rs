use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_show_help_lists_commands() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["show", "help", "--instant"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Available commands:"))
        .stdout(predicate::str::contains("projects"))
        .stdout(predicate::str::contains("welcome").not());
}

#[test]
fn test_show_unknown_command_prints_not_found() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["show", "xyz", "--instant"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "command not found: xyz. type 'help' to see available commands.",
        ));
}

#[test]
fn test_show_echo_uses_configured_prompt() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        r#"
prompt = "guest$"

[[commands]]
name = "blog"
description = "Posts"
output = "Read it at https://blog.example.com"
"#,
    )
    .unwrap();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["show", "BLOG", "--instant", "--echo"])
        .assert()
        .success()
        .stdout("guest$ blog\nRead it at https://blog.example.com\n");
}

#[test]
fn test_show_rejects_invalid_config() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "prompt = [").unwrap();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["show", "about"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn test_commands_lists_configured_command() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[[commands]]\nname = \"blog\"\ndescription = \"Posts\"\noutput = \"soon\"\n",
    )
    .unwrap();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .arg("commands")
        .assert()
        .success()
        .stdout(predicate::str::contains("blog"))
        .stdout(predicate::str::contains("welcome").not());
}
