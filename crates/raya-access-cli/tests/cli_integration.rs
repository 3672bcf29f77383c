//! Integration tests for the `raya-access` binary.
//!
//! Only paths that fail before any registry call are exercised here, so no
//! network access is needed.

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn raya_access_command(args: &[&str], cwd: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_raya-access"));
    cmd.args(args)
        .current_dir(cwd.path())
        .env("HOME", cwd.path())
        .env("NO_COLOR", "1")
        .env_remove("RAYA_REGISTRY")
        .env_remove("RAYA_TOKEN")
        .env_remove("RAYA_LOG");
    cmd
}

fn raya_access(args: &[&str], cwd: &TempDir) -> Output {
    raya_access_command(args, cwd)
        .output()
        .expect("failed to run raya-access")
}

#[test]
fn test_missing_subcommand_prints_usage() {
    let dir = TempDir::new().unwrap();
    let out = raya_access(&[], &dir);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Usage: Subcommand is required."));
    assert!(stderr.contains("raya-access grant <read-only|read-write> <scope:team> [<package>]"));
}

#[test]
fn test_public_on_unscoped_manifest() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("raya.toml"), "[package]\nname = \"unscoped\"\n").unwrap();

    let out = raya_access(&["public"], &dir);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr)
        .contains("Usage: This command is only available for scoped packages."));
}

#[test]
fn test_edit_fails() {
    let dir = TempDir::new().unwrap();
    let out = raya_access(&["edit", "@scoped/another"], &dir);

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("edit subcommand is not implemented yet"));
}

#[test]
fn test_complete_grant() {
    let dir = TempDir::new().unwrap();
    let out = raya_access(&["--complete", "raya", "access", "grant"], &dir);

    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "read-only\nread-write\n");
}

#[test]
fn test_complete_unrecognized() {
    let dir = TempDir::new().unwrap();
    let out = raya_access(&["--complete", "raya", "access", "foobar"], &dir);

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("foobar not recognized"));
}

#[test]
fn test_usage_error_reported_before_bad_registry_url() {
    let dir = TempDir::new().unwrap();
    let out = raya_access_command(&[], &dir)
        .env("RAYA_REGISTRY", "not a url")
        .output()
        .expect("failed to run raya-access");

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Usage: Subcommand is required."), "stderr: {stderr}");
    assert!(!stderr.contains("Invalid registry URL"));
}

#[test]
fn test_team_error_reported_before_bad_registry_url() {
    let dir = TempDir::new().unwrap();
    let out = raya_access_command(&["grant", "read-only", "foo", "@scoped/another"], &dir)
        .env("RAYA_REGISTRY", "not a url")
        .output()
        .expect("failed to run raya-access");

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr)
        .contains("Usage: Second argument used incorrect format."));
}

#[test]
fn test_edit_reported_before_malformed_credentials() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join(".raya")).unwrap();
    fs::write(dir.path().join(".raya/credentials.toml"), "[registries\n").unwrap();

    let out = raya_access(&["edit", "@scoped/another"], &dir);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("edit subcommand is not implemented yet"), "stderr: {stderr}");
    assert!(!stderr.contains("credentials.toml"));
}

#[test]
fn test_malformed_credentials_reported_for_valid_command() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join(".raya")).unwrap();
    fs::write(dir.path().join(".raya/credentials.toml"), "[registries\n").unwrap();

    let out = raya_access(&["2fa-required", "@scoped/another"], &dir);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("credentials.toml"));
}
