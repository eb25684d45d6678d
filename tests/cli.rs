//! Tests for the binary's exit behaviour and output channels.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use serial_test::serial;
use tempfile::TempDir;

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_platform-complete"));
    cmd.env_remove("RUST_LOG").env_remove("AWS_PROFILE");
    cmd
}

#[test]
fn test_profiles_lists_names_from_env_paths() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("config");
    let credentials = temp_dir.path().join("credentials");
    fs::write(&config, "[default]\n[profile staging]\n").unwrap();
    fs::write(&credentials, "[ci]\n").unwrap();

    let output = bin()
        .arg("profiles")
        .env("AWS_CONFIG_FILE", &config)
        .env("AWS_SHARED_CREDENTIALS_FILE", &credentials)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "default\nstaging\nci\n"
    );
}

#[test]
fn test_completions_script_for_bash() {
    let output = bin().args(["completions", "bash"]).output().unwrap();
    assert!(output.status.success());
    let script = String::from_utf8_lossy(&output.stdout);
    assert!(script.contains("platform-complete"));
}

#[test]
fn test_completions_rejects_unknown_shell() {
    let output = bin().args(["completions", "tcsh"]).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid value 'tcsh'"));
}

#[test]
fn test_hook_routes_target_through_complete() {
    let output = bin().args(["hook", "bash", "platctl"]).output().unwrap();
    assert!(output.status.success());
    let script = String::from_utf8_lossy(&output.stdout);
    assert!(script.contains("platform-complete complete"));
    assert!(script.contains("complete -F __platform_complete_platctl platctl"));
}

fn write_profiles(dir: &Path) -> PathBuf {
    let config = dir.join("aws-config");
    fs::write(&config, "[default]\n[profile staging]\n").unwrap();
    config
}

#[test]
fn test_profile_completion_works_without_aws_cli() {
    let temp_dir = TempDir::new().unwrap();
    let settings = temp_dir.path().join("config.toml");
    fs::write(&settings, "aws_cli = \"no-such-aws-cli-on-path\"\n").unwrap();
    let config = write_profiles(temp_dir.path());

    let output = bin()
        .args(["--config"])
        .arg(&settings)
        .args(["complete", "ctl --profile sta"])
        .env("AWS_CONFIG_FILE", &config)
        .env("AWS_SHARED_CREDENTIALS_FILE", temp_dir.path().join("missing"))
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "staging\n");
}

#[test]
fn test_id_completion_without_aws_cli_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let settings = temp_dir.path().join("config.toml");
    fs::write(&settings, "aws_cli = \"no-such-aws-cli-on-path\"\n").unwrap();
    let empty = temp_dir.path().join("missing");

    let output = bin()
        .args(["--config"])
        .arg(&settings)
        .args(["complete", "ctl --id "])
        .env("AWS_CONFIG_FILE", &empty)
        .env("AWS_SHARED_CREDENTIALS_FILE", &empty)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert_ne!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no-such-aws-cli-on-path"));
}

/// An `aws` stand-in that logs `<profile> <secret id>` per call and always
/// returns a token. The catalog address points at a closed port.
#[cfg(unix)]
fn recording_setup(dir: &Path) -> (PathBuf, PathBuf) {
    use std::os::unix::fs::PermissionsExt;

    let log = dir.join("aws-calls.log");
    let cli = dir.join("aws");
    fs::write(
        &cli,
        format!(
            "#!/bin/sh\necho \"$8 $4\" >> {}\necho '{{\"SecretString\":\"token\"}}'\n",
            log.display()
        ),
    )
    .unwrap();
    fs::set_permissions(&cli, fs::Permissions::from_mode(0o755)).unwrap();

    let settings = dir.join("config.toml");
    fs::write(
        &settings,
        format!(
            "aws_cli = \"{}\"\naddress_template = \"http://127.0.0.1:9/{{env}}/\"\nconnect_timeout_secs = 1\nrequest_timeout_secs = 1\n",
            cli.display()
        ),
    )
    .unwrap();
    (settings, log)
}

#[cfg(unix)]
fn secret_calls(log: &Path) -> Vec<String> {
    fs::read_to_string(log)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

#[cfg(unix)]
#[test]
#[serial]
fn test_named_profile_line_fetches_one_secret() {
    let temp_dir = TempDir::new().unwrap();
    let (settings, log) = recording_setup(temp_dir.path());
    let config = write_profiles(temp_dir.path());

    let output = bin()
        .args(["--config"])
        .arg(&settings)
        .args(["complete", "ctl --profile staging --id "])
        .env("AWS_CONFIG_FILE", &config)
        .env("AWS_SHARED_CREDENTIALS_FILE", temp_dir.path().join("missing"))
        .output()
        .unwrap();

    // the catalog is unreachable, which degrades to no suggestions
    assert!(output.status.success());
    assert_eq!(secret_calls(&log), vec!["staging mm-eng/consul"]);
}

#[cfg(unix)]
#[test]
#[serial]
fn test_not_handled_line_fetches_no_secret() {
    let temp_dir = TempDir::new().unwrap();
    let (settings, log) = recording_setup(temp_dir.path());
    let config = write_profiles(temp_dir.path());

    let output = bin()
        .args(["--config"])
        .arg(&settings)
        .args(["complete", "ctl deploy "])
        .env("AWS_CONFIG_FILE", &config)
        .env("AWS_SHARED_CREDENTIALS_FILE", temp_dir.path().join("missing"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
    assert!(secret_calls(&log).is_empty());
}

#[test]
fn test_invalid_config_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let settings = temp_dir.path().join("config.toml");
    fs::write(&settings, "address_template = \"http://consul.example\"\n").unwrap();

    let output = bin()
        .args(["--config"])
        .arg(&settings)
        .args(["complete", "ctl --profile "])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("{env}"));
}
