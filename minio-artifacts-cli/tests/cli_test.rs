//! End-to-end runs of the `minio-artifacts` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cli(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("minio-artifacts").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("MINIO_ARTIFACTS_CONFIG_FORMAT")
        .env_remove("AWS_ACCESS_KEY_ID")
        .env_remove("AWS_SECRET_ACCESS_KEY")
        .env_remove("AWS_SESSION_TOKEN")
        .env("MINIO_ARTIFACTS_CONFIG_DIR", dir.path())
        .arg("--no-color");
    cmd
}

fn configure(dir: &TempDir) {
    cli(dir)
        .args([
            "set",
            "--endpoint",
            "http://minio.local:9000",
            "--container",
            "my-bucket",
            "--prefix",
            "builds/",
        ])
        .assert()
        .success();
}

#[test]
fn test_check_accepts_valid_values() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args([
            "check",
            "--endpoint",
            "http://minio.local:9000",
            "--container",
            "my-bucket",
            "--prefix",
            "builds/",
        ])
        .assert()
        .success();
}

#[test]
fn test_check_rejects_prefix_without_slash() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["check", "--prefix", "noslash"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("A prefix must end with a slash."));
}

#[test]
fn test_check_json_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let output = cli(&dir)
        .args(["--json", "check", "--container", ""])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["container"]["kind"], "warning");
    assert_eq!(report["container"]["message"], "The container name cannot be empty");
}

#[test]
fn test_set_persists_and_show_reads_back() {
    let dir = TempDir::new().unwrap();
    configure(&dir);

    assert!(dir.path().join("minio-s3-blob-store.toml").exists());

    let output = cli(&dir).args(["--json", "show"]).output().unwrap();
    assert!(output.status.success());
    let settings: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(settings["endpoint"], "http://minio.local:9000");
    assert_eq!(settings["container"], "my-bucket");
    assert_eq!(settings["prefix"], "builds/");
    assert_eq!(settings["delete_artifacts"], false);
}

#[test]
fn test_rejected_container_is_not_saved() {
    let dir = TempDir::new().unwrap();
    configure(&dir);
    let path = dir.path().join("minio-s3-blob-store.toml");
    let before = fs::read_to_string(&path).unwrap();

    cli(&dir)
        .args(["set", "--container", "BAD_NAME!"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not match S3 bucket rules"));

    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_uri_keeps_slash_and_colon() {
    let dir = TempDir::new().unwrap();
    configure(&dir);

    cli(&dir)
        .args(["uri", "a/b:c", "--container", "my-bucket"])
        .assert()
        .success()
        .stdout("http://minio.local:9000/minio/my-bucket/a/b:c\n");
}

#[test]
fn test_presign_get() {
    let dir = TempDir::new().unwrap();
    configure(&dir);

    cli(&dir)
        .env("AWS_ACCESS_KEY_ID", "minio")
        .env("AWS_SECRET_ACCESS_KEY", "minio123")
        .args(["presign", "builds/job-1/log.txt"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "http://minio.local:9000/my-bucket/builds/job-1/log.txt?",
        ))
        .stdout(predicate::str::contains("X-Amz-Expires=3600"));
}

#[test]
fn test_presign_rejects_delete() {
    let dir = TempDir::new().unwrap();
    configure(&dir);

    cli(&dir)
        .args(["presign", "a", "--method", "DELETE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP Method DELETE not supported for S3"));
}

#[test]
fn test_presign_without_credentials_fails() {
    let dir = TempDir::new().unwrap();
    configure(&dir);

    cli(&dir)
        .args(["presign", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("AWS_ACCESS_KEY_ID is not set"));
}

#[test]
fn test_env_file_supplies_credentials() {
    let dir = TempDir::new().unwrap();
    configure(&dir);
    let env_file = dir.path().join("minio.env");
    fs::write(&env_file, "AWS_ACCESS_KEY_ID=minio\nAWS_SECRET_ACCESS_KEY=minio123\n").unwrap();

    cli(&dir)
        .arg("--env-file")
        .arg(&env_file)
        .args(["presign", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("X-Amz-Credential=minio"));
}

#[test]
fn test_missing_env_file_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();

    cli(&dir)
        .args(["--env-file", "does-not-exist.env", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
