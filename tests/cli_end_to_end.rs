#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use httpmock::MockServer;
use predicates::str::contains;
use tempfile::TempDir;

fn fmeflow() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fmeflow"));
    cmd.env_remove("FMESERVER_CLI_CONFIG")
        .env_remove("FMEFLOW_LOG_LEVEL")
        .env_remove("FMEFLOW_LOG_JSON")
        .env_remove("RUST_LOG");
    cmd
}

fn write_profile(dir: &TempDir, url: &str, build: u32) -> std::path::PathBuf {
    let path = dir.path().join("profile.yaml");
    fs::write(&path, format!("build: {build}\ntoken: abc\nurl: {url}\n")).expect("write profile");
    path
}

#[test]
fn login_with_token_writes_the_profile() {
    let server = MockServer::start();
    let version = server.mock(|when, then| {
        when.method("GET")
            .path("/fmeapiv4/version")
            .header("authorization", "Bearer abc");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"buildNumber":25300}"#);
    });

    let dir = TempDir::new().expect("tmp dir");
    let path = dir.path().join("p.yaml");
    fmeflow()
        .arg("login")
        .arg(server.base_url())
        .args(["--token", "abc", "--config"])
        .arg(&path)
        .assert()
        .success();

    version.assert();
    assert_eq!(
        fs::read_to_string(&path).expect("profile"),
        format!("build: 25300\ntoken: abc\nurl: {}\n", server.base_url())
    );
}

#[test]
fn backup_downloads_into_the_named_file() {
    let server = MockServer::start();
    let download = server.mock(|when, then| {
        when.method("GET")
            .path("/fmerest/v3/migration/backup/download")
            .header("authorization", "fmetoken token=abc");
        then.status(200)
            .header("content-type", "application/octet-stream")
            .body("Random file contents");
    });

    let dir = TempDir::new().expect("tmp dir");
    let profile = write_profile(&dir, &server.base_url(), 25300);
    let assert = fmeflow()
        .current_dir(dir.path())
        .args(["backup", "--file", "out.fsconfig", "--config"])
        .arg(&profile)
        .assert()
        .success();

    download.assert();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert_eq!(stdout, "FME Server backed up to out.fsconfig\n");
    assert_eq!(
        fs::read(dir.path().join("out.fsconfig")).expect("backup file"),
        b"Random file contents"
    );
}

#[test]
fn project_delete_all_reaches_the_v4_endpoint() {
    let server = MockServer::start();
    let delete = server.mock(|when, then| {
        when.method("DELETE")
            .path("/fmeapiv4/projects/X/delete-all")
            .query_param("deleteDependencies", "true");
        then.status(204);
    });

    let dir = TempDir::new().expect("tmp dir");
    let profile = write_profile(&dir, &server.base_url(), 25300);
    fmeflow()
        .args([
            "projects",
            "delete",
            "--id",
            "X",
            "--all",
            "--dependencies",
            "--no-prompt",
            "--config",
        ])
        .arg(&profile)
        .assert()
        .success()
        .stdout("Project successfully deleted.\n");
    delete.assert();
}

#[test]
fn server_error_body_is_printed_under_json() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/fmeapiv4/repositories/missing");
        then.status(404)
            .header("content-type", "application/json")
            .body(r#"{"message":"Repository not found"}"#);
    });

    let dir = TempDir::new().expect("tmp dir");
    let profile = write_profile(&dir, &server.base_url(), 25300);
    fmeflow()
        .args(["repositories", "--name", "missing", "--json", "--config"])
        .arg(&profile)
        .assert()
        .code(1)
        .stdout(contains("\"message\": \"Repository not found\""))
        .stderr(contains("Repository not found (HTTP 404)"));
}

#[test]
fn missing_profile_points_at_login() {
    let dir = TempDir::new().expect("tmp dir");
    fmeflow()
        .args(["info", "--config"])
        .arg(dir.path().join("absent.yaml"))
        .assert()
        .code(1)
        .stderr(contains("fmeflow login"));
}

#[test]
fn invalid_custom_columns_fail_before_any_request() {
    for spec in ["custom-columns=", "custom-columns=FOO.bar"] {
        fmeflow()
            .args(["engines", "--output", spec, "--config"])
            .arg(Path::new("/nonexistent/profile.yaml"))
            .assert()
            .code(1)
            .stderr(contains("invalid value"));
    }
}

#[test]
fn exclusive_flags_are_rejected() {
    fmeflow()
        .args(["jobs", "--running", "--completed"])
        .assert()
        .code(1)
        .stderr(contains("cannot be used with"));
    fmeflow()
        .args(["run", "--repository", "r", "--workspace", "w.fmw"])
        .args(["--tag", "a", "--queue", "b"])
        .assert()
        .code(1)
        .stderr(contains("cannot be used with"));
}

#[test]
fn version_needs_no_profile() {
    fmeflow()
        .args(["version", "--config", "/nonexistent/profile.yaml"])
        .assert()
        .success()
        .stdout(contains(concat!("fmeflow version ", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn handler_usage_errors_print_the_usage_line() {
    let dir = TempDir::new().expect("tmp dir");
    let profile = write_profile(&dir, "http://127.0.0.1:9", 25300);
    fmeflow()
        .args(["run", "--repository", "r", "--workspace", "w.fmw"])
        .args(["--published-parameter", "novalue", "--config"])
        .arg(&profile)
        .assert()
        .code(1)
        .stderr(contains("--published-parameter expects NAME=VALUE"))
        .stderr(contains("Usage: fmeflow"));
}
