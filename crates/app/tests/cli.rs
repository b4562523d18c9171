use std::{fs, path::Path, process::Command};

use tempfile::TempDir;

/// Creates a scratch working directory whose `.env` pins the runtime settings.
fn workdir(dotenv: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join(".env"), dotenv).expect("write .env");
    dir
}

fn dtimelog(dir: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_dtimelog"));
    command
        .env_clear()
        .env("RUST_LOG", "debug")
        .current_dir(dir);
    command
}

#[test]
fn default_run_prints_only_the_greeting_on_stdout() {
    let dir = workdir("DTIMELOG_ENV=test\n");

    let output = dtimelog(dir.path()).output().expect("run dtimelog");

    assert!(output.status.success(), "exit status: {}", output.status);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Hello David\n");
    assert!(
        !output.stderr.is_empty(),
        "debug logging should be written to stderr"
    );
}

#[test]
fn first_argument_overrides_the_name() {
    let dir = workdir("DTIMELOG_ENV=test\n");

    let output = dtimelog(dir.path())
        .arg("Ada")
        .output()
        .expect("run dtimelog");

    assert!(output.status.success(), "exit status: {}", output.status);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Hello Ada\n");
}

#[test]
fn dotenv_values_configure_greeting_and_name() {
    let dir = workdir("DTIMELOG_ENV=test\nDTIMELOG_GREETING=Howdy\nDTIMELOG_NAME=Grace\n");

    let output = dtimelog(dir.path()).output().expect("run dtimelog");

    assert!(output.status.success(), "exit status: {}", output.status);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Howdy Grace\n");
}

#[test]
fn invalid_environment_exits_with_failure() {
    let dir = workdir("DTIMELOG_ENV=bogus\n");

    let output = dtimelog(dir.path()).output().expect("run dtimelog");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("bogus"));
}

#[test]
fn greeting_log_keeps_stdout_clean() {
    let scratch = tempfile::tempdir().expect("tempdir");
    let db_path = scratch.path().join("dtimelog.db");
    let dir = workdir(&format!(
        "DTIMELOG_ENV=test\nDTIMELOG_DATABASE_URL=\"sqlite://{}?mode=rwc\"\n",
        db_path.display()
    ));

    let output = dtimelog(dir.path()).output().expect("run dtimelog");

    assert!(output.status.success(), "exit status: {}", output.status);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Hello David\n");
    assert!(db_path.exists(), "greeting log database should be created");
}
