//! Execution runner tests using shell scripts as a stand-in engine

#![cfg(unix)]

use std::path::Path;

use specwright_common::{Browser, Error, Options};
use specwright_e2e::{format_result, RunnerConfig, TestExecutor};

/// Engine that runs `script` with the test path and flags as `$1`, `$2`, ...
fn sh_engine(script: &str, working_dir: Option<&Path>) -> TestExecutor {
    TestExecutor::new(RunnerConfig {
        command: vec![
            "sh".to_string(),
            "-c".to_string(),
            script.to_string(),
            "engine".to_string(),
        ],
        working_dir: working_dir.map(Path::to_path_buf),
        results_dir: "results".into(),
    })
}

#[tokio::test]
async fn passes_arguments_in_order_and_reports_success() {
    let executor = sh_engine(r#"printf '%s\n' "$@""#, None);
    let options = Options::new()
        .with_browser(Browser::Firefox)
        .with_headless(false)
        .with_timeout(60000)
        .unwrap();

    let result = executor
        .execute(Path::new("tests/generated/login.spec.ts"), Some(&options))
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.error, None);
    assert_eq!(result.logs[1], "stdout:");
    assert_eq!(
        result.logs[2],
        "tests/generated/login.spec.ts\n--project=firefox\n--headed\n--timeout=60000"
    );
    assert!(result.logs[0].starts_with("Command: sh -c"));
    assert_eq!(result.logs.len(), 3);
}

#[tokio::test]
async fn failing_run_resolves_with_failure_result() {
    let executor = sh_engine(
        "echo 'Running 1 test'; echo 'Timeout 30000ms exceeded' >&2; exit 1",
        None,
    );

    let result = executor.execute(Path::new("a.spec.ts"), None).await.unwrap();

    assert!(!result.success);
    let error = result.error.clone().unwrap();
    assert!(error.contains("Timeout 30000ms exceeded"), "{}", error);
    assert!(error.contains("exit code 1"), "{}", error);

    let stdout_at = result.logs.iter().position(|l| l == "stdout:").unwrap();
    let stderr_at = result.logs.iter().position(|l| l == "stderr:").unwrap();
    assert!(stdout_at < stderr_at);
    assert_eq!(result.logs[stderr_at + 1], "Timeout 30000ms exceeded");

    let report = format_result(&result);
    assert!(report.contains("Error: Command failed with exit code 1"));
}

#[tokio::test]
async fn missing_engine_is_an_execution_error() {
    let executor = TestExecutor::new(RunnerConfig {
        command: vec!["specwright-no-such-engine-binary".to_string()],
        ..Default::default()
    });

    let err = executor.execute(Path::new("a.spec.ts"), None).await.unwrap_err();
    assert!(matches!(err, Error::Execution(_)));
}

#[tokio::test]
async fn empty_engine_command_is_an_execution_error() {
    let executor = TestExecutor::new(RunnerConfig {
        command: vec![],
        ..Default::default()
    });

    let err = executor.execute(Path::new("a.spec.ts"), None).await.unwrap_err();
    assert!(matches!(err, Error::Execution(_)));
    assert!(err.to_string().contains("No execution command configured"), "{}", err);
}

#[tokio::test]
async fn reports_screenshot_written_during_run() {
    let tmp = tempfile::tempdir().unwrap();
    let executor = sh_engine(
        "mkdir -p results/login && printf 'png' > results/login/final.png",
        Some(tmp.path()),
    );
    let options = Options::new().with_screenshot(true);

    let result = executor.execute(Path::new("a.spec.ts"), Some(&options)).await.unwrap();

    assert!(result.success);
    assert_eq!(
        result.screenshot_path,
        Some(tmp.path().join("results").join("login").join("final.png"))
    );
}

#[tokio::test]
async fn screenshot_is_not_searched_unless_requested() {
    let tmp = tempfile::tempdir().unwrap();
    let executor = sh_engine("mkdir -p results && printf 'png' > results/a.png", Some(tmp.path()));

    let result = executor.execute(Path::new("a.spec.ts"), None).await.unwrap();

    assert_eq!(result.screenshot_path, None);
}
