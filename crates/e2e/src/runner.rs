//! Playwright Test execution
//!
//! Runs a persisted test file through the Playwright Test CLI as a single
//! subprocess and classifies the outcome. A test that runs and fails is a
//! normal [`TestResult`]; only a process that cannot be started is an error.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant, SystemTime};

use specwright_common::config::RunnerSettings;
use specwright_common::{Error, Options, Result, TestResult};
use tokio::process::Command as TokioCommand;
use tracing::{debug, error, info, warn};

/// Used when a failed process exposes nothing more specific
const GENERIC_FAILURE: &str = "Test execution failed";

/// Configuration for the execution engine
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Program and leading arguments, e.g. `npx playwright test`
    pub command: Vec<String>,

    /// Working directory for the engine (None = inherit)
    pub working_dir: Option<PathBuf>,

    /// Engine output directory searched for screenshots
    pub results_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::from_settings(&RunnerSettings::default())
    }
}

impl RunnerConfig {
    pub fn from_settings(settings: &RunnerSettings) -> Self {
        Self {
            command: settings.command.clone(),
            working_dir: None,
            results_dir: settings.results_dir.clone(),
        }
    }
}

/// Runs generated tests through the execution engine
#[derive(Debug, Clone, Default)]
pub struct TestExecutor {
    config: RunnerConfig,
}

impl TestExecutor {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Arguments following the base invocation, in fixed order: file path,
    /// browser project, headed flag, timeout.
    pub fn build_args(test_path: &Path, options: Option<&Options>) -> Vec<String> {
        let mut args = vec![test_path.to_string_lossy().to_string()];

        if let Some(options) = options {
            if let Some(browser) = options.browser {
                args.push(format!("--project={}", browser));
            }
            // Only an explicit `false` asks for a headed run.
            if options.headless == Some(false) {
                args.push("--headed".to_string());
            }
            if let Some(timeout) = options.timeout {
                args.push(format!("--timeout={}", timeout));
            }
        }

        args
    }

    /// Full invocation: program, then base arguments and [`Self::build_args`]
    pub fn invocation(&self, test_path: &Path, options: Option<&Options>) -> Result<(String, Vec<String>)> {
        let Some((program, base_args)) = self.config.command.split_first() else {
            error!("No execution command configured");
            return Err(Error::Execution("No execution command configured".to_string()));
        };

        let mut args = base_args.to_vec();
        args.extend(Self::build_args(test_path, options));
        Ok((program.clone(), args))
    }

    /// Execute a test file and classify the outcome
    pub async fn execute(&self, test_path: &Path, options: Option<&Options>) -> Result<TestResult> {
        let (program, args) = self.invocation(test_path, options)?;
        let command_line = command_line(&program, &args);

        info!("Running {}", command_line);
        if let Some(options) = options {
            debug!(
                headless = options.effective_headless(),
                timeout_ms = options.effective_timeout(),
                "Execution options"
            );
        }

        let mut cmd = TokioCommand::new(&program);
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.config.working_dir {
            cmd.current_dir(dir);
        }

        let started_at = SystemTime::now();
        let start = Instant::now();
        let output = match cmd.output().await {
            Ok(output) => output,
            Err(e) => {
                error!("Failed to start {}: {}", command_line, e);
                return Err(Error::Execution(format!("Failed to start {}: {}", program, e)));
            }
        };
        let duration_ms = start.elapsed().as_millis() as u64;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let mut result = classify(&command_line, output.status, &stdout, &stderr, duration_ms);

        if options.map(Options::effective_screenshot).unwrap_or(false) {
            result.screenshot_path = self.latest_screenshot(started_at);
            if result.screenshot_path.is_none() {
                warn!("Screenshot requested but none found in {}", self.results_dir().display());
            }
        }

        if result.success {
            info!("✓ {} ({} ms)", test_path.display(), result.duration_ms);
        } else {
            warn!("✗ {} ({} ms)", test_path.display(), result.duration_ms);
        }

        Ok(result)
    }

    fn results_dir(&self) -> PathBuf {
        match &self.config.working_dir {
            Some(dir) if self.config.results_dir.is_relative() => dir.join(&self.config.results_dir),
            _ => self.config.results_dir.clone(),
        }
    }

    /// Most recently modified PNG written since `since`
    fn latest_screenshot(&self, since: SystemTime) -> Option<PathBuf> {
        let dir = self.results_dir();
        // Some filesystems keep mtimes at one-second granularity.
        let since = since.checked_sub(Duration::from_secs(1)).unwrap_or(since);
        debug!("Looking for screenshots in {}", dir.display());

        walkdir::WalkDir::new(&dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| entry.path().extension().map(|e| e == "png").unwrap_or(false))
            .filter_map(|entry| {
                let modified = entry.metadata().ok()?.modified().ok()?;
                (modified >= since).then(|| (modified, entry.into_path()))
            })
            .max_by_key(|(modified, _)| *modified)
            .map(|(_, path)| path)
    }
}

/// Turn a settled process into a [`TestResult`].
///
/// Captured stdout and stderr are logged with trailing whitespace removed, so
/// a block never ends in a blank log entry. Leading text is kept as captured.
fn classify(
    command_line: &str,
    status: ExitStatus,
    stdout: &str,
    stderr: &str,
    duration_ms: u64,
) -> TestResult {
    let stdout = stdout.trim_end();
    let stderr = stderr.trim_end();

    let mut result = TestResult {
        success: status.success(),
        duration_ms,
        ..Default::default()
    };
    result.push_log(format!("Command: {}", command_line));

    if status.success() {
        result.push_log("stdout:");
        result.push_log(stdout);
    } else {
        result.error = Some(failure_message(command_line, status, stderr));
        if !stdout.is_empty() {
            result.push_log("stdout:");
            result.push_log(stdout);
        }
    }

    if !stderr.is_empty() {
        result.push_log("stderr:");
        result.push_log(stderr);
    }

    result
}

fn failure_message(command_line: &str, status: ExitStatus, stderr: &str) -> String {
    let headline = match status.code() {
        Some(code) => format!("Command failed with exit code {}: {}", code, command_line),
        None => format!("{} (terminated by signal): {}", GENERIC_FAILURE, command_line),
    };

    if stderr.is_empty() {
        headline
    } else {
        format!("{}\n{}", headline, stderr)
    }
}

/// Printable command line, quoting arguments that contain whitespace
fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .map(|part| {
            if part.is_empty() || part.contains(char::is_whitespace) {
                format!("'{}'", part.replace('\'', r"'\''"))
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use specwright_common::Browser;

    #[test]
    fn test_build_args_order() {
        let options = Options::new()
            .with_browser(Browser::Firefox)
            .with_headless(false)
            .with_timeout(60000)
            .unwrap();

        let args = TestExecutor::build_args(Path::new("tests/generated/a.spec.ts"), Some(&options));

        assert_eq!(
            args,
            vec![
                "tests/generated/a.spec.ts",
                "--project=firefox",
                "--headed",
                "--timeout=60000",
            ]
        );
    }

    #[test]
    fn test_build_args_headless_true_or_unset_adds_no_flag() {
        let path = Path::new("a.spec.ts");
        let headless = Options::new().with_headless(true);

        assert_eq!(TestExecutor::build_args(path, Some(&headless)), vec!["a.spec.ts"]);
        assert_eq!(TestExecutor::build_args(path, Some(&Options::new())), vec!["a.spec.ts"]);
        assert_eq!(TestExecutor::build_args(path, None), vec!["a.spec.ts"]);
    }

    #[test]
    fn test_invocation_prepends_base_command() {
        let executor = TestExecutor::default();
        let (program, args) = executor.invocation(Path::new("a.spec.ts"), None).unwrap();

        assert_eq!(program, "npx");
        assert_eq!(args, vec!["playwright", "test", "a.spec.ts"]);
    }

    #[test]
    fn test_invocation_requires_command() {
        let executor = TestExecutor::new(RunnerConfig {
            command: vec![],
            ..Default::default()
        });
        assert!(matches!(
            executor.invocation(Path::new("a.spec.ts"), None),
            Err(Error::Execution(_))
        ));
    }

    #[test]
    fn test_command_line_quotes_whitespace() {
        assert_eq!(
            command_line("npx", &["playwright".to_string(), "my test.spec.ts".to_string()]),
            "npx playwright 'my test.spec.ts'"
        );
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::os::unix::process::ExitStatusExt;

        #[test]
        fn test_classify_success_logs() {
            let result = classify("npx playwright test a", ExitStatus::from_raw(0), "1 passed\n", "", 12);

            assert!(result.success);
            assert_eq!(result.error, None);
            assert_eq!(result.duration_ms, 12);
            assert_eq!(
                result.logs,
                vec!["Command: npx playwright test a", "stdout:", "1 passed"]
            );
        }

        #[test]
        fn test_classify_trims_only_trailing_whitespace() {
            let result = classify("cmd", ExitStatus::from_raw(0), "  indented\n\n", "", 1);
            assert_eq!(result.logs, vec!["Command: cmd", "stdout:", "  indented"]);
        }

        #[test]
        fn test_classify_success_with_stderr() {
            let result = classify("cmd", ExitStatus::from_raw(0), "ok", "warning\n", 1);
            assert_eq!(result.logs, vec!["Command: cmd", "stdout:", "ok", "stderr:", "warning"]);
        }

        #[test]
        fn test_classify_failure_keeps_partial_output() {
            // Raw wait status: exit code 1 lives in the high byte.
            let result = classify("cmd", ExitStatus::from_raw(1 << 8), "1 failed", "Timeout 30000ms exceeded", 5);

            assert!(!result.success);
            let error = result.error.unwrap();
            assert!(error.contains("exit code 1"), "{}", error);
            assert!(error.contains("Timeout 30000ms exceeded"), "{}", error);
            assert_eq!(
                result.logs,
                vec!["Command: cmd", "stdout:", "1 failed", "stderr:", "Timeout 30000ms exceeded"]
            );
        }

        #[test]
        fn test_classify_signal_uses_generic_message() {
            // Raw wait status 9: killed by SIGKILL.
            let result = classify("cmd", ExitStatus::from_raw(9), "", "", 5);

            assert!(!result.success);
            assert!(result.error.unwrap().starts_with(GENERIC_FAILURE));
            assert_eq!(result.logs, vec!["Command: cmd"]);
        }
    }
}
