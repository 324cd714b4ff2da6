//! Human-readable test reports

use specwright_common::TestResult;

/// Render a result as text: status, optional error, duration, then logs
pub fn format_result(result: &TestResult) -> String {
    let mut lines = Vec::with_capacity(result.logs.len() + 5);

    if result.success {
        lines.push("✅ Test passed".to_string());
    } else {
        lines.push("❌ Test failed".to_string());
        if let Some(error) = &result.error {
            lines.push(format!("Error: {}", error));
        }
    }

    lines.push(format!("Duration: {}ms", result.duration_ms));

    if let Some(path) = &result.screenshot_path {
        lines.push(format!("Screenshot: {}", path.display()));
    }

    lines.push(String::new());
    lines.push("Logs:".to_string());
    lines.extend(result.logs.iter().cloned());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_success() {
        let result = TestResult {
            success: true,
            duration_ms: 1234,
            logs: vec!["Command: npx playwright test a".into(), "stdout:".into(), "1 passed".into()],
            ..Default::default()
        };

        assert_eq!(
            format_result(&result),
            "✅ Test passed\nDuration: 1234ms\n\nLogs:\nCommand: npx playwright test a\nstdout:\n1 passed"
        );
    }

    #[test]
    fn test_format_failure_with_error_and_screenshot() {
        let result = TestResult {
            success: false,
            duration_ms: 10,
            error: Some("Timeout 30000ms exceeded".into()),
            screenshot_path: Some(PathBuf::from("test-results/a.png")),
            logs: vec!["stderr:".into(), "boom".into()],
        };

        let report = format_result(&result);
        assert!(report.starts_with("❌ Test failed\nError: Timeout 30000ms exceeded\nDuration: 10ms\n"));
        assert!(report.contains("Screenshot: test-results/a.png"));
        assert!(report.ends_with("Logs:\nstderr:\nboom"));
    }

    #[test]
    fn test_format_failure_without_error() {
        let result = TestResult::default();
        assert_eq!(format_result(&result), "❌ Test failed\nDuration: 0ms\n\nLogs:");
    }

    #[test]
    fn test_format_is_idempotent() {
        let result = TestResult {
            success: true,
            duration_ms: 5,
            logs: vec!["a".into(), "b".into()],
            ..Default::default()
        };
        assert_eq!(format_result(&result), format_result(&result));
    }
}
