//! Scenario to prompt compilation
//!
//! Pure and deterministic: the same scenario and default base URL always
//! produce byte-identical prompts.

use specwright_common::{Options, Prompt, Scenario};

/// Instructions sent as the system text of every request
pub const SYSTEM_PROMPT: &str = "\
You are an expert QA engineer who writes end-to-end browser tests with Playwright Test.

Turn the scenario you are given into a single, complete Playwright Test file written in TypeScript.

Output format (MANDATORY):
1. Exactly one fenced code block tagged `typescript` containing the whole test file.
2. After the code block, a short plain-prose explanation of what the test does.

Rules:
- Import from '@playwright/test' only.
- Use `test` and `expect`; prefer role-, label- and text-based locators over CSS selectors.
- Wait on locators and web-first assertions, never on fixed sleeps.
- If a target URL is given, navigate to it. If none is given, leave the URL as a commented placeholder (e.g. `// const BASE_URL = 'https://example.com';`).
- Honour the requested options: browser, headless mode, screenshots (take one with `page.screenshot` at the end of the test when enabled) and timeout (`test.setTimeout`).
- Do not output any other code blocks.";

/// Compiles scenarios into prompts, carrying the ambient default base URL
#[derive(Debug, Clone, Default)]
pub struct PromptCompiler {
    default_base_url: Option<String>,
}

impl PromptCompiler {
    pub fn new(default_base_url: Option<String>) -> Self {
        Self {
            default_base_url: default_base_url.filter(|url| !url.trim().is_empty()),
        }
    }

    pub fn compile(&self, scenario: &Scenario) -> Prompt {
        compile_prompt(scenario, self.default_base_url.as_deref())
    }
}

/// Build the prompt for a scenario.
///
/// The target URL line uses the scenario URL, then `default_base_url`, and is
/// omitted when neither is set.
pub fn compile_prompt(scenario: &Scenario, default_base_url: Option<&str>) -> Prompt {
    Prompt {
        system: SYSTEM_PROMPT.to_string(),
        user: user_prompt(scenario, default_base_url),
    }
}

fn user_prompt(scenario: &Scenario, default_base_url: Option<&str>) -> String {
    let mut out = String::new();

    out.push_str("Test scenario:\n");
    out.push_str(scenario.description.trim());
    out.push('\n');

    let url = scenario
        .url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .or(default_base_url);
    if let Some(url) = url {
        out.push_str("\nTarget URL: ");
        out.push_str(url.trim());
        out.push('\n');
    }

    if let Some(options) = scenario.options.as_ref().filter(|o| !o.is_empty()) {
        out.push_str("\nOptions:\n");
        for line in option_lines(options) {
            out.push_str(&line);
            out.push('\n');
        }
    }

    out
}

/// One directive per set field, in fixed order
fn option_lines(options: &Options) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(browser) = options.browser {
        lines.push(format!("browser: {}", browser));
    }
    if let Some(headless) = options.headless {
        lines.push(format!("headless: {}", enabled(headless)));
    }
    if let Some(screenshot) = options.screenshot {
        lines.push(format!("screenshot: {}", enabled(screenshot)));
    }
    if let Some(timeout) = options.timeout {
        lines.push(format!("timeout: {}ms", timeout));
    }

    lines
}

fn enabled(flag: bool) -> &'static str {
    if flag {
        "enabled"
    } else {
        "disabled"
    }
}
