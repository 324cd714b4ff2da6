//! CLI command implementations

pub mod config;
pub mod exec;
pub mod generate;
pub mod run;

use clap::Args;
use specwright_common::{Browser, Options};

/// Execution options shared by the scenario commands
#[derive(Args, Debug, Default)]
pub struct OptionArgs {
    /// Browser engine (chromium, firefox, webkit)
    #[arg(short, long)]
    pub browser: Option<Browser>,

    /// Run with a visible browser window
    #[arg(long, conflicts_with = "headless")]
    pub headed: bool,

    /// Ask for a headless run explicitly
    #[arg(long)]
    pub headless: bool,

    /// Capture a screenshot during the test
    #[arg(long)]
    pub screenshot: bool,

    /// Per-test timeout in milliseconds
    #[arg(short, long)]
    pub timeout: Option<u64>,
}

impl OptionArgs {
    /// Options to attach to a scenario, `None` when no flag was given
    pub fn to_options(&self) -> specwright_common::Result<Option<Options>> {
        let mut options = Options::new();

        if let Some(browser) = self.browser {
            options = options.with_browser(browser);
        }
        if self.headed {
            options = options.with_headless(false);
        } else if self.headless {
            options = options.with_headless(true);
        }
        if self.screenshot {
            options = options.with_screenshot(true);
        }
        if let Some(timeout) = self.timeout {
            options = options.with_timeout(timeout)?;
        }

        Ok((!options.is_empty()).then_some(options))
    }
}
