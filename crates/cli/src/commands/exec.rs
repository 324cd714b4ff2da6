//! Run an existing test file

use std::path::PathBuf;

use anyhow::bail;
use clap::Args;
use specwright_common::Settings;
use specwright_e2e::{RunnerConfig, TestExecutor};

use super::OptionArgs;
use crate::output::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct ExecArgs {
    /// Test file to run
    pub file: PathBuf,

    #[command(flatten)]
    pub options: OptionArgs,
}

pub async fn execute(args: ExecArgs, settings: &Settings, format: OutputFormat) -> anyhow::Result<bool> {
    if !args.file.is_file() {
        bail!("Test file not found: {}", args.file.display());
    }

    let options = args.options.to_options()?;
    let executor = TestExecutor::new(RunnerConfig::from_settings(&settings.runner));
    let result = executor.execute(&args.file, options.as_ref()).await?;

    output::print_result(&result, format)?;
    Ok(result.success)
}
