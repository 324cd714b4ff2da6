//! Generate and run a test: the `run` and `scenario` commands

use std::path::PathBuf;

use clap::Args;
use specwright_common::{Scenario, Settings};
use specwright_e2e::{Pipeline, PipelineOutcome};
use tracing::info;

use super::OptionArgs;
use crate::output::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// What the test should do, in plain language
    pub description: String,

    /// Page under test (defaults to the configured base URL)
    #[arg(short, long)]
    pub url: Option<String>,

    #[command(flatten)]
    pub options: OptionArgs,

    /// File name for the generated test
    #[arg(short, long)]
    pub filename: Option<String>,
}

#[derive(Args, Debug)]
pub struct ScenarioFileArgs {
    /// Scenario file (YAML or JSON)
    pub file: PathBuf,

    /// File name for the generated test
    #[arg(short, long)]
    pub filename: Option<String>,
}

/// Scenario from command-line pieces
pub fn build_scenario(
    description: &str,
    url: Option<&str>,
    options: &OptionArgs,
) -> specwright_common::Result<Scenario> {
    let mut scenario = Scenario::new(description)?;
    if let Some(url) = url {
        scenario = scenario.with_url(url);
    }
    if let Some(options) = options.to_options()? {
        scenario = scenario.with_options(options)?;
    }
    Ok(scenario)
}

pub async fn execute(args: RunArgs, settings: &Settings, format: OutputFormat) -> anyhow::Result<bool> {
    let scenario = build_scenario(&args.description, args.url.as_deref(), &args.options)?;
    run_scenario(&scenario, args.filename, settings, format).await
}

pub async fn execute_file(
    args: ScenarioFileArgs,
    settings: &Settings,
    format: OutputFormat,
) -> anyhow::Result<bool> {
    let scenario = Scenario::load(&args.file)?;
    info!("Loaded scenario from {}", args.file.display());
    run_scenario(&scenario, args.filename, settings, format).await
}

async fn run_scenario(
    scenario: &Scenario,
    filename: Option<String>,
    settings: &Settings,
    format: OutputFormat,
) -> anyhow::Result<bool> {
    let pipeline = Pipeline::from_settings(settings);
    let outcome = pipeline.run(scenario, filename).await?;

    match format {
        OutputFormat::Json => output::print_json(&outcome)?,
        OutputFormat::Text => match &outcome {
            PipelineOutcome::Executed { path, result, .. } => {
                println!("Test file: {}", path.display());
                output::print_result(result, format)?;
            }
            PipelineOutcome::EmptyCode { test } => {
                output::print_warning("The completion contained no TypeScript code block; nothing was run");
                if let Some(explanation) = &test.explanation {
                    println!("{}", explanation);
                }
            }
        },
    }

    Ok(outcome.passed())
}
