//! Generate a test without running it

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use specwright_common::{GeneratedTest, Settings};
use specwright_e2e::ArtifactStore;
use specwright_provider::Generator;

use super::OptionArgs;
use crate::output::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// What the test should do, in plain language
    pub description: String,

    /// Page under test (defaults to the configured base URL)
    #[arg(short, long)]
    pub url: Option<String>,

    #[command(flatten)]
    pub options: OptionArgs,

    /// Write the test into the artifacts directory
    #[arg(long)]
    pub save: bool,

    /// File name for the generated test
    #[arg(short, long)]
    pub filename: Option<String>,
}

#[derive(Serialize)]
struct GenerateReport<'a> {
    #[serde(flatten)]
    test: &'a GeneratedTest,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<PathBuf>,
}

pub async fn execute(args: GenerateArgs, settings: &Settings, format: OutputFormat) -> anyhow::Result<bool> {
    let scenario = super::run::build_scenario(&args.description, args.url.as_deref(), &args.options)?;
    let generator = Generator::from_settings(settings);
    let test = generator.generate_test(&scenario, args.filename).await?;

    let path = if args.save && test.has_code() {
        let store = ArtifactStore::new(settings.artifacts.dir.clone());
        Some(store.persist(&test).await?)
    } else {
        None
    };

    match format {
        OutputFormat::Text => print_text(&test, path.as_ref()),
        OutputFormat::Json => output::print_json(&GenerateReport {
            test: &test,
            path: path.clone(),
        })?,
    }

    Ok(test.has_code())
}

fn print_text(test: &GeneratedTest, path: Option<&PathBuf>) {
    if test.has_code() {
        println!("// {}", test.filename);
        println!("{}", test.code.trim_end());
    } else {
        output::print_warning("The completion contained no TypeScript code block");
    }

    if let Some(explanation) = &test.explanation {
        println!();
        println!("{}", explanation);
    }

    if let Some(path) = path {
        println!();
        output::print_success(&format!("Saved to {}", path.display()));
    }
}

