//! Specwright CLI - Main Entry Point
//!
//! Turns natural-language scenarios into Playwright tests, runs them and
//! prints the report.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod output;

use commands::{config, exec, generate, run};

/// Specwright - natural-language scenarios to executed browser tests
#[derive(Parser)]
#[command(name = "specwright")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Settings file (default: ./specwright.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "text", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a test from a scenario without running it
    Generate(generate::GenerateArgs),

    /// Generate, save and run a test for a scenario
    Run(run::RunArgs),

    /// Run a scenario described in a YAML or JSON file
    Scenario(run::ScenarioFileArgs),

    /// Run an existing test file
    Exec(exec::ExecArgs),

    /// Show the effective settings
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for reports.
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match dispatch(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            std::process::exit(2);
        }
    }
}

/// Returns whether the command succeeded; a failed test run is `Ok(false)`
async fn dispatch(cli: Cli) -> anyhow::Result<bool> {
    let settings = config::load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate(args) => generate::execute(args, &settings, cli.format).await,
        Commands::Run(args) => run::execute(args, &settings, cli.format).await,
        Commands::Scenario(args) => run::execute_file(args, &settings, cli.format).await,
        Commands::Exec(args) => exec::execute(args, &settings, cli.format).await,
        Commands::Config => config::execute(&settings, cli.format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_with_options() {
        let cli = Cli::try_parse_from([
            "specwright",
            "run",
            "log in and see the dashboard",
            "--browser",
            "firefox",
            "--headed",
            "--timeout",
            "60000",
            "--format",
            "json",
        ])
        .unwrap();

        assert!(matches!(cli.format, output::OutputFormat::Json));
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.description, "log in and see the dashboard");
                assert!(args.options.headed);
                assert_eq!(args.options.timeout, Some(60000));
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_headed_conflicts_with_headless() {
        assert!(Cli::try_parse_from(["specwright", "exec", "a.spec.ts", "--headed", "--headless"]).is_err());
    }

    #[test]
    fn test_unknown_browser_is_rejected() {
        assert!(Cli::try_parse_from(["specwright", "generate", "x", "--browser", "safari"]).is_err());
    }
}
