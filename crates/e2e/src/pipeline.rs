//! End-to-end pipeline: generate, persist, execute

use std::path::PathBuf;

use serde::Serialize;
use specwright_common::{GeneratedTest, Result, Scenario, Settings, TestResult};
use specwright_provider::Generator;
use tracing::{info, warn};

use crate::artifact::ArtifactStore;
use crate::runner::{RunnerConfig, TestExecutor};

/// What a pipeline run produced
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PipelineOutcome {
    /// The test was written and executed
    Executed {
        test: GeneratedTest,
        path: PathBuf,
        result: TestResult,
    },

    /// The completion held no code, so nothing was persisted or run
    EmptyCode { test: GeneratedTest },
}

impl PipelineOutcome {
    pub fn result(&self) -> Option<&TestResult> {
        match self {
            PipelineOutcome::Executed { result, .. } => Some(result),
            PipelineOutcome::EmptyCode { .. } => None,
        }
    }

    pub fn passed(&self) -> bool {
        self.result().map(|r| r.success).unwrap_or(false)
    }
}

/// Sequential generate → persist → execute pipeline
pub struct Pipeline {
    generator: Generator,
    store: ArtifactStore,
    executor: TestExecutor,
}

impl Pipeline {
    pub fn new(generator: Generator, store: ArtifactStore, executor: TestExecutor) -> Self {
        Self {
            generator,
            store,
            executor,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Generator::from_settings(settings),
            ArtifactStore::new(settings.artifacts.dir.clone()),
            TestExecutor::new(RunnerConfig::from_settings(&settings.runner)),
        )
    }

    /// Run one scenario through every stage, each awaited before the next
    pub async fn run(&self, scenario: &Scenario, filename: Option<String>) -> Result<PipelineOutcome> {
        let test = self.generator.generate_test(scenario, filename).await?;

        if !test.has_code() {
            warn!("No test code generated; skipping persistence and execution");
            return Ok(PipelineOutcome::EmptyCode { test });
        }

        let path = self.store.persist(&test).await?;
        let result = self.executor.execute(&path, scenario.options.as_ref()).await?;

        info!(
            success = result.success,
            duration_ms = result.duration_ms,
            "Pipeline finished for {}",
            path.display()
        );

        Ok(PipelineOutcome::Executed { test, path, result })
    }
}
