//! Specwright E2E layer
//!
//! Persists generated Playwright tests, runs them through the Playwright Test
//! CLI and reports the outcome.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Pipeline                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Generator (specwright-provider)                            │
//! │    └── generate_test(scenario) -> GeneratedTest             │
//! │  ArtifactStore                                              │
//! │    └── persist(test) -> PathBuf                             │
//! │  TestExecutor                                               │
//! │    └── execute(path, options) -> TestResult                 │
//! │  report                                                     │
//! │    └── format_result(result) -> String                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod artifact;
pub mod pipeline;
pub mod report;
pub mod runner;

pub use artifact::ArtifactStore;
pub use pipeline::{Pipeline, PipelineOutcome};
pub use report::format_result;
pub use runner::{RunnerConfig, TestExecutor};
