//! Specwright generation layer
//!
//! Turns a [`Scenario`](specwright_common::Scenario) into Playwright test
//! code: the scenario is compiled into a prompt, sent to one of the
//! generation backends, and the completion is split into code and
//! explanation.

pub mod backends;
pub mod client;
pub mod generator;
pub mod parser;
pub mod prompt;
pub mod provider;

pub use generator::Generator;
pub use parser::{parse_completion, ParsedCompletion};
pub use prompt::{compile_prompt, PromptCompiler};
pub use provider::{from_settings, Provider};
