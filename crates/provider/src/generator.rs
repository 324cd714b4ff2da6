//! Scenario to generated test: compile, generate, parse

use specwright_common::{default_test_filename, GeneratedTest, Result, Scenario, Settings};
use tracing::{info, warn};

use crate::parser::parse_completion;
use crate::prompt::PromptCompiler;
use crate::provider::{from_settings, Provider};

/// Drives one provider through the compile/generate/parse sequence
pub struct Generator {
    compiler: PromptCompiler,
    provider: Box<dyn Provider>,
}

impl Generator {
    pub fn new(compiler: PromptCompiler, provider: Box<dyn Provider>) -> Self {
        Self { compiler, provider }
    }

    /// Build a generator with the backend and default base URL from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            PromptCompiler::new(settings.target.base_url.clone()),
            from_settings(&settings.provider),
        )
    }

    /// Generate a test for the scenario.
    ///
    /// `filename` defaults to a timestamp-derived name. The returned code may
    /// be empty when the completion held no TypeScript block.
    pub async fn generate_test(
        &self,
        scenario: &Scenario,
        filename: Option<String>,
    ) -> Result<GeneratedTest> {
        scenario.validate()?;

        let prompt = self.compiler.compile(scenario);
        info!("Generating test with {} backend", self.provider.name());

        let completion = self.provider.generate(&prompt).await?;
        let parsed = parse_completion(&completion);

        if !parsed.has_code() {
            warn!("Completion contained no TypeScript code block");
        }

        let filename = filename
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| default_test_filename(chrono::Utc::now().timestamp_millis()));

        Ok(GeneratedTest {
            code: parsed.code,
            filename,
            explanation: Some(parsed.explanation).filter(|e| !e.is_empty()),
        })
    }
}
