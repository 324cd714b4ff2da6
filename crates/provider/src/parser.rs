//! Completion parsing
//!
//! Splits a completion into the first TypeScript code block and the
//! surrounding prose. Never fails: a completion without a tagged block yields
//! empty code, which callers must check for.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Code and explanation extracted from a completion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCompletion {
    /// Interior of the first tagged block, trailing newline included
    pub code: String,
    /// Everything else, trimmed
    pub explanation: String,
}

impl ParsedCompletion {
    /// Same rule as [`GeneratedTest::has_code`](specwright_common::GeneratedTest::has_code)
    pub fn has_code(&self) -> bool {
        specwright_common::is_code_present(&self.code)
    }
}

// Lazy interior: stops at the first closing fence after the opener.
static CODE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?i:typescript|ts)[ \t]*\r?\n(.*?)```").expect("code block pattern is valid")
});

/// Split a completion into code and explanation
pub fn parse_completion(text: &str) -> ParsedCompletion {
    let matched = CODE_BLOCK
        .captures(text)
        .and_then(|c| Some((c.get(0)?, c.get(1)?)));

    let Some((block, code)) = matched else {
        return ParsedCompletion {
            code: String::new(),
            explanation: text.trim().to_string(),
        };
    };

    let mut explanation = String::with_capacity(text.len() - block.len());
    explanation.push_str(&text[..block.start()]);
    explanation.push_str(&text[block.end()..]);

    ParsedCompletion {
        code: code.as_str().to_string(),
        explanation: explanation.trim().to_string(),
    }
}
