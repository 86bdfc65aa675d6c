// src/suggest/mod.rs

use async_trait::async_trait;
use regex::Regex;
use serde_json::json;

use crate::errors::Result;

pub mod ollama;

pub use ollama::OllamaClient;

/// Advisory lists are capped: the model may ramble, the editor shows five.
const MAX_SUGGESTIONS: usize = 5;

/// Sampling knobs forwarded to the model for one generation.
#[derive(Debug, Clone, Copy)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub top_p: f32,
    pub num_predict: u32,
}

impl GenerationOptions {
    pub fn suggestions() -> Self {
        Self {
            temperature: 0.3,
            top_p: 0.9,
            num_predict: 500,
        }
    }

    pub fn fixes() -> Self {
        Self {
            temperature: 0.2,
            top_p: 0.9,
            num_predict: 600,
        }
    }

    pub fn analysis() -> Self {
        Self {
            temperature: 0.1,
            top_p: 0.9,
            num_predict: 800,
        }
    }
}

/// A common trait for LLM suggestion backends, so the handlers can hold a
/// trait object and tests can substitute a canned provider.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generates a response for `prompt`, returning the text and the
    /// request latency in milliseconds.
    async fn generate(&self, prompt: &str, options: GenerationOptions) -> Result<(String, u64)>;
}

const ERROR_FIXES_PROMPT: &str = r#"You are a Python debugging expert. The following code has an error. Please provide specific fixes.

Code:
{{code}}

Error:
{{error}}

Provide 3-5 specific, actionable fixes for this error. Include corrected code snippets and explanations."#;

const SUGGESTIONS_PROMPT: &str = r#"You are a Python programming assistant. Based on the following code and context, provide helpful suggestions for code completion or improvement.

Context: {{context}}
Code:
{{code}}

Provide 3-5 specific, actionable suggestions for improving or completing this code. Focus on Python best practices, readability, and functionality."#;

const ANALYSIS_PROMPT: &str = r#"You are a Python code reviewer. Analyze the following code for:
1. Potential bugs or errors
2. Code quality issues
3. Performance improvements
4. Best practices violations
5. Security concerns

Code:
{{code}}

Provide a comprehensive analysis with specific recommendations."#;

/// Ask the provider for fixes for a failed run. The caller decides how to
/// degrade when this errors; the execution result itself is never touched.
pub async fn error_fixes(
    provider: &dyn LlmProvider,
    code: &str,
    error: &str,
) -> Result<Vec<String>> {
    let prompt = render_template(ERROR_FIXES_PROMPT, &json!({ "code": code, "error": error }));
    let (text, latency_ms) = provider.generate(&prompt, GenerationOptions::fixes()).await?;
    log::info!("error-fix suggestions generated in {}ms", latency_ms);
    Ok(parse_suggestion_list(&text))
}

/// Ask the provider for completion/improvement suggestions.
pub async fn code_suggestions(
    provider: &dyn LlmProvider,
    code: &str,
    context: &str,
) -> Result<Vec<String>> {
    let prompt = render_template(SUGGESTIONS_PROMPT, &json!({ "code": code, "context": context }));
    let (text, latency_ms) = provider
        .generate(&prompt, GenerationOptions::suggestions())
        .await?;
    log::info!("code suggestions generated in {}ms", latency_ms);
    Ok(parse_suggestion_list(&text))
}

/// Ask the provider for a free-form review of the code.
pub async fn analyze(provider: &dyn LlmProvider, code: &str) -> Result<String> {
    let prompt = render_template(ANALYSIS_PROMPT, &json!({ "code": code }));
    let (text, latency_ms) = provider
        .generate(&prompt, GenerationOptions::analysis())
        .await?;
    log::info!("code analysis generated in {}ms", latency_ms);
    Ok(text.trim().to_string())
}

/// Simple template renderer: `{{key}}` placeholders filled from a JSON map.
fn render_template(template: &str, data: &serde_json::Value) -> String {
    let re = Regex::new(r"\{\{\s*(\w+)\s*\}\}").unwrap();
    re.replace_all(template, |caps: &regex::Captures| {
        let key = &caps[1];
        data.get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| caps[0].to_string())
    })
    .to_string()
}

/// The response contract is line-splitting, nothing smarter: one
/// suggestion per non-empty line, capped at `MAX_SUGGESTIONS`.
fn parse_suggestion_list(text: &str) -> Vec<String> {
    let suggestions: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect();

    if suggestions.is_empty() {
        vec!["No suggestions available".to_string()]
    } else {
        suggestions
    }
}
