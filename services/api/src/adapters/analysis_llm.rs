//! services/api/src/adapters/analysis_llm.rs
//!
//! This module contains the adapter for the entry-analysis LLM.
//! It implements the `EntryAnalysisService` port from the `core` crate.
//!
//! The provider's response envelope never leaves this module: the adapter
//! extracts the answer text, runs it through the core schema validator, and
//! hands callers either a validated `EntryAnalysis` or a `PortError`.

use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use async_trait::async_trait;
use journal_core::ports::{EntryAnalysisService, PortError, PortResult};
use journal_core::{domain::EntryAnalysis, schema};
use tracing::error;

/// The fixed instruction block placed ahead of the entry text.
///
/// It forbids extra keys, prose, and fencing even though the validator
/// tolerates fencing; the looser the model's habits, the more this matters.
const PROMPT_TEMPLATE: &str = r#"Analyze the sentiment of this journal entry and respond in JSON format.
Return ONLY valid JSON that conforms exactly to this schema:

{
"sentiment": "positive | negative | neutral",
"summary": "string (2 sentences)",
"topics": ["string", "string"]
}

Rules:
- Do not include any extra keys
- Do not include explanations or markdown
- Use 2-4 topics

Journal entry: "#;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `EntryAnalysisService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiAnalysisAdapter {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration,
}

impl OpenAiAnalysisAdapter {
    /// Creates a new `OpenAiAnalysisAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String, timeout: Duration) -> Self {
        Self {
            client,
            model,
            timeout,
        }
    }

    fn build_prompt(entry_text: &str) -> String {
        format!("{}{}", PROMPT_TEMPLATE, entry_text)
    }
}

//=========================================================================================
// `EntryAnalysisService` Trait Implementation
//=========================================================================================

#[async_trait]
impl EntryAnalysisService for OpenAiAnalysisAdapter {
    /// Runs one analysis request against the model. Single-shot: exactly one
    /// outbound call, bounded by the configured timeout, no retry.
    async fn analyze(&self, entry_text: &str) -> PortResult<EntryAnalysis> {
        let messages = vec![ChatCompletionRequestUserMessageArgs::default()
            .content(Self::build_prompt(entry_text))
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .into()];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| {
                // Log the fact, not the entry text.
                error!("analysis request timed out after {:?}", self.timeout);
                PortError::Unexpected(format!(
                    "analysis request timed out after {:?}",
                    self.timeout
                ))
            })?
            .map_err(|e: OpenAIError| {
                error!("analysis request failed: {e}");
                PortError::Unexpected(e.to_string())
            })?;

        // Extract the text content from the first choice in the response.
        let raw_text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PortError::Unexpected(
                    "Analysis LLM response contained no text content.".to_string(),
                )
            })?;

        schema::parse_analysis(&raw_text).map_err(|e| {
            error!("analysis output rejected: {e}");
            PortError::Unexpected(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_ends_with_the_entry_text() {
        let prompt = OpenAiAnalysisAdapter::build_prompt("Work: shipped\nStruggle: none");
        assert!(prompt.starts_with("Analyze the sentiment"));
        assert!(prompt.ends_with("Journal entry: Work: shipped\nStruggle: none"));
    }
}
