//! Constrained LLM category selection.
//!
//! The prompt enumerates every allowed category, and the request pins a JSON
//! schema for the reply. Without both, models drift into free-form category
//! names or answer in a different shape on every call. The categories the
//! model returns are still passed through verbatim: whether to distrust the
//! model beyond the prompt contract is the caller's decision.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{error, warn};

use crate::error::LlmError;

/// Structured response shape requested from the model.
///
/// `reasoning` comes first on purpose: the model commits to an explanation
/// before listing categories, which noticeably improves the selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySelection {
    pub reasoning: String,
    pub categories: Vec<String>,
}

/// A chat-completion backend able to honor a JSON response schema.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Send `prompt` and return the raw message content, which is expected
    /// to be a JSON document matching `response_schema`.
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
        response_schema: Value,
    ) -> Result<String, LlmError>;
}

/// Endpoint settings for an OpenAI-compatible chat-completions API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmConfig {
    /// Bearer token for the endpoint.
    pub api_key: String,

    /// API root, without the `/chat/completions` suffix.
    #[serde(default = "LlmConfig::default_base_url")]
    pub base_url: String,

    /// Model identifier the endpoint expects.
    #[serde(default = "LlmConfig::default_model")]
    pub model: String,
}

impl LlmConfig {
    pub(crate) fn default_base_url() -> String {
        "https://api.openai.com/v1".to_string()
    }

    pub(crate) fn default_model() -> String {
        "gpt-4o-mini".to_string()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: Self::default_base_url(),
            model: Self::default_model(),
        }
    }
}

/// Chat-completions client scoped to one endpoint.
///
/// Owns its connection pool; drop the client to tear it down.
pub struct OpenAiChatClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl OpenAiChatClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| LlmError::Transport(format!("HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl ChatCompletion for OpenAiChatClient {
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
        response_schema: Value,
    ) -> Result<String, LlmError> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let payload = build_chat_payload(model, prompt, response_schema);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| LlmError::Transport(format!("HTTP request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status { status, body });
        }

        let value = response
            .json::<Value>()
            .await
            .map_err(|e| LlmError::Malformed(format!("invalid JSON response: {e}")))?;
        extract_message_content(&value)
    }
}

/// Ask the model to pick matching categories from `available_categories`.
///
/// Returns the selected names in relevance order, truncated to `limit`.
/// This never fails: transport and parse errors are logged and reported as
/// an empty selection, so one flaky endpoint cannot take down a batch run.
pub async fn classify_with_llm(
    text: &str,
    chat: &dyn ChatCompletion,
    model: &str,
    available_categories: &[String],
    limit: usize,
) -> Vec<String> {
    let prompt = build_category_prompt(text, available_categories, limit);

    let content = match chat.complete(model, &prompt, selection_schema()).await {
        Ok(content) => content,
        Err(err) => {
            error!(%err, model, "chat completion failed while classifying keywords");
            return Vec::new();
        }
    };

    let selection: CategorySelection = match serde_json::from_str(&content) {
        Ok(selection) => selection,
        Err(err) => {
            error!(%err, model, "could not parse the category selection returned by the model");
            return Vec::new();
        }
    };

    if selection.categories.is_empty() {
        // The prompt requires at least one category; an empty success means
        // the model ignored its contract.
        warn!(model, "model returned a well-formed but empty category selection");
    }

    let mut categories = selection.categories;
    categories.truncate(limit);
    categories
}

/// Build the grounded classification prompt.
///
/// Everything the model may answer with is spelled out in the
/// `<iab_categories>` section, joined by commas the same way the keywords
/// are.
pub fn build_category_prompt(text: &str, available_categories: &[String], limit: usize) -> String {
    let categories = available_categories.join(", ");
    format!(
        r#"You're a classification expert that can classify Google Ads advertisement campaign
keywords into the most matching IAB categories.

<objective>
Classify the given keywords with the most matching IAB categories among the given ones.
</objective>

<rules>
- use only IAB categories from the <iab_categories> section, each is separated by comma
- all given keywords describe the same ad campaign (its advertised product, placement, etc.)
- you should classify keywords only with the most relevant IAB categories
- at least one category must be chosen
- select up to {limit} most matching categories
- returned categories must be ordered by the relevance to the campaign keywords, starting from the most matching
- Google Ads campaign keywords are provided in the <keywords> section, each separated by comma
- your response must have a JSON format specified in <output_format>, do not include any other text
</rules>

<iab_categories>
{categories}
</iab_categories>

<keywords>
{text}
</keywords>

<output_format>
{{
    "reasoning": <explanation of your reasoning, why you chose these categories>,
    "categories": <list of IAB categories that match given campaign keywords, ordered by the relevance, starting from the most matching>
}}
</output_format>"#
    )
}

/// JSON schema for [`CategorySelection`], sent with every request.
pub(crate) fn selection_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "reasoning": { "type": "string" },
            "categories": {
                "type": "array",
                "items": { "type": "string" }
            }
        },
        "required": ["reasoning", "categories"],
        "additionalProperties": false
    })
}

pub(crate) fn build_chat_payload(model: &str, prompt: &str, response_schema: Value) -> Value {
    json!({
        "model": model,
        "messages": [
            { "role": "user", "content": prompt }
        ],
        "response_format": {
            "type": "json_schema",
            "json_schema": {
                "name": "category_selection",
                "strict": true,
                "schema": response_schema
            }
        }
    })
}

pub(crate) fn extract_message_content(value: &Value) -> Result<String, LlmError> {
    value
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| LlmError::Malformed("response has no message content".to_string()))
}
