use crate::config::Config;
use crate::error::TranslateError;
use crate::extract::extract_json_region;
use crate::provider::{TranslationProvider, TranslationRequest};
use crate::retry::{with_retry_if, RetryConfig};
use anyhow::{bail, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// OpenAI Chat Completion request
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

/// One translation unit exchanged with the model.
///
/// The request always carries a single item whose `original` is the whole
/// source file; the model fills in `translated`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct TranslationItem {
    #[serde(default)]
    original: String,
    #[serde(default)]
    translated: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    context: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    failure: String,
}

/// Build the system prompt for translation
fn build_system_prompt(source_language: &str, target_language: &str) -> String {
    format!(
        r#"Translate from {source_language} to {target_language}.

- Translate each object in the array.
- 'original' is the text to be translated.
- 'translated' must not be empty.
- 'context' is additional info if needed.
- 'failure' explains why the previous translation failed.
- Preserve text formatting, case sensitivity, whitespace, and keep roughly the same length.

Special Instructions:
- Do NOT translate or modify placeholders like {{{{variableName}}}}; keep them exactly as-is.
- Do NOT add new placeholders or variables; keep the same count and names.
- Do NOT convert {{{{NEWLINE}}}} to \n.
- Do NOT translate or modify i18n function calls in the form $t(key); return them verbatim (e.g., $t(ago) stays $t(ago)).
- Do NOT translate or modify HTML/XML tags (e.g., <button>...</button>, <icon/>, <actionButton/>); preserve tag names, attributes, and structure.

Return the translation as JSON."#
    )
}

/// Build the user prompt carrying the serialized translation items
fn build_user_prompt(source_language: &str, target_language: &str, payload: &str) -> String {
    format!(
        "inputLanguage={}; outputLanguage={};\n{}",
        source_language, target_language, payload
    )
}

/// Pull the translated text out of the model's reply
fn parse_translation(content: &str) -> Result<String, TranslateError> {
    let region = extract_json_region(content);

    let items: Vec<TranslationItem> =
        serde_json::from_str(region).map_err(|source| TranslateError::MalformedPayload {
            source,
            raw: content.to_string(),
        })?;

    let first = items
        .into_iter()
        .next()
        .ok_or(TranslateError::NoTranslations)?;

    if first.translated.trim().is_empty() {
        return Err(TranslateError::EmptyTranslation);
    }

    Ok(first.translated)
}

/// Translation backend backed by an OpenAI-compatible chat completions API
pub struct ChatGptProvider {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
    temperature: f32,
    retry: RetryConfig,
}

impl ChatGptProvider {
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.openai_api_key.trim().is_empty() {
            bail!("chatgpt api key is required");
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key: config.openai_api_key.clone(),
            api_url: config.openai_api_url.clone(),
            model: config.model().to_string(),
            temperature: config.openai_temperature,
            retry: config.retry.clone(),
        })
    }

    /// Send one chat request and return the first choice's content, trimmed
    async fn complete(&self, request: &ChatRequest) -> Result<String, TranslateError> {
        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(TranslateError::Api { status, body });
        }

        // A 2xx body that is not a chat completion is bad output, not a transport error
        let body = response.text().await?;
        let chat_response: ChatResponse = serde_json::from_str(&body)
            .map_err(|source| TranslateError::MalformedPayload { source, raw: body })?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or(TranslateError::EmptyChoices)
    }
}

#[async_trait]
impl TranslationProvider for ChatGptProvider {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateError> {
        let items = [TranslationItem {
            original: request.text.clone(),
            ..Default::default()
        }];
        let payload = serde_json::to_string(&items).map_err(TranslateError::Serialize)?;

        let chat_request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: build_system_prompt(
                        &request.source_language,
                        &request.target_language,
                    ),
                },
                Message {
                    role: "user".to_string(),
                    content: build_user_prompt(
                        &request.source_language,
                        &request.target_language,
                        &payload,
                    ),
                },
            ],
            temperature: self.temperature,
        };

        let content = with_retry_if(
            &self.retry,
            &format!("Translation to {}", request.target_language),
            || self.complete(&chat_request),
            TranslateError::is_retryable,
        )
        .await?;

        parse_translation(&content)
    }

    fn name(&self) -> &str {
        "chatgpt"
    }
}
