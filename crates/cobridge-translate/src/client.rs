//! Chat-completions HTTP translator

use crate::config::TranslatorConfig;
use crate::error::TranslateError;
use crate::translator::{Translation, Translator};
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Translator backed by an OpenAI-compatible `/chat/completions` endpoint
#[derive(Clone)]
pub struct ChatCompletionsTranslator {
    client: Client,
    config: TranslatorConfig,
    endpoint: String,
}

impl std::fmt::Debug for ChatCompletionsTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionsTranslator")
            .field("endpoint", &self.endpoint)
            .field("model", &self.config.model)
            .finish()
    }
}

impl ChatCompletionsTranslator {
    /// Create a client from configuration
    ///
    /// # Errors
    /// - `TranslateError::Config` if no API key is set or it is not a valid
    ///   header value
    pub fn new(config: TranslatorConfig) -> Result<Self, TranslateError> {
        let key = config
            .api_key
            .as_deref()
            .ok_or_else(|| TranslateError::Config("no API key configured".to_string()))?;

        let mut headers = header::HeaderMap::new();
        let auth = header::HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|e| TranslateError::Config(format!("invalid API key: {e}")))?;
        headers.insert(header::AUTHORIZATION, auth);

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(format!("cobridge/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        let endpoint = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));

        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    async fn send(&self, messages: Vec<ChatMessage<'_>>) -> Result<Translation, TranslateError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
        };

        debug!(endpoint = %self.endpoint, model = %self.config.model, "sending completion request");
        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            error!(status = status.as_u16(), %message, "translation request rejected");
            return Err(if status == StatusCode::TOO_MANY_REQUESTS {
                TranslateError::RateLimited(message)
            } else {
                TranslateError::api(status.as_u16(), message)
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| TranslateError::InvalidResponse(e.to_string()))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(TranslateError::EmptyResponse)?;

        Ok(Translation::new(content))
    }
}

/// User message for a translation request
#[must_use]
pub fn translation_prompt(source: &str, context: &str) -> String {
    format!(
        "Translate this COBOL code to modern Java:\n\n\
         COBOL Code:\n{source}\n\n\
         Context:\n{context}\n\n\
         Requirements:\n\
         1. Use modern Java best practices\n\
         2. Include proper class structure and main method\n\
         3. Maintain the same functionality\n\
         4. Use clear naming conventions"
    )
}

#[async_trait]
impl Translator for ChatCompletionsTranslator {
    async fn translate(&self, source: &str, context: &str) -> Result<Translation, TranslateError> {
        let prompt = translation_prompt(source, context);
        self.send(vec![
            ChatMessage {
                role: "system",
                content: &self.config.system_prompt,
            },
            ChatMessage {
                role: "user",
                content: &prompt,
            },
        ])
        .await
    }

    async fn complete(&self, prompt: &str) -> Result<Translation, TranslateError> {
        self.send(vec![ChatMessage {
            role: "user",
            content: prompt,
        }])
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_api_key() {
        let result = ChatCompletionsTranslator::new(TranslatorConfig::new());
        assert!(matches!(result, Err(TranslateError::Config(_))));
    }

    #[test]
    fn endpoint_joins_base_url() {
        let config = TranslatorConfig::new()
            .with_api_key("sk-test")
            .with_base_url("http://localhost:8080/v1/");
        let translator = ChatCompletionsTranslator::new(config).unwrap();
        assert_eq!(translator.endpoint, "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn prompt_carries_source_and_context() {
        let prompt = translation_prompt("DISPLAY 'HI'.", "Greets the user");
        assert!(prompt.contains("DISPLAY 'HI'."));
        assert!(prompt.contains("Greets the user"));
    }

    #[test]
    fn parses_completion_body() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  class A {}\n"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        let content = parsed.choices[0].message.content.as_deref().unwrap();
        assert_eq!(content.trim(), "class A {}");
    }

    #[test]
    fn parses_error_envelope() {
        let body = r#"{"error":{"message":"Rate limit reached","type":"requests"}}"#;
        let parsed: ErrorEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "Rate limit reached");
    }
}
