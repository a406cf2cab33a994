//! Chat-completions client for OpenAI-compatible backends.

use super::backend::GenerationBackend;
use super::sampling::SamplingConfig;
use crate::config::{ScribeConfig, DEFAULT_BASE_URL};
use crate::types::Message;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

const DEFAULT_ENDPOINT_PATH: &str = "/v1/chat/completions";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Client for a single-attempt chat completion requesting JSON output.
pub struct OpenAiChatClient {
    http_client: reqwest::Client,
    base_url: String,
    endpoint_path: String,
    api_key: String,
    timeout_secs: u64,
    sampling: SamplingConfig,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl OpenAiChatClient {
    pub fn builder() -> OpenAiChatClientBuilder {
        OpenAiChatClientBuilder::new()
    }

    /// Build a client from the `generation` section and API key of `config`.
    pub fn from_config(config: &ScribeConfig) -> Result<Self> {
        let settings = &config.generation;
        let mut builder = Self::builder()
            .base_url(settings.base_url.clone())
            .timeout_secs(settings.timeout_secs)
            .sampling(SamplingConfig::from(settings));
        if let Some(key) = config.api_key() {
            builder = builder.api_key(key);
        }
        builder.build()
    }

    pub fn sampling(&self) -> &SamplingConfig {
        &self.sampling
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.endpoint_path)
    }

    /// Request body for `messages` with this client's sampling parameters.
    pub fn request_body(&self, messages: &[Message]) -> serde_json::Value {
        let s = &self.sampling;
        let mut body = serde_json::json!({
            "model": s.model,
            "messages": messages,
            "temperature": s.temperature,
            "max_tokens": s.max_tokens,
            "top_p": s.top_p,
            "frequency_penalty": s.frequency_penalty,
            "presence_penalty": s.presence_penalty,
        });
        if let Some(format) = s.json_mode.response_format() {
            body["response_format"] = format;
        }
        body
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::generation_failure(format!("request failed: {}", e), None)
        }
    }
}

/// Pull `error.message` out of an error body, if it has one.
fn backend_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
}

#[async_trait]
impl GenerationBackend for OpenAiChatClient {
    async fn complete(&self, messages: &[Message]) -> Result<String> {
        let request_id = Uuid::new_v4().to_string();
        info!(
            request_id = %request_id,
            model = %self.sampling.model,
            messages = messages.len(),
            "submitting generation request"
        );

        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .header("x-request-id", &request_id)
            .json(&self.request_body(messages))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let message = backend_error_message(&body).unwrap_or(body);
            warn!(
                request_id = %request_id,
                status = status.as_u16(),
                error = %message,
                "backend rejected generation request"
            );
            return Err(Error::generation_failure(message, Some(status.as_u16())));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body).map_err(|e| {
            Error::generation_failure(
                format!("unexpected backend payload: {}", e),
                Some(status.as_u16()),
            )
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                Error::generation_failure("backend returned no completion", Some(status.as_u16()))
            })
    }
}

pub struct OpenAiChatClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    endpoint_path: Option<String>,
    timeout_secs: u64,
    sampling: SamplingConfig,
}

impl OpenAiChatClientBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            endpoint_path: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            sampling: SamplingConfig::default(),
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn endpoint_path(mut self, path: impl Into<String>) -> Self {
        self.endpoint_path = Some(path.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs.max(1);
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.sampling.model = model.into();
        self
    }

    pub fn sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn build(self) -> Result<OpenAiChatClient> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "API key required",
                    ErrorContext::new()
                        .with_field_path("openai_api_key")
                        .with_details("set OPENAI_API_KEY or openai_api_key in the config file"),
                )
            })?;
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        url::Url::parse(&base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid base URL: {}", e),
                ErrorContext::new()
                    .with_field_path("generation.base_url")
                    .with_details(base_url.clone()),
            )
        })?;
        let endpoint_path = self
            .endpoint_path
            .unwrap_or_else(|| DEFAULT_ENDPOINT_PATH.to_string());
        let endpoint_path = if endpoint_path.starts_with('/') {
            endpoint_path
        } else {
            format!("/{}", endpoint_path)
        };
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(OpenAiChatClient {
            http_client,
            base_url,
            endpoint_path,
            api_key,
            timeout_secs: self.timeout_secs,
            sampling: self.sampling,
        })
    }
}

impl Default for OpenAiChatClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OpenAiChatClient {
        OpenAiChatClient::builder()
            .api_key("sk-test")
            .base_url("http://localhost:4010/")
            .build()
            .unwrap()
    }

    #[test]
    fn test_request_body_carries_sampling_and_json_mode() {
        let body = client().request_body(&[Message::system("sys"), Message::user("task")]);
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 700);
        assert_eq!(body["temperature"], 1.0);
        assert_eq!(body["top_p"], 1.0);
        assert_eq!(body["frequency_penalty"], 0.0);
        assert_eq!(body["presence_penalty"], 0.0);
        assert_eq!(body["response_format"]["type"], "json_object");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "task");
    }

    #[test]
    fn test_json_mode_off_omits_response_format() {
        let config = ScribeConfig::from_json_str(
            r#"{"openai_api_key": "sk-test", "generation": {"json_mode": "off"}}"#,
        )
        .unwrap();
        let body = OpenAiChatClient::from_config(&config)
            .unwrap()
            .request_body(&[Message::user("task")]);
        assert!(body.get("response_format").is_none());
        assert_eq!(body["model"], "gpt-4o-mini");
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        assert_eq!(
            client().endpoint(),
            "http://localhost:4010/v1/chat/completions"
        );
        let c = OpenAiChatClient::builder()
            .api_key("sk-test")
            .base_url("http://localhost:4010")
            .endpoint_path("proxy/chat")
            .build()
            .unwrap();
        assert_eq!(c.endpoint(), "http://localhost:4010/proxy/chat");
    }

    #[test]
    fn test_invalid_base_url_is_configuration_error() {
        let err = OpenAiChatClient::builder()
            .api_key("sk-test")
            .base_url("not a url")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_backend_error_message_extraction() {
        assert_eq!(
            backend_error_message(r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#),
            Some("Incorrect API key provided".to_string())
        );
        assert_eq!(backend_error_message("<html>bad gateway</html>"), None);
    }
}
