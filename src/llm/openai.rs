//! `OpenAiProvider`: the HTTP implementation of [`ModelProvider`].
//!
//! Calls any OpenAI-compatible API: `GET /v1/models` for the credential
//! check and `POST /v1/chat/completions` for each stage.  All connection
//! details come from [`LlmConfig`]; the credential arrives with each call
//! and is never stored on the provider.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::{LlmConfig, LlmProvider};
use crate::credential::Credential;
use crate::llm::prompt::PromptBuilder;
use crate::llm::provider::{GenerateRequest, ModelProvider, ProviderError, ProviderReply};

// ---------------------------------------------------------------------------
// OpenAiProvider
// ---------------------------------------------------------------------------

/// Speaks the OpenAI REST wire format.
///
/// Works with OpenAI itself, Ollama (OpenAI mode), Groq, Together.ai,
/// LM Studio, vLLM: anything that serves `/v1/models` and
/// `/v1/chat/completions`.
pub struct OpenAiProvider {
    client: reqwest::Client,
    validation_timeout: Duration,
    config: LlmConfig,
}

impl OpenAiProvider {
    /// Build a provider from config.
    ///
    /// The HTTP client carries the generation timeout; the model-listing
    /// request overrides it with the shorter validation timeout.
    pub fn from_config(config: &LlmConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            validation_timeout: Duration::from_secs(config.validation_timeout_secs),
            config: config.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v1/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Attach `Authorization: Bearer …` unless the backend is Ollama.
    fn authorize(
        &self,
        req: reqwest::RequestBuilder,
        credential: &Credential,
    ) -> reqwest::RequestBuilder {
        if self.config.provider.sends_bearer_token() {
            req.bearer_auth(credential.expose())
        } else {
            req
        }
    }

    fn chat_body(&self, request: &GenerateRequest<'_>) -> serde_json::Value {
        let (system_msg, user_msg) = PromptBuilder::new(request.role).build_chat(
            request.instruction,
            request.expected_output,
            request.context,
        );

        let mut body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": system_msg },
                { "role": "user",   "content": user_msg   }
            ],
            "stream":      false,
            "temperature": self.config.temperature,
        });
        if let Some(max_tokens) = self.config.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }
        body
    }
}

#[async_trait]
impl ModelProvider for OpenAiProvider {
    async fn list_models(&self, credential: &Credential) -> Result<ProviderReply, ProviderError> {
        let req = self
            .client
            .get(self.endpoint("models"))
            .timeout(self.validation_timeout);

        let response = self.authorize(req, credential).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(ProviderReply { status, body })
    }

    async fn generate(&self, request: &GenerateRequest<'_>) -> Result<String, ProviderError> {
        let body = self.chat_body(request);
        let req = self.client.post(self.endpoint("chat/completions")).json(&body);

        let response = self.authorize(req, request.credential).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status.as_u16(), response.text().await));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        let text = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(ProviderError::EmptyResponse)?
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        Ok(text)
    }
}

/// Error for a non-2xx answer.  A body that cannot be read is reported as
/// such rather than as an empty provider body.
fn status_error<E: std::fmt::Display>(status: u16, body: Result<String, E>) -> ProviderError {
    match body {
        Ok(body) => ProviderError::Status { status, body },
        Err(e) => {
            log::warn!("llm: HTTP {status} with unreadable body: {e}");
            ProviderError::UnreadableBody {
                status,
                reason: e.to_string(),
            }
        }
    }
}

/// Pick the provider implementation for `config`.
///
/// Every [`LlmProvider`] variant is served by [`OpenAiProvider`] today; the
/// variant only changes endpoint defaults and authentication.
pub fn build_provider(config: &LlmConfig) -> Result<Box<dyn ModelProvider>, ProviderError> {
    match config.provider {
        LlmProvider::OpenAi | LlmProvider::OpenAiCompatible | LlmProvider::Ollama => {
            Ok(Box::new(OpenAiProvider::from_config(config)?))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
