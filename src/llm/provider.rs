//! Core `ModelProvider` trait and the errors it reports.
//!
//! The pipeline talks to the language model through exactly two calls:
//! listing models (used as a cheap credential check) and generating one
//! stage's text.  Everything provider-specific lives behind this trait.

use async_trait::async_trait;
use thiserror::Error;

use crate::credential::Credential;
use crate::pipeline::RoleDefinition;

// ---------------------------------------------------------------------------
// ProviderError
// ---------------------------------------------------------------------------

/// Errors that can occur while talking to the model provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The provider answered with a non-2xx status.
    #[error("provider returned HTTP {status}")]
    Status { status: u16, body: String },

    /// The provider answered with a non-2xx status but its body could not
    /// be read.
    #[error("provider returned HTTP {status}; reading the response body failed: {reason}")]
    UnreadableBody { status: u16, reason: String },

    /// The response could not be parsed as expected JSON.
    #[error("failed to parse provider response: {0}")]
    Parse(String),

    /// The provider returned a response with no usable text content.
    #[error("provider returned an empty response")]
    EmptyResponse,
}

impl ProviderError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ProviderError::Status { status, .. }
            | ProviderError::UnreadableBody { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            ProviderError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Request / reply types
// ---------------------------------------------------------------------------

/// Raw outcome of a model-listing call: whatever status and body came back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReply {
    pub status: u16,
    pub body: String,
}

impl ProviderReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One stage's model call.
///
/// `context` is the literal output of the immediately preceding stage, or
/// `None` for the first stage.
#[derive(Debug, Clone, Copy)]
pub struct GenerateRequest<'a> {
    pub credential: &'a Credential,
    pub role: &'a RoleDefinition,
    pub instruction: &'a str,
    pub expected_output: &'a str,
    pub context: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// ModelProvider trait
// ---------------------------------------------------------------------------

/// Async access to a language-model provider.
///
/// Implementors must be `Send + Sync` so they can be shared as
/// `Arc<dyn ModelProvider>`.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Issue the lightweight model-listing request.
    ///
    /// Non-2xx answers come back as `Ok` with their status; only transport
    /// failures are `Err`.
    async fn list_models(&self, credential: &Credential) -> Result<ProviderReply, ProviderError>;

    /// Generate the text for one stage.
    async fn generate(&self, request: &GenerateRequest<'_>) -> Result<String, ProviderError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
