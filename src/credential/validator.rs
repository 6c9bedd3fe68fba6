//! Fail-fast credential check against the model provider.
//!
//! [`CredentialValidator::validate`] issues the provider's model-listing
//! request and classifies the outcome.  It never returns an error: every
//! failure becomes [`Validation::Invalid`] and the caller decides what to
//! do with it.

use std::fmt;
use std::time::Duration;

use crate::credential::Credential;
use crate::error::ArticleError;
use crate::llm::{ModelProvider, ProviderError};

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Why a credential check did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    /// The provider answered with a non-2xx status.
    Rejected,
    /// The request never got an answer (DNS, refused connection, TLS …).
    Network,
    /// No answer within the validation timeout.
    NetworkTimeout,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ValidationFailure::Rejected => "provider rejected the request",
            ValidationFailure::Network => "network error",
            ValidationFailure::NetworkTimeout => "network timeout",
        };
        f.write_str(text)
    }
}

/// Outcome of a credential check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid {
        kind: ValidationFailure,
        /// Status and body exactly as the provider sent them.
        status_code: Option<u16>,
        body: Option<String>,
        /// Local error text when the provider never answered.
        detail: Option<String>,
    },
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    /// Convert into the pipeline's error type.
    pub fn into_result(self) -> Result<(), ArticleError> {
        match self {
            Validation::Valid => Ok(()),
            Validation::Invalid {
                kind,
                status_code,
                body,
                detail,
            } => Err(ArticleError::CredentialInvalid {
                kind,
                status_code,
                body,
                detail,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// CredentialValidator
// ---------------------------------------------------------------------------

/// Runs the model-listing request under a hard timeout.
pub struct CredentialValidator<'a> {
    provider: &'a dyn ModelProvider,
    timeout: Duration,
}

impl<'a> CredentialValidator<'a> {
    pub fn new(provider: &'a dyn ModelProvider, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Check `credential` against the provider.
    ///
    /// The bound applies even if the provider implementation has no timeout
    /// of its own.
    pub async fn validate(&self, credential: &Credential) -> Validation {
        log::info!("credential: checking API connection");

        let outcome = tokio::time::timeout(self.timeout, self.provider.list_models(credential)).await;

        let validation = match outcome {
            Err(_) | Ok(Err(ProviderError::Timeout)) => Validation::Invalid {
                kind: ValidationFailure::NetworkTimeout,
                status_code: None,
                body: None,
                detail: Some(format!("no answer within {}s", self.timeout.as_secs_f32())),
            },
            Ok(Err(ProviderError::Status { status, body })) => Validation::Invalid {
                kind: ValidationFailure::Rejected,
                status_code: Some(status),
                body: Some(body),
                detail: None,
            },
            Ok(Err(ProviderError::UnreadableBody { status, reason })) => Validation::Invalid {
                kind: ValidationFailure::Rejected,
                status_code: Some(status),
                body: None,
                detail: Some(reason),
            },
            Ok(Err(other)) => Validation::Invalid {
                kind: ValidationFailure::Network,
                status_code: None,
                body: None,
                detail: Some(other.to_string()),
            },
            Ok(Ok(reply)) if reply.is_success() => Validation::Valid,
            Ok(Ok(reply)) => Validation::Invalid {
                kind: ValidationFailure::Rejected,
                status_code: Some(reply.status),
                body: Some(reply.body),
                detail: None,
            },
        };

        match &validation {
            Validation::Valid => log::info!("credential: API connection successful"),
            Validation::Invalid {
                kind, status_code, ..
            } => log::warn!("credential: check failed ({kind}, status={status_code:?})"),
        }

        validation
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{GenerateRequest, ProviderReply};
    use async_trait::async_trait;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    enum ListBehaviour {
        Reply(u16, &'static str),
        Fail(fn() -> ProviderError),
        Hang,
    }

    struct ListOnly(ListBehaviour);

    #[async_trait]
    impl ModelProvider for ListOnly {
        async fn list_models(&self, _c: &Credential) -> Result<ProviderReply, ProviderError> {
            match &self.0 {
                ListBehaviour::Reply(status, body) => Ok(ProviderReply {
                    status: *status,
                    body: body.to_string(),
                }),
                ListBehaviour::Fail(make) => Err(make()),
                ListBehaviour::Hang => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    unreachable!("validator should have timed out")
                }
            }
        }

        async fn generate(&self, _r: &GenerateRequest<'_>) -> Result<String, ProviderError> {
            unreachable!("validator must never generate")
        }
    }

    async fn check(behaviour: ListBehaviour) -> Validation {
        let provider = ListOnly(behaviour);
        let credential = Credential::new("sk-test").unwrap();
        CredentialValidator::new(&provider, Duration::from_millis(50))
            .validate(&credential)
            .await
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn success_status_is_valid() {
        assert_eq!(check(ListBehaviour::Reply(200, "{}")).await, Validation::Valid);
    }

    #[tokio::test]
    async fn unauthorized_is_rejected_with_status_and_body() {
        let validation = check(ListBehaviour::Reply(401, "invalid_api_key")).await;
        assert_eq!(
            validation,
            Validation::Invalid {
                kind: ValidationFailure::Rejected,
                status_code: Some(401),
                body: Some("invalid_api_key".into()),
                detail: None,
            }
        );
    }

    #[tokio::test]
    async fn hanging_provider_times_out() {
        let validation = check(ListBehaviour::Hang).await;
        assert!(matches!(
            validation,
            Validation::Invalid {
                kind: ValidationFailure::NetworkTimeout,
                status_code: None,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn client_timeout_is_network_timeout() {
        let validation = check(ListBehaviour::Fail(|| ProviderError::Timeout)).await;
        assert!(matches!(
            validation,
            Validation::Invalid {
                kind: ValidationFailure::NetworkTimeout,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn connection_error_is_network_failure() {
        let validation =
            check(ListBehaviour::Fail(|| ProviderError::Request("connection refused".into()))).await;
        match validation {
            Validation::Invalid {
                kind: ValidationFailure::Network,
                status_code: None,
                body,
                detail: Some(detail),
            } => {
                assert!(body.is_none(), "local errors must not pose as provider bodies");
                assert!(detail.contains("connection refused"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn invalid_converts_to_credential_error() {
        let err = Validation::Invalid {
            kind: ValidationFailure::Rejected,
            status_code: Some(403),
            body: Some("forbidden".into()),
            detail: None,
        }
        .into_result()
        .unwrap_err();

        assert_eq!(err.status_code(), Some(403));
        assert_eq!(err.body(), Some("forbidden"));
        assert!(Validation::Valid.into_result().is_ok());
    }
}
