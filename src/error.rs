//! Error taxonomy for a generation run.
//!
//! Every failure a run can hit is one [`ArticleError`] variant; nothing is
//! logged and dropped.  Input and credential-presence errors are raised
//! before any network traffic, provider errors carry the status code and
//! response body when the provider sent one.

use thiserror::Error;

use crate::credential::ValidationFailure;
use crate::llm::ProviderError;

// ---------------------------------------------------------------------------
// FailureKind
// ---------------------------------------------------------------------------

/// Stable, data-free discriminant of [`ArticleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    MissingInput,
    MissingCredential,
    Decoding,
    EmptyInput,
    CredentialInvalid,
    StageExecution,
    Unclassified,
}

impl FailureKind {
    /// `true` for failures caused by the provider or the network path to
    /// it, as opposed to bad input or internal faults.
    pub fn is_connectivity(self) -> bool {
        matches!(self, FailureKind::CredentialInvalid | FailureKind::StageExecution)
    }

    /// `true` for failures detected before any network call is made.
    pub fn is_input(self) -> bool {
        matches!(
            self,
            FailureKind::MissingInput
                | FailureKind::MissingCredential
                | FailureKind::Decoding
                | FailureKind::EmptyInput
        )
    }
}

// ---------------------------------------------------------------------------
// ArticleError
// ---------------------------------------------------------------------------

/// Everything that can stop a run from producing an article.
#[derive(Debug, Error)]
pub enum ArticleError {
    /// No transcripts were supplied.
    #[error("please upload at least one transcript file")]
    MissingInput,

    /// No credential was supplied.
    #[error("please enter an API key")]
    MissingCredential,

    /// A transcript is not valid UTF-8.
    #[error("transcript `{filename}` is not valid UTF-8 text: {source}")]
    Decoding {
        filename: String,
        #[source]
        source: std::str::Utf8Error,
    },

    /// Transcripts were supplied but contain no text at all.
    #[error("the uploaded transcripts contain no text")]
    EmptyInput,

    /// The provider rejected the credential, or the check never completed.
    ///
    /// `status_code` and `body` are only ever what the provider sent;
    /// `detail` is the local transport error when it sent nothing.
    #[error("API connection check failed: {kind}{}", detail_suffix(.detail))]
    CredentialInvalid {
        kind: ValidationFailure,
        status_code: Option<u16>,
        body: Option<String>,
        detail: Option<String>,
    },

    /// A model call inside the pipeline failed; later stages were skipped.
    #[error("stage `{stage}` failed: {source}")]
    StageExecution {
        stage: String,
        #[source]
        source: ProviderError,
    },

    /// Anything else.
    #[error("{message}")]
    Unclassified { message: String, trace: String },
}

impl ArticleError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ArticleError::MissingInput => FailureKind::MissingInput,
            ArticleError::MissingCredential => FailureKind::MissingCredential,
            ArticleError::Decoding { .. } => FailureKind::Decoding,
            ArticleError::EmptyInput => FailureKind::EmptyInput,
            ArticleError::CredentialInvalid { .. } => FailureKind::CredentialInvalid,
            ArticleError::StageExecution { .. } => FailureKind::StageExecution,
            ArticleError::Unclassified { .. } => FailureKind::Unclassified,
        }
    }

    /// HTTP status code reported by the provider, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ArticleError::CredentialInvalid { status_code, .. } => *status_code,
            ArticleError::StageExecution { source, .. } => source.status_code(),
            _ => None,
        }
    }

    /// Response body reported by the provider, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            ArticleError::CredentialInvalid { body, .. } => body.as_deref(),
            ArticleError::StageExecution { source, .. } => source.body(),
            _ => None,
        }
    }

    /// Name of the stage that failed, for `StageExecution`.
    pub fn stage(&self) -> Option<&str> {
        match self {
            ArticleError::StageExecution { stage, .. } => Some(stage),
            _ => None,
        }
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(" ({d})"))
        .unwrap_or_default()
}

impl From<anyhow::Error> for ArticleError {
    fn from(err: anyhow::Error) -> Self {
        ArticleError::Unclassified {
            message: err.to_string(),
            trace: format!("{err:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
