//! Structured outcome of one pipeline run.

use crate::error::{ArticleError, FailureKind};

/// A run either produced the final article or failed with one
/// [`Failure`].  Partial output is never carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineResult {
    Success { final_text: String },
    Failure(Failure),
}

impl PipelineResult {
    pub fn is_success(&self) -> bool {
        matches!(self, PipelineResult::Success { .. })
    }

    pub fn outcome_label(&self) -> &'static str {
        match self {
            PipelineResult::Success { .. } => "success",
            PipelineResult::Failure(_) => "failure",
        }
    }
}

impl From<ArticleError> for PipelineResult {
    fn from(err: ArticleError) -> Self {
        PipelineResult::Failure(Failure::from(err))
    }
}

/// Everything the presenter needs to explain a failed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
    pub status_code: Option<u16>,
    pub body: Option<String>,
    /// Stage that failed, for stage errors.
    pub stage: Option<String>,
    /// Cause chain / diagnostic trace, for errors that are not plainly
    /// input or provider problems.
    pub trace: Option<String>,
}

impl From<ArticleError> for Failure {
    fn from(err: ArticleError) -> Self {
        let trace = match &err {
            ArticleError::Unclassified { trace, .. } => Some(trace.clone()),
            _ => source_chain(&err),
        };
        Self {
            kind: err.kind(),
            message: err.to_string(),
            status_code: err.status_code(),
            body: err.body().map(str::to_string),
            stage: err.stage().map(str::to_string),
            trace,
        }
    }
}

/// `Caused by:` lines for every nested source, if there are any.
fn source_chain(err: &(dyn std::error::Error + 'static)) -> Option<String> {
    let mut lines = Vec::new();
    let mut current = err.source();
    while let Some(cause) = current {
        lines.push(format!("Caused by: {cause}"));
        current = cause.source();
    }
    (!lines.is_empty()).then(|| lines.join("\n"))
}
