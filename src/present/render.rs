//! Turn a [`PipelineResult`] into text for the user.

use std::fmt::Write as _;

use crate::error::FailureKind;

use super::result::{Failure, PipelineResult};

/// Render the outcome of a run.
///
/// * success: the article itself, untouched;
/// * provider / connectivity failures: `API Error:` plus the status code
///   and response body when the provider sent them;
/// * input failures: the message alone;
/// * anything else: `An error occurred:` plus a trace block.
pub fn render(result: &PipelineResult) -> String {
    match result {
        PipelineResult::Success { final_text } => final_text.clone(),
        PipelineResult::Failure(failure) => render_failure(failure),
    }
}

fn render_failure(failure: &Failure) -> String {
    let mut out = String::new();

    if failure.kind.is_input() {
        out.push_str(&failure.message);
        return out;
    }

    if failure.kind.is_connectivity() {
        let _ = write!(out, "API Error: {}", failure.message);
        if let Some(status) = failure.status_code {
            let _ = write!(out, "\nResponse Status Code: {status}");
        }
        if let Some(body) = failure.body.as_deref() {
            let _ = write!(out, "\nResponse Content: {body}");
        }
        return out;
    }

    let _ = write!(out, "An error occurred: {}", failure.message);
    if let Some(trace) = failure.trace.as_deref() {
        let _ = write!(out, "\nTraceback:\n{trace}");
    }
    out
}

/// Process exit status for a result.
///
/// | outcome                              | code |
/// |--------------------------------------|------|
/// | success                              | 0    |
/// | unclassified                         | 1    |
/// | missing / undecodable / empty input  | 2    |
/// | credential or provider failure       | 3    |
pub fn exit_code(result: &PipelineResult) -> i32 {
    match result {
        PipelineResult::Success { .. } => 0,
        PipelineResult::Failure(f) if f.kind.is_input() => 2,
        PipelineResult::Failure(f) if f.kind.is_connectivity() => 3,
        PipelineResult::Failure(f) => {
            debug_assert_eq!(f.kind, FailureKind::Unclassified);
            1
        }
    }
}
