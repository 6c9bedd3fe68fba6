//! Stage tasks: one role bound to one instruction.

use crate::input::AggregatedTranscript;

use super::role::ArticleRoles;
use super::RoleDefinition;

/// A unit of work for one model call.
///
/// Built fresh for each run and consumed by the runner.
#[derive(Debug, Clone)]
pub struct StageTask<'r> {
    /// Short stage name used in logs, events and errors (`"plan"`, …).
    pub name: String,
    pub instruction: String,
    /// What a finished answer looks like; handed to the model verbatim.
    pub expected_output: String,
    pub role: &'r RoleDefinition,
}

impl<'r> StageTask<'r> {
    pub fn new(
        name: impl Into<String>,
        instruction: impl Into<String>,
        expected_output: impl Into<String>,
        role: &'r RoleDefinition,
    ) -> Self {
        Self {
            name: name.into(),
            instruction: instruction.into(),
            expected_output: expected_output.into(),
            role,
        }
    }
}

/// Build the plan → write → edit stages for `transcript`.
///
/// Only the plan stage embeds the transcript; the later stages rely on the
/// runner handing them the previous stage's output.
pub fn article_stages<'r>(
    roles: &'r ArticleRoles,
    transcript: &AggregatedTranscript,
) -> Vec<StageTask<'r>> {
    vec![
        StageTask::new(
            "plan",
            format!(
                "Produce a structured content plan for the following transcript material: {}",
                transcript.as_str()
            ),
            "A comprehensive content plan with an outline, the target audience, the key \
             points and themes raised by the participants, and notable quotes to use.",
            &roles.planner,
        ),
        StageTask::new(
            "write",
            "Write a full research article following the content plan produced by the \
             previous stage.",
            "A well-written research article in markdown, with a title, an introduction, \
             thematic sections and a conclusion with practical recommendations.",
            &roles.writer,
        ),
        StageTask::new(
            "edit",
            "Edit and finalize the research article produced by the previous stage for \
             tone, balance, and structure.",
            "The final, publication-ready research article in markdown.",
            &roles.editor,
        ),
    ]
}
