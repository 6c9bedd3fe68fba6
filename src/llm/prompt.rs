//! Prompt builder for stage generations.
//!
//! [`PromptBuilder`] turns a [`RoleDefinition`] plus one stage's
//! instruction into a `(system_msg, user_msg)` pair for any OpenAI-style
//! chat-completions endpoint:
//!
//! * the **system** message is the role: name, backstory, goal and its
//!   delegation policy;
//! * the **user** message is the work: instruction, expected output, the
//!   previous stage's text (when there is one) and a closing cue.

use crate::pipeline::RoleDefinition;

// ---------------------------------------------------------------------------
// Fixed fragments
// ---------------------------------------------------------------------------

const NO_DELEGATION: &str = "\
You work alone on this task: do not hand any part of it to a coworker, \
complete it yourself.";

const MAY_DELEGATE: &str = "\
You may split off a well-scoped part of this task for a coworker, but you \
remain responsible for the complete final answer.";

const CONTEXT_HEADER: &str = "This is the context you're working with:";

const FINAL_ANSWER_CUE: &str = "\
Begin! Return the actual complete content as your final answer, not a \
summary and not a description of what you would write.";

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds chat prompts for a single stage.
///
/// # Example
/// ```rust
/// use research_article::llm::PromptBuilder;
/// use research_article::pipeline::RoleDefinition;
///
/// let planner = RoleDefinition::planner();
/// let (system, user) = PromptBuilder::new(&planner).build_chat(
///     "Plan content for the topic: ...",
///     "A content plan",
///     None,
/// );
/// assert!(system.contains("Content Planner"));
/// assert!(user.contains("Plan content"));
/// ```
pub struct PromptBuilder<'a> {
    role: &'a RoleDefinition,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(role: &'a RoleDefinition) -> Self {
        Self { role }
    }

    /// Build the `(system_msg, user_msg)` pair.
    ///
    /// `context` is embedded verbatim under a labelled block; nothing is
    /// trimmed or summarised.
    pub fn build_chat(
        &self,
        instruction: &str,
        expected_output: &str,
        context: Option<&str>,
    ) -> (String, String) {
        (self.system_message(), Self::user_message(instruction, expected_output, context))
    }

    fn system_message(&self) -> String {
        let delegation = if self.role.allow_delegation {
            MAY_DELEGATE
        } else {
            NO_DELEGATION
        };
        format!(
            "You are {}. {}\nYour personal goal is: {}\n{}",
            self.role.name, self.role.backstory, self.role.goal, delegation
        )
    }

    fn user_message(instruction: &str, expected_output: &str, context: Option<&str>) -> String {
        let mut msg = String::with_capacity(
            instruction.len() + context.map_or(0, str::len) + 512,
        );
        msg.push_str("Current Task: ");
        msg.push_str(instruction);
        msg.push_str("\n\nThis is the expected criteria for your final answer: ");
        msg.push_str(expected_output);
        if let Some(ctx) = context {
            msg.push_str("\n\n");
            msg.push_str(CONTEXT_HEADER);
            msg.push('\n');
            msg.push_str(ctx);
        }
        msg.push_str("\n\n");
        msg.push_str(FINAL_ANSWER_CUE);
        msg
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
