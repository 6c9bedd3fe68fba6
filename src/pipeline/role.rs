//! Role definitions: the persona behind each stage's model call.
//!
//! A role is plain data (name, goal, backstory and two policy flags).  It
//! has no behaviour of its own; the provider turns it into a system
//! prompt.

use std::sync::OnceLock;

/// A named persona/objective bundle guiding one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDefinition {
    pub name: String,
    pub goal: String,
    pub backstory: String,
    /// Whether the model is told it may hand off sub-work.
    pub allow_delegation: bool,
    /// Whether the runner logs this role's full prompt and output at `debug`.
    pub verbose: bool,
}

impl RoleDefinition {
    pub fn planner() -> Self {
        Self {
            name: "Content Planner".into(),
            goal: "Plan engaging and factually accurate content on the given topic".into(),
            backstory: "You're working on planning a research report about a given topic. \
                You collect information that helps the audience learn something and make \
                informed decisions. Your work is the basis for the Content Writer to write \
                an article on this topic."
                .into(),
            allow_delegation: false,
            verbose: true,
        }
    }

    pub fn writer() -> Self {
        Self {
            name: "Content Writer".into(),
            goal: "Write insightful and factually accurate research report about the given topic"
                .into(),
            backstory: "You're working on writing a new opinion piece about a given topic. \
                You base your writing on the work of the Content Planner, who provides an \
                outline and relevant context about the topic. You follow the main objectives \
                and direction of the outline, as provided by the Content Planner. You also \
                provide objective and impartial insights and back them up with information \
                and quotes from the participants. Include factual data and numbers wherever \
                possible. Insert key anonymized quotes wherever possible. You acknowledge in \
                your opinion piece when your statements are opinions as opposed to objective \
                statements. Ensure you are Analytical and Insightful through the use of \
                Expert Opinions and Case Studies. Focus on Practical Recommendations and \
                Emphasize on Current and Emerging Issues."
                .into(),
            allow_delegation: false,
            verbose: true,
        }
    }

    pub fn editor() -> Self {
        Self {
            name: "Editor".into(),
            goal: "Edit a given blog post to align with the writing style of the organization."
                .into(),
            backstory: "You are an editor who receives a research article from the Content \
                Writer. Your goal is to review the blog post to ensure that it follows \
                journalistic best practices, provides balanced viewpoints when providing \
                opinions or assertions, and also avoids major controversial topics or \
                opinions when possible. Maintain a Formal and Professional Tone and ensure \
                content has a Structured and Thematic Organization."
                .into(),
            allow_delegation: false,
            verbose: true,
        }
    }
}

/// The three roles of the article pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRoles {
    pub planner: RoleDefinition,
    pub writer: RoleDefinition,
    pub editor: RoleDefinition,
}

impl Default for ArticleRoles {
    fn default() -> Self {
        Self {
            planner: RoleDefinition::planner(),
            writer: RoleDefinition::writer(),
            editor: RoleDefinition::editor(),
        }
    }
}

/// Process-wide, immutable role set, built on first use.
pub fn article_roles() -> &'static ArticleRoles {
    static ROLES: OnceLock<ArticleRoles> = OnceLock::new();
    ROLES.get_or_init(ArticleRoles::default)
}
