//! Model-provider access for the article pipeline.
//!
//! This module provides:
//! * [`ModelProvider`]: async trait with the two calls the pipeline needs
//!   (`list_models`, `generate`).
//! * [`OpenAiProvider`]: OpenAI-compatible REST implementation.
//! * [`build_provider`]: picks the implementation for an [`LlmConfig`].
//! * [`PromptBuilder`]: turns a role and a stage instruction into chat
//!   messages.
//! * [`ProviderError`]: error variants for provider calls.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use research_article::config::AppConfig;
//! use research_article::credential::Credential;
//! use research_article::llm::{GenerateRequest, ModelProvider, OpenAiProvider};
//! use research_article::pipeline::RoleDefinition;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let provider = OpenAiProvider::from_config(&config.llm).unwrap();
//!     let credential = Credential::new("sk-...").unwrap();
//!     let planner = RoleDefinition::planner();
//!
//!     let plan = provider
//!         .generate(&GenerateRequest {
//!             credential: &credential,
//!             role: &planner,
//!             instruction: "Plan content for the topic: ...",
//!             expected_output: "A content plan",
//!             context: None,
//!         })
//!         .await
//!         .unwrap();
//!     println!("{plan}");
//! }
//! ```
//!
//! [`LlmConfig`]: crate::config::LlmConfig

pub mod openai;
pub mod prompt;
pub mod provider;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use openai::{build_provider, OpenAiProvider};
pub use prompt::PromptBuilder;
pub use provider::{GenerateRequest, ModelProvider, ProviderError, ProviderReply};
