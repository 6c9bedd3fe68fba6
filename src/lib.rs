//! Research-article generation from interview transcripts.
//!
//! Uploaded transcripts are merged into one text, the API credential is
//! checked against the model provider, and three roles (planner, writer,
//! editor) each make one model call in strict sequence.  The editor's
//! output is the article.
//!
//! Modules, leaves first:
//! * [`input`]: transcript loading and aggregation.
//! * [`credential`]: the API key and its fail-fast check.
//! * [`llm`]: model-provider trait and its OpenAI-compatible client.
//! * [`pipeline`]: roles, stages, the sequential runner and entry point.
//! * [`present`]: result rendering.
//! * [`config`]: `settings.toml` persistence.
//! * [`error`]: the failure taxonomy.

pub mod config;
pub mod credential;
pub mod error;
pub mod input;
pub mod llm;
pub mod pipeline;
pub mod present;

pub use error::{ArticleError, FailureKind};
