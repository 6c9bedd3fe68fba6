//! The plan → write → edit article pipeline.
//!
//! # Architecture
//!
//! ```text
//! ArticleRequest { sources, credential }
//!        │
//!        ▼
//! ArticlePipeline::generate()
//!        │
//!        ├─ aggregate(sources)                  → AggregatedTranscript
//!        ├─ CredentialValidator::validate()     → one list_models call
//!        └─ PipelineRunner::run(article_stages)
//!              ├─ plan  (Content Planner, transcript embedded)
//!              ├─ write (Content Writer, context = plan output)
//!              └─ edit  (Editor,         context = write output)
//!        │
//!        ▼
//! PipelineResult ──▶ present::render()
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use research_article::config::AppConfig;
//! use research_article::credential::Credential;
//! use research_article::input::TranscriptSource;
//! use research_article::llm::build_provider;
//! use research_article::pipeline::{generate_article, ArticleRequest};
//! use research_article::present::render;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let provider = build_provider(&config.llm).unwrap();
//!
//!     let request = ArticleRequest::new(
//!         vec![TranscriptSource::new("panel.txt", "Speaker A said X.")],
//!         Credential::new("sk-..."),
//!     );
//!     let result = generate_article(request, provider.as_ref(), &config).await;
//!     println!("{}", render(&result));
//! }
//! ```

pub mod article;
pub mod role;
pub mod runner;
pub mod stage;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use article::{generate_article, ArticlePipeline, ArticleRequest};
pub use role::{article_roles, ArticleRoles, RoleDefinition};
pub use runner::PipelineRunner;
pub use stage::{article_stages, StageTask};
pub use state::{EventSender, PipelineEvent};
