//! Configuration for the research-article generator.
//!
//! Provides `AppConfig` (top-level settings), the provider and pipeline
//! sub-configs, `AppPaths` for the platform config directory, and TOML
//! persistence via `AppConfig::load` / `AppConfig::save`.
//!
//! The API credential is deliberately absent: it is supplied per run and
//! handed to the pipeline entry point alongside the config.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, LlmConfig, LlmProvider, PipelineConfig};
