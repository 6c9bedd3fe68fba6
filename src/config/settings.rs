//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and handed to each run
//! by value.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// LlmProvider
// ---------------------------------------------------------------------------

/// Selects which model backend serves the credential check and the stage
/// generations.
///
/// Every variant speaks the OpenAI wire format; they differ only in the
/// default endpoint and in whether a bearer token is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LlmProvider {
    /// api.openai.com.
    OpenAi,
    /// Any OpenAI-compatible REST API (Groq, Together.ai, LM Studio, vLLM …).
    OpenAiCompatible,
    /// Ollama running locally: no authentication header is sent.
    Ollama,
}

impl LlmProvider {
    /// Base URL used when the config does not override it.
    pub fn default_base_url(self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "https://api.openai.com",
            LlmProvider::OpenAiCompatible => "http://localhost:8000",
            LlmProvider::Ollama => "http://localhost:11434",
        }
    }

    /// Whether requests carry `Authorization: Bearer <credential>`.
    pub fn sends_bearer_token(self) -> bool {
        !matches!(self, LlmProvider::Ollama)
    }
}

impl Default for LlmProvider {
    fn default() -> Self {
        Self::OpenAi
    }
}

// ---------------------------------------------------------------------------
// LlmConfig
// ---------------------------------------------------------------------------

/// Settings for the model provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Which backend to use.
    pub provider: LlmProvider,
    /// Base URL of the API endpoint, without the `/v1/...` suffix.
    pub base_url: String,
    /// Model identifier sent to the API (e.g. `"gpt-4o"`). Opaque to the
    /// pipeline.
    pub model: String,
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f32,
    /// Upper bound on tokens generated per stage; `None` leaves it to the
    /// provider.
    pub max_tokens: Option<u32>,
    /// Maximum seconds to wait for a single generation response.
    pub timeout_secs: u64,
    /// Maximum seconds to wait for the credential check.
    pub validation_timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        let provider = LlmProvider::default();
        Self {
            provider,
            base_url: provider.default_base_url().into(),
            model: "gpt-4o".into(),
            temperature: 0.7,
            max_tokens: Some(4096),
            timeout_secs: 300,
            validation_timeout_secs: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// PipelineConfig
// ---------------------------------------------------------------------------

/// Settings for the stage runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Hard upper bound on one stage, enforced by the runner regardless of
    /// the provider's own client timeout.
    pub stage_timeout_secs: u64,
    /// Log every stage's instruction and output at `info` instead of `debug`.
    pub verbose: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stage_timeout_secs: 360,
            verbose: false,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use research_article::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Model provider settings.
    pub llm: LlmConfig,
    /// Stage runner settings.
    pub pipeline: PipelineConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// so callers never need to special-case a missing file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns `true` when no `settings.toml` file exists yet.
    pub fn is_first_run() -> bool {
        !AppPaths::new().settings_file.exists()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
