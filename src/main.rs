//! Command-line entry point: Research Article Generator.
//!
//! # Startup sequence
//!
//! 1. Parse arguments.
//! 2. Initialise logging.
//! 3. Load [`AppConfig`] (explicit `--config` path or the platform
//!    `settings.toml`; defaults on first run) and apply flag overrides.
//! 4. Build the model provider from config.
//! 5. Spawn a task printing [`PipelineEvent`] status lines to stderr.
//! 6. Read the transcripts, run the pipeline, render the result.
//!
//! The article goes to stdout; status and failures go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::sync::mpsc;

use research_article::config::{AppConfig, AppPaths, LlmProvider};
use research_article::credential::Credential;
use research_article::input::TranscriptSource;
use research_article::llm::build_provider;
use research_article::pipeline::{ArticlePipeline, ArticleRequest, PipelineEvent};
use research_article::present::{exit_code, render, PipelineResult};
use research_article::ArticleError;

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(
    name = "research-article",
    version,
    about = "Generate a research article from one or more transcript files"
)]
struct Cli {
    /// Transcript files (.txt), merged in the order given
    #[arg(value_parser = parse_transcript_path)]
    transcripts: Vec<PathBuf>,

    /// API key for the model provider
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model identifier (overrides settings.toml)
    #[arg(long)]
    model: Option<String>,

    /// Base URL of the provider API (overrides settings.toml)
    #[arg(long)]
    base_url: Option<String>,

    /// Talk to a local Ollama server instead of an authenticated API
    #[arg(long)]
    ollama: bool,

    /// Path to settings.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only check the API connection, do not generate
    #[arg(long)]
    validate_only: bool,

    /// Save the effective configuration to settings.toml and exit
    #[arg(long)]
    write_config: bool,

    /// Log every stage's prompt and output
    #[arg(long, short)]
    verbose: bool,
}

/// Accept only `.txt` transcripts, as the upload form does.
fn parse_transcript_path(raw: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw);
    let is_txt = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
    if is_txt {
        Ok(path)
    } else {
        Err(format!("`{raw}` is not a .txt transcript"))
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

fn load_config(cli: &Cli) -> AppConfig {
    let loaded = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => {
            if AppConfig::is_first_run() {
                log::info!("No settings.toml found; using defaults (see --write-config)");
            }
            AppConfig::load()
        }
    };
    let mut config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    if cli.ollama {
        config.llm.provider = LlmProvider::Ollama;
        config.llm.base_url = LlmProvider::Ollama.default_base_url().into();
    }
    if let Some(model) = &cli.model {
        config.llm.model = model.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.llm.base_url = base_url.clone();
    }
    if cli.verbose {
        config.pipeline.verbose = true;
    }
    config
}

fn read_sources(paths: &[PathBuf]) -> Result<Vec<TranscriptSource>, ArticleError> {
    paths
        .iter()
        .map(|p| TranscriptSource::from_path(p).map_err(ArticleError::from))
        .collect()
}

/// Build the run request, keeping the pipeline's order of checks: a missing
/// key is reported before any transcript file is opened.
fn prepare_request(
    paths: &[PathBuf],
    credential: Option<Credential>,
) -> Result<ArticleRequest, ArticleError> {
    if paths.is_empty() {
        return Ok(ArticleRequest::new(Vec::new(), credential));
    }
    if credential.is_none() {
        return Err(ArticleError::MissingCredential);
    }
    Ok(ArticleRequest::new(read_sources(paths)?, credential))
}

fn finish(result: &PipelineResult) -> ExitCode {
    match result {
        PipelineResult::Success { .. } => println!("{}", render(result)),
        PipelineResult::Failure(_) => eprintln!("{}", render(result)),
    }
    ExitCode::from(exit_code(result) as u8)
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Research Article Generator starting up");

    // 2. Configuration
    let config = load_config(&cli);

    if cli.write_config {
        let (saved, path) = match &cli.config {
            Some(path) => (config.save_to(path), path.clone()),
            None => (config.save(), AppPaths::new().settings_file),
        };
        return match saved {
            Ok(()) => {
                eprintln!("Saved settings to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => finish(&PipelineResult::from(ArticleError::from(e))),
        };
    }

    // 3. Provider
    let provider = match build_provider(&config.llm) {
        Ok(provider) => provider,
        Err(e) => {
            return finish(&PipelineResult::from(ArticleError::from(anyhow::Error::new(e))));
        }
    };
    log::info!(
        "Using model `{}` at {} ({:?})",
        config.llm.model,
        config.llm.base_url,
        config.llm.provider
    );

    // Ollama needs no key; any placeholder satisfies the presence check.
    let credential = cli.api_key.clone().and_then(|key| Credential::new(key)).or_else(|| {
        (config.llm.provider == LlmProvider::Ollama)
            .then(|| Credential::new("ollama"))
            .flatten()
    });

    // 4. Progress printer
    let (event_tx, mut event_rx) = mpsc::channel::<PipelineEvent>(32);
    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            eprintln!("{}", event.label());
            if event.is_terminal() {
                break;
            }
        }
    });

    let pipeline = ArticlePipeline::new(provider.as_ref(), &config).with_events(event_tx);

    // 5. Run
    let result = if cli.validate_only {
        match pipeline.check_credential(credential.as_ref()).await {
            Ok(()) => PipelineResult::Success {
                final_text: "API connection successful!".into(),
            },
            Err(e) => PipelineResult::from(e),
        }
    } else {
        match prepare_request(&cli.transcripts, credential) {
            Ok(request) => {
                eprintln!("Generating research article... This may take a few minutes.");
                pipeline.generate(request).await
            }
            Err(e) => PipelineResult::from(e),
        }
    };

    drop(pipeline);
    let _ = printer.await;

    finish(&result)
}
