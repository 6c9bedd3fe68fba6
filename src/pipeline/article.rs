//! Entry point: transcripts + credential in, article (or failure) out.
//!
//! # Order of checks
//!
//! ```text
//! no sources?          ─▶ MissingInput        (no network)
//! no credential?       ─▶ MissingCredential   (no network)
//! non-UTF-8 source?    ─▶ Decoding            (no network)
//! blank transcript?    ─▶ EmptyInput          (no network)
//! list_models not 2xx? ─▶ CredentialInvalid   (one cheap call, no generation)
//! plan → write → edit  ─▶ Success | StageExecution
//! ```

use std::time::Duration;

use crate::config::AppConfig;
use crate::credential::{Credential, CredentialValidator};
use crate::error::ArticleError;
use crate::input::{aggregate, TranscriptSource};
use crate::llm::ModelProvider;
use crate::present::PipelineResult;

use super::role::article_roles;
use super::runner::PipelineRunner;
use super::stage::article_stages;
use super::state::{emit, EventSender, PipelineEvent};

/// Everything the caller supplies for one run.
#[derive(Debug, Clone, Default)]
pub struct ArticleRequest {
    pub sources: Vec<TranscriptSource>,
    pub credential: Option<Credential>,
}

impl ArticleRequest {
    pub fn new(sources: Vec<TranscriptSource>, credential: Option<Credential>) -> Self {
        Self {
            sources,
            credential,
        }
    }
}

/// The article pipeline bound to a provider and a configuration.
///
/// Holds no per-run state; calling [`generate`](Self::generate) twice runs
/// two fully independent pipelines.
pub struct ArticlePipeline<'p> {
    provider: &'p dyn ModelProvider,
    config: &'p AppConfig,
    events: Option<EventSender>,
}

impl<'p> ArticlePipeline<'p> {
    pub fn new(provider: &'p dyn ModelProvider, config: &'p AppConfig) -> Self {
        Self {
            provider,
            config,
            events: None,
        }
    }

    pub fn with_events(mut self, tx: EventSender) -> Self {
        self.events = Some(tx);
        self
    }

    /// Run the whole pipeline and fold the outcome into a [`PipelineResult`].
    pub async fn generate(&self, request: ArticleRequest) -> PipelineResult {
        let result = match self.try_generate(request).await {
            Ok(final_text) => {
                emit(self.events.as_ref(), PipelineEvent::Finished);
                PipelineResult::Success { final_text }
            }
            Err(err) => {
                emit(
                    self.events.as_ref(),
                    PipelineEvent::Failed {
                        message: err.to_string(),
                    },
                );
                PipelineResult::from(err)
            }
        };
        log::info!("article: run finished ({})", result.outcome_label());
        result
    }

    /// Only check the credential, as the first half of a run would.
    pub async fn check_credential(&self, credential: Option<&Credential>) -> Result<(), ArticleError> {
        let credential = credential.ok_or(ArticleError::MissingCredential)?;
        self.validate(credential).await
    }

    async fn try_generate(&self, request: ArticleRequest) -> Result<String, ArticleError> {
        if request.sources.is_empty() {
            return Err(ArticleError::MissingInput);
        }
        let credential = request
            .credential
            .as_ref()
            .ok_or(ArticleError::MissingCredential)?;

        let transcript = aggregate(&request.sources)?;
        if transcript.is_blank() {
            return Err(ArticleError::EmptyInput);
        }
        log::info!(
            "article: {} transcript(s), {} chars",
            transcript.segment_count(),
            transcript.as_str().chars().count()
        );

        self.validate(credential).await?;

        let stages = article_stages(article_roles(), &transcript);
        let mut runner = PipelineRunner::new(self.provider, &self.config.pipeline);
        if let Some(tx) = &self.events {
            runner = runner.with_events(tx.clone());
        }
        runner.run(credential, stages).await
    }

    async fn validate(&self, credential: &Credential) -> Result<(), ArticleError> {
        emit(self.events.as_ref(), PipelineEvent::ValidatingCredential);
        let timeout = Duration::from_secs(self.config.llm.validation_timeout_secs);
        CredentialValidator::new(self.provider, timeout)
            .validate(credential)
            .await
            .into_result()?;
        emit(self.events.as_ref(), PipelineEvent::CredentialAccepted);
        Ok(())
    }
}

/// One-shot convenience wrapper around [`ArticlePipeline::generate`].
pub async fn generate_article(
    request: ArticleRequest,
    provider: &dyn ModelProvider,
    config: &AppConfig,
) -> PipelineResult {
    ArticlePipeline::new(provider, config).generate(request).await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::llm::{GenerateRequest, ProviderError, ProviderReply};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Deterministic provider: answers `"<role>: <instruction>"`, followed
    /// by the context on a new line when there is one.
    struct Echo {
        list_status: u16,
        list_fault: Option<ListFault>,
        fail_stage_role: Option<&'static str>,
        list_calls: AtomicUsize,
        generated: Mutex<Vec<String>>,
    }

    /// How the model-listing call fails before any status arrives.
    #[derive(Clone, Copy)]
    enum ListFault {
        Hang,
        Refused,
    }

    impl Echo {
        fn new() -> Self {
            Self {
                list_status: 200,
                list_fault: None,
                fail_stage_role: None,
                list_calls: AtomicUsize::new(0),
                generated: Mutex::new(Vec::new()),
            }
        }

        fn network_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst) + self.generated.lock().unwrap().len()
        }

        fn roles_called(&self) -> Vec<String> {
            self.generated.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ModelProvider for Echo {
        async fn list_models(&self, _c: &Credential) -> Result<ProviderReply, ProviderError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            match self.list_fault {
                Some(ListFault::Hang) => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                }
                Some(ListFault::Refused) => {
                    return Err(ProviderError::Request("connection refused".into()));
                }
                None => {}
            }
            Ok(ProviderReply {
                status: self.list_status,
                body: if self.list_status == 200 {
                    r#"{"data":[]}"#.into()
                } else {
                    r#"{"error":"invalid_api_key"}"#.into()
                },
            })
        }

        async fn generate(&self, request: &GenerateRequest<'_>) -> Result<String, ProviderError> {
            self.generated
                .lock()
                .unwrap()
                .push(request.role.name.clone());
            if self.fail_stage_role == Some(request.role.name.as_str()) {
                return Err(ProviderError::Request("connection reset".into()));
            }
            let mut out = format!("{}: {}", request.role.name, request.instruction);
            if let Some(ctx) = request.context {
                out.push('\n');
                out.push_str(ctx);
            }
            Ok(out)
        }
    }

    fn two_speakers() -> Vec<TranscriptSource> {
        vec![
            TranscriptSource::new("a.txt", "Speaker A said X."),
            TranscriptSource::new("b.txt", "Speaker B said Y."),
        ]
    }

    fn key() -> Option<Credential> {
        Credential::new("sk-test")
    }

    fn failure_kind(result: &PipelineResult) -> FailureKind {
        match result {
            PipelineResult::Failure(f) => f.kind,
            PipelineResult::Success { .. } => panic!("expected failure"),
        }
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn two_speaker_scenario_nests_every_stage() {
        let provider = Echo::new();
        let config = AppConfig::default();

        let result =
            generate_article(ArticleRequest::new(two_speakers(), key()), &provider, &config).await;

        let text = match result {
            PipelineResult::Success { final_text } => final_text,
            other => panic!("expected success, got {other:?}"),
        };

        assert_eq!(
            provider.roles_called(),
            ["Content Planner", "Content Writer", "Editor"]
        );
        assert!(text.starts_with("Editor: Edit and finalize"));

        let write_at = text.find("Content Writer: Write a full research article").unwrap();
        let plan_at = text.find("Content Planner: Produce a structured content plan").unwrap();
        let transcript_at = text.find("Speaker A said X.\nSpeaker B said Y.").unwrap();
        assert!(0 < write_at && write_at < plan_at && plan_at < transcript_at);
    }

    #[tokio::test]
    async fn identical_runs_give_identical_text() {
        let provider = Echo::new();
        let config = AppConfig::default();
        let pipeline = ArticlePipeline::new(&provider, &config);

        let first = pipeline
            .generate(ArticleRequest::new(two_speakers(), key()))
            .await;
        let second = pipeline
            .generate(ArticleRequest::new(two_speakers(), key()))
            .await;

        assert!(first.is_success());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn no_transcripts_makes_no_network_call() {
        let provider = Echo::new();
        let result = generate_article(
            ArticleRequest::new(Vec::new(), key()),
            &provider,
            &AppConfig::default(),
        )
        .await;

        assert_eq!(failure_kind(&result), FailureKind::MissingInput);
        assert_eq!(provider.network_calls(), 0);
    }

    #[tokio::test]
    async fn missing_credential_makes_no_network_call() {
        let provider = Echo::new();
        let result = generate_article(
            ArticleRequest::new(two_speakers(), None),
            &provider,
            &AppConfig::default(),
        )
        .await;

        assert_eq!(failure_kind(&result), FailureKind::MissingCredential);
        assert_eq!(provider.network_calls(), 0);
    }

    #[tokio::test]
    async fn empty_files_are_rejected_before_network() {
        let provider = Echo::new();
        let sources = vec![
            TranscriptSource::new("a.txt", ""),
            TranscriptSource::new("b.txt", ""),
        ];
        let result = generate_article(
            ArticleRequest::new(sources, key()),
            &provider,
            &AppConfig::default(),
        )
        .await;

        assert_eq!(failure_kind(&result), FailureKind::EmptyInput);
        assert_eq!(provider.network_calls(), 0);
    }

    #[tokio::test]
    async fn undecodable_file_is_rejected_before_network() {
        let provider = Echo::new();
        let sources = vec![TranscriptSource::new("bin.txt", vec![0xc3, 0x28])];
        let result = generate_article(
            ArticleRequest::new(sources, key()),
            &provider,
            &AppConfig::default(),
        )
        .await;

        assert_eq!(failure_kind(&result), FailureKind::Decoding);
        assert_eq!(provider.network_calls(), 0);
    }

    #[tokio::test]
    async fn rejected_credential_runs_no_stage() {
        let provider = Echo {
            list_status: 401,
            ..Echo::new()
        };
        let result = generate_article(
            ArticleRequest::new(two_speakers(), key()),
            &provider,
            &AppConfig::default(),
        )
        .await;

        match &result {
            PipelineResult::Failure(f) => {
                assert_eq!(f.kind, FailureKind::CredentialInvalid);
                assert_eq!(f.status_code, Some(401));
                assert!(f.body.as_deref().unwrap().contains("invalid_api_key"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(provider.roles_called().is_empty());
    }

    #[tokio::test]
    async fn hanging_credential_check_runs_no_stage() {
        let provider = Echo {
            list_fault: Some(ListFault::Hang),
            ..Echo::new()
        };
        let mut config = AppConfig::default();
        config.llm.validation_timeout_secs = 1;

        let result = generate_article(
            ArticleRequest::new(two_speakers(), key()),
            &provider,
            &config,
        )
        .await;

        match &result {
            PipelineResult::Failure(f) => {
                assert_eq!(f.kind, FailureKind::CredentialInvalid);
                assert!(f.message.contains("network timeout"));
                assert_eq!(f.status_code, None);
                assert_eq!(f.body, None);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(provider.roles_called().is_empty());
    }

    #[tokio::test]
    async fn unreachable_provider_runs_no_stage() {
        let provider = Echo {
            list_fault: Some(ListFault::Refused),
            ..Echo::new()
        };
        let result = generate_article(
            ArticleRequest::new(two_speakers(), key()),
            &provider,
            &AppConfig::default(),
        )
        .await;

        match &result {
            PipelineResult::Failure(f) => {
                assert_eq!(f.kind, FailureKind::CredentialInvalid);
                assert!(f.message.contains("network error"));
                assert!(f.message.contains("connection refused"));
                assert_eq!(f.body, None);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(provider.list_calls.load(Ordering::SeqCst), 1);
        assert!(provider.roles_called().is_empty());
    }

    #[tokio::test]
    async fn write_failure_skips_edit_and_names_write() {
        let provider = Echo {
            fail_stage_role: Some("Content Writer"),
            ..Echo::new()
        };
        let result = generate_article(
            ArticleRequest::new(two_speakers(), key()),
            &provider,
            &AppConfig::default(),
        )
        .await;

        match &result {
            PipelineResult::Failure(f) => {
                assert_eq!(f.kind, FailureKind::StageExecution);
                assert_eq!(f.stage.as_deref(), Some("write"));
                assert!(f.message.contains("connection reset"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(provider.roles_called(), ["Content Planner", "Content Writer"]);
    }

    #[tokio::test]
    async fn events_bracket_a_successful_run() {
        let provider = Echo::new();
        let config = AppConfig::default();
        let (tx, mut rx) = mpsc::channel(32);

        ArticlePipeline::new(&provider, &config)
            .with_events(tx)
            .generate(ArticleRequest::new(two_speakers(), key()))
            .await;

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert_eq!(events.first(), Some(&PipelineEvent::ValidatingCredential));
        assert_eq!(events.get(1), Some(&PipelineEvent::CredentialAccepted));
        assert_eq!(events.last(), Some(&PipelineEvent::Finished));
        assert_eq!(events.len(), 2 + 3 * 2 + 1);
    }

    #[tokio::test]
    async fn check_credential_alone() {
        let provider = Echo::new();
        let config = AppConfig::default();
        let pipeline = ArticlePipeline::new(&provider, &config);

        assert!(pipeline.check_credential(key().as_ref()).await.is_ok());
        assert!(matches!(
            pipeline.check_credential(None).await,
            Err(ArticleError::MissingCredential)
        ));
        assert!(provider.roles_called().is_empty());
    }
}
