//! Stage runner: executes stage tasks strictly one after another.
//!
//! # Flow
//!
//! ```text
//! stage[0].generate(context = None)
//!   └─▶ Ok(out0) ─▶ stage[1].generate(context = out0)
//!                     └─▶ Ok(out1) ─▶ stage[2].generate(context = out1)
//!                                       └─▶ Ok(out2) ─▶ return out2
//! any Err / timeout ─▶ abort, return StageExecution { stage, cause }
//! ```
//!
//! A stage only ever sees the output of the stage immediately before it.

use std::time::Duration;

use anyhow::anyhow;

use crate::config::PipelineConfig;
use crate::credential::Credential;
use crate::error::ArticleError;
use crate::llm::{GenerateRequest, ModelProvider, ProviderError};

use super::stage::StageTask;
use super::state::{emit, EventSender, PipelineEvent};

// ---------------------------------------------------------------------------
// PipelineRunner
// ---------------------------------------------------------------------------

/// Drives an ordered list of [`StageTask`]s against one provider.
///
/// The runner holds no state between calls to [`run`](Self::run); each run
/// owns its stages and its running context.
pub struct PipelineRunner<'p> {
    provider: &'p dyn ModelProvider,
    stage_timeout: Duration,
    force_verbose: bool,
    events: Option<EventSender>,
}

impl<'p> PipelineRunner<'p> {
    pub fn new(provider: &'p dyn ModelProvider, config: &PipelineConfig) -> Self {
        Self {
            provider,
            stage_timeout: Duration::from_secs(config.stage_timeout_secs),
            force_verbose: config.verbose,
            events: None,
        }
    }

    /// Report progress over `tx`.
    pub fn with_events(mut self, tx: EventSender) -> Self {
        self.events = Some(tx);
        self
    }

    /// Override the per-stage bound.
    pub fn with_stage_timeout(mut self, timeout: Duration) -> Self {
        self.stage_timeout = timeout;
        self
    }

    /// Run every stage in order and return the last stage's output.
    ///
    /// The first failing stage aborts the run; nothing produced before it is
    /// returned.
    pub async fn run(
        &self,
        credential: &Credential,
        stages: Vec<StageTask<'_>>,
    ) -> Result<String, ArticleError> {
        if stages.is_empty() {
            return Err(anyhow!("pipeline was started with no stages").into());
        }

        let total = stages.len();
        let mut previous: Option<String> = None;

        for (index, stage) in stages.iter().enumerate() {
            log::info!(
                "pipeline: stage {}/{} `{}` ({})",
                index + 1,
                total,
                stage.name,
                stage.role.name
            );
            emit(
                self.events.as_ref(),
                PipelineEvent::StageStarted {
                    index,
                    total,
                    stage: stage.name.clone(),
                    role: stage.role.name.clone(),
                },
            );

            let body_level = self.body_log_level(stage);
            if let Some(level) = body_level {
                log::log!(
                    level,
                    "pipeline: `{}` instruction:\n{}\ncontext: {} chars",
                    stage.name,
                    stage.instruction,
                    previous.as_deref().map_or(0, str::len)
                );
            }

            let request = GenerateRequest {
                credential,
                role: stage.role,
                instruction: &stage.instruction,
                expected_output: &stage.expected_output,
                context: previous.as_deref(),
            };

            let output =
                match tokio::time::timeout(self.stage_timeout, self.provider.generate(&request))
                    .await
                {
                    Ok(Ok(text)) => text,
                    Ok(Err(e)) => return Err(self.abort(stage, e)),
                    Err(_elapsed) => return Err(self.abort(stage, ProviderError::Timeout)),
                };

            if let Some(level) = body_level {
                log::log!(level, "pipeline: `{}` output:\n{}", stage.name, output);
            }
            emit(
                self.events.as_ref(),
                PipelineEvent::StageCompleted {
                    index,
                    total,
                    stage: stage.name.clone(),
                    output_chars: output.chars().count(),
                },
            );

            previous = Some(output);
        }

        previous.ok_or_else(|| anyhow!("pipeline finished without output").into())
    }

    /// Level at which a stage's instruction and output are logged.
    ///
    /// A forced verbose run logs them at `info`, so they show under the
    /// default filter; a verbose role alone logs them at `debug`.
    fn body_log_level(&self, stage: &StageTask<'_>) -> Option<log::Level> {
        if self.force_verbose {
            Some(log::Level::Info)
        } else if stage.role.verbose {
            Some(log::Level::Debug)
        } else {
            None
        }
    }

    fn abort(&self, stage: &StageTask<'_>, cause: ProviderError) -> ArticleError {
        log::error!("pipeline: stage `{}` failed: {cause}", stage.name);
        ArticleError::StageExecution {
            stage: stage.name.clone(),
            source: cause,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
