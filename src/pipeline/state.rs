//! Progress events emitted while a run executes.
//!
//! [`PipelineEvent`]s are purely informational: they are sent with
//! `try_send` over an optional `tokio::sync::mpsc` channel and a full or
//! closed channel never slows down or changes the run.
//!
//! ```text
//! ValidatingCredential ──▶ CredentialAccepted
//!   ──▶ StageStarted(plan)  ──▶ StageCompleted(plan)
//!   ──▶ StageStarted(write) ──▶ StageCompleted(write)
//!   ──▶ StageStarted(edit)  ──▶ StageCompleted(edit)
//!   ──▶ Finished
//! any point ──error──▶ Failed
//! ```

use tokio::sync::mpsc;

/// One step of a run's progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    ValidatingCredential,
    CredentialAccepted,
    StageStarted {
        index: usize,
        total: usize,
        stage: String,
        role: String,
    },
    StageCompleted {
        index: usize,
        total: usize,
        stage: String,
        output_chars: usize,
    },
    Finished,
    Failed {
        message: String,
    },
}

impl PipelineEvent {
    /// A short human-readable status line.
    pub fn label(&self) -> String {
        match self {
            PipelineEvent::ValidatingCredential => "Checking API connection...".into(),
            PipelineEvent::CredentialAccepted => "API connection successful!".into(),
            PipelineEvent::StageStarted {
                index,
                total,
                stage,
                role,
            } => format!("[{}/{}] {stage}: {role} working...", index + 1, total),
            PipelineEvent::StageCompleted {
                index,
                total,
                stage,
                output_chars,
            } => format!("[{}/{}] {stage}: done ({output_chars} chars)", index + 1, total),
            PipelineEvent::Finished => "Research article generated successfully!".into(),
            PipelineEvent::Failed { message } => format!("Failed: {message}"),
        }
    }

    /// `true` for the last event a run can emit.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineEvent::Finished | PipelineEvent::Failed { .. })
    }
}

/// Sender half for progress events.
pub type EventSender = mpsc::Sender<PipelineEvent>;

/// Best-effort send; drops the event if nobody is listening or the channel
/// is full.
pub(crate) fn emit(events: Option<&EventSender>, event: PipelineEvent) {
    if let Some(tx) = events {
        if let Err(e) = tx.try_send(event) {
            log::trace!("pipeline: progress event dropped ({e})");
        }
    }
}
