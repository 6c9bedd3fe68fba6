//! Merge uploaded transcripts into a single ordered text.

use std::path::Path;

use anyhow::Context;

use crate::error::ArticleError;

/// Inserted between consecutive transcripts.
pub const SEGMENT_BOUNDARY: &str = "\n";

// ---------------------------------------------------------------------------
// TranscriptSource
// ---------------------------------------------------------------------------

/// One uploaded transcript, not yet decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptSource {
    pub filename: String,
    pub content: Vec<u8>,
}

impl TranscriptSource {
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Read a transcript from disk.  Decoding is deferred to [`aggregate`].
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read(path)
            .with_context(|| format!("failed to read transcript {}", path.display()))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { filename, content })
    }
}

// ---------------------------------------------------------------------------
// AggregatedTranscript
// ---------------------------------------------------------------------------

/// All transcripts decoded and joined in upload order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedTranscript {
    text: String,
    segments: usize,
}

impl AggregatedTranscript {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn segment_count(&self) -> usize {
        self.segments
    }

    /// `true` when there is nothing but whitespace and boundaries, which
    /// would only waste a paid model call.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// aggregate
// ---------------------------------------------------------------------------

/// Decode and join `sources` in order, separated by [`SEGMENT_BOUNDARY`].
///
/// Fails with [`ArticleError::MissingInput`] for an empty slice and with
/// [`ArticleError::Decoding`] naming the first file that is not UTF-8.
///
/// ```
/// use research_article::input::{aggregate, TranscriptSource};
///
/// let merged = aggregate(&[
///     TranscriptSource::new("a.txt", "Speaker A said X."),
///     TranscriptSource::new("b.txt", "Speaker B said Y."),
/// ])
/// .unwrap();
/// assert_eq!(merged.as_str(), "Speaker A said X.\nSpeaker B said Y.");
/// ```
pub fn aggregate(sources: &[TranscriptSource]) -> Result<AggregatedTranscript, ArticleError> {
    if sources.is_empty() {
        return Err(ArticleError::MissingInput);
    }

    let mut segments = Vec::with_capacity(sources.len());
    for source in sources {
        let text = std::str::from_utf8(&source.content).map_err(|e| ArticleError::Decoding {
            filename: source.filename.clone(),
            source: e,
        })?;
        segments.push(text);
    }

    let text = segments.join(SEGMENT_BOUNDARY);
    log::debug!(
        "input: aggregated {} transcript(s), {} bytes",
        segments.len(),
        text.len()
    );

    Ok(AggregatedTranscript {
        text,
        segments: segments.len(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
