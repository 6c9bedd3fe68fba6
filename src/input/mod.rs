//! Transcript input: loading sources and merging them into one text.
//!
//! * [`TranscriptSource`]: one uploaded file: its name and raw bytes.
//! * [`aggregate`]: decodes every source as UTF-8 and joins them, in
//!   order, into an [`AggregatedTranscript`].

pub mod aggregator;

pub use aggregator::{aggregate, AggregatedTranscript, TranscriptSource, SEGMENT_BOUNDARY};
