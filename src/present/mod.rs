//! Result presentation: the single place failures reach the user.
//!
//! * [`PipelineResult`] / [`Failure`]: structured outcome of a run.
//! * [`render`]: user-facing text for either outcome.
//! * [`exit_code`]: process status for the CLI.

pub mod render;
pub mod result;

pub use render::{exit_code, render};
pub use result::{Failure, PipelineResult};
