//! Pipeline orchestration
//!
//! Wires the feed aggregator and the AI model into one run: collect
//! articles, summarize (mandatory), generate the column (best-effort),
//! assemble the immutable snapshot. Clients are injected — there is no
//! process-wide state, and every run is independent.

pub mod pipeline;

pub use pipeline::{NewsPipeline, PipelineError};
