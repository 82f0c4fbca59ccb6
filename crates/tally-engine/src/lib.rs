//! Tally Engine - Parallel scan-and-aggregate pipeline
//!
//! This crate turns a byte-addressable measurement file into one sorted
//! summary in a single pass:
//! - `source`: read-only byte-range sources (file-backed and in-memory)
//! - `chunk`: planning of near-equal nominal byte spans, one per worker
//! - `worker`: record-boundary alignment and the buffered scan loop
//! - `merge`: the shared result trie behind a single coarse lock
//! - `pipeline`: orchestration of plan, parallel scan, merge, and render
//! - `config`: worker count, chunk and buffer sizing

pub mod chunk;
pub mod config;
pub mod error;
pub mod merge;
pub mod pipeline;
pub mod source;
pub mod worker;

pub use chunk::{plan_chunks, Chunk};
pub use config::SummaryConfig;
pub use error::{EngineError, Result};
pub use merge::MergeCoordinator;
pub use pipeline::{aggregate, summarize};
pub use source::{ByteSource, FileSource, MemorySource};
