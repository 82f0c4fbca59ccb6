//! Tally Core - Aggregation data structures
//!
//! This crate provides the data plane of the Tally summarizer:
//! - `Fixed`: signed decimal values scaled by 10 (one fractional digit)
//! - `Aggregate`: incremental min/max/sum/count with mergeable semantics
//! - `KeyTrie`: byte-keyed ordered trie mapping keys to aggregates
//! - `RecordScanner`: byte-level state machine producing trie updates
//! - `write_summary`: sorted `{key=min/mean/max, ...}` rendering
//!
//! Everything here is pure computation; file access and parallelism live in
//! `tally-engine`.

pub mod aggregate;
pub mod fixed;
pub mod format;
pub mod scanner;
pub mod trie;

pub use aggregate::Aggregate;
pub use fixed::Fixed;
pub use format::write_summary;
pub use scanner::RecordScanner;
pub use trie::{KeyTrie, NodeId};
