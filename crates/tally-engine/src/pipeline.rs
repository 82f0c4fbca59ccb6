//! Pipeline orchestration: plan, scan in parallel, merge, render.

use crate::chunk::plan_chunks;
use crate::config::SummaryConfig;
use crate::error::Result;
use crate::merge::MergeCoordinator;
use crate::source::ByteSource;
use crate::worker::scan_chunk;
use rayon::prelude::*;
use std::io::Write;
use tally_core::{write_summary, KeyTrie};
use tracing::debug;

/// Aggregates `source` and writes the sorted summary to `out`.
///
/// The input is read exactly once: workers scan disjoint record-aligned
/// ranges into private tries and fold them into the shared result under one
/// coarse lock. Output is byte-identical for any worker count. On failure no
/// output is written.
pub fn summarize<S, W>(source: &S, out: &mut W, config: &SummaryConfig) -> Result<()>
where
    S: ByteSource,
    W: Write,
{
    let trie = aggregate(source, config)?;
    write_summary(&trie, out)?;
    Ok(())
}

/// Runs the scan-and-merge phase, returning the merged trie.
pub fn aggregate<S: ByteSource>(source: &S, config: &SummaryConfig) -> Result<KeyTrie> {
    config.validate()?;

    let len = source.len();
    let chunks = plan_chunks(len, config.effective_workers(), config.min_chunk_size);
    debug!(len, workers = chunks.len(), "planned chunks");

    let coordinator = MergeCoordinator::new();
    chunks.par_iter().for_each(|&chunk| {
        // Running workers are never canceled, but once a failure is recorded
        // there is no point starting new chunks: the run cannot produce
        // output anymore.
        if coordinator.has_failed() {
            return;
        }
        match scan_chunk(source, chunk, config.read_buffer_size) {
            Ok(trie) => coordinator.merge(&trie),
            Err(err) => coordinator.fail(err),
        }
    });

    let trie = coordinator.finish()?;
    debug!(nodes = trie.node_count(), "workers merged");
    Ok(trie)
}
