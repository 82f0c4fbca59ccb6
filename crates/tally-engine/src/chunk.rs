//! Chunk planning over the input address space.
//!
//! The planner divides the total byte length into near-equal nominal spans,
//! one per worker. Boundaries are nominal, not exact: each worker realigns
//! its span to record boundaries at runtime (see `worker`), so no record is
//! ever split between, or duplicated across, workers.

/// A nominal byte span assigned to one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    /// Nominal start offset, inclusive.
    pub start: u64,
    /// Nominal end offset, exclusive.
    pub nominal_end: u64,
}

/// Plans up to `workers` near-equal chunks covering `[0, len)`.
///
/// The worker count degrades when `len / min_chunk_size` is smaller, so tiny
/// inputs do not over-fragment; an input below `min_chunk_size` runs with a
/// single worker. An empty input yields no chunks.
pub fn plan_chunks(len: u64, workers: usize, min_chunk_size: u64) -> Vec<Chunk> {
    if len == 0 {
        return Vec::new();
    }
    let max_by_size = if min_chunk_size == 0 {
        workers as u64
    } else {
        (len / min_chunk_size).max(1)
    };
    let count = (workers as u64).clamp(1, max_by_size.max(1));

    (0..count)
        .map(|i| Chunk {
            start: len * i / count,
            nominal_end: len * (i + 1) / count,
        })
        .collect()
}
