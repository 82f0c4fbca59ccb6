//! Per-chunk scanning with record-boundary alignment.
//!
//! A worker owns one nominal chunk. Its effective scan range starts and ends
//! on record boundaries: a record straddling a nominal boundary belongs to
//! the worker that contains its start, and the worker after it skips the
//! tail. Both workers derive the same boundary offset, so the union of all
//! effective ranges covers the file exactly once for any boundary placement.

use crate::chunk::Chunk;
use crate::error::Result;
use crate::source::ByteSource;
use tally_core::{KeyTrie, RecordScanner};
use tracing::trace;

/// Buffer size used while hunting for a record boundary.
const ALIGN_BUFFER_SIZE: usize = 4096;

/// Returns the offset of the first record boundary at or after `offset`.
///
/// A boundary is the byte following a line feed; offset 0 is always a
/// boundary. The search starts at `offset - 1` so a nominal edge that
/// already sits on a boundary is kept as-is and a record starting exactly at
/// the edge stays with the next worker. With no line feed left, the boundary
/// is the end of the source.
pub fn align_to_record<S: ByteSource + ?Sized>(source: &S, offset: u64) -> Result<u64> {
    if offset == 0 {
        return Ok(0);
    }
    let len = source.len();
    let mut pos = offset - 1;
    let mut buf = [0u8; ALIGN_BUFFER_SIZE];
    while pos < len {
        let n = source.read_at(pos, &mut buf)?;
        if n == 0 {
            break;
        }
        if let Some(i) = buf[..n].iter().position(|&b| b == b'\n') {
            return Ok(pos + i as u64 + 1);
        }
        pos += n as u64;
    }
    Ok(len)
}

/// Scans the records of `chunk` into a fresh private trie.
///
/// Reads the effective range through `read_buffer_size`-byte buffers and
/// finalizes an in-flight final record whose line feed is missing.
pub fn scan_chunk<S: ByteSource + ?Sized>(
    source: &S,
    chunk: Chunk,
    read_buffer_size: usize,
) -> Result<KeyTrie> {
    let start = align_to_record(source, chunk.start)?;
    let end = align_to_record(source, chunk.nominal_end)?;
    trace!(
        nominal_start = chunk.start,
        nominal_end = chunk.nominal_end,
        start,
        end,
        "scanning chunk"
    );

    let mut scanner = RecordScanner::new();
    let mut buf = vec![0u8; read_buffer_size];
    let mut pos = start;
    while pos < end {
        let want = (end - pos).min(buf.len() as u64) as usize;
        let n = source.read_at(pos, &mut buf[..want])?;
        if n == 0 {
            break;
        }
        scanner.scan(&buf[..n]);
        pos += n as u64;
    }
    Ok(scanner.finish())
}
