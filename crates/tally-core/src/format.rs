//! Sorted summary rendering.

use crate::trie::KeyTrie;
use std::io::{self, Write};

/// Writes the `{key=min/mean/max, ...}\n` summary for `trie` to `out`.
///
/// Keys appear in ascending byte order, an order the trie traversal already
/// provides without a separate sort pass. Each numeric field is rendered with
/// exactly one fractional digit. Nodes that are pure prefixes of other keys
/// are skipped.
pub fn write_summary<W: Write>(trie: &KeyTrie, out: &mut W) -> io::Result<()> {
    out.write_all(b"{")?;
    let mut first = true;
    trie.try_for_each::<io::Error, _>(|node, agg| {
        if !first {
            out.write_all(b", ")?;
        }
        first = false;
        out.write_all(&trie.key_of(node))?;
        out.write_all(b"=")?;
        agg.min().write_to(out)?;
        out.write_all(b"/")?;
        agg.mean().write_to(out)?;
        out.write_all(b"/")?;
        agg.max().write_to(out)?;
        Ok(())
    })?;
    out.write_all(b"}\n")
}
