//! Byte-level record scanner.
//!
//! Input is a sequence of `<key>;<value>` records terminated by line feeds,
//! where the value is a signed decimal with exactly one fractional digit.
//! The scanner is a two-state machine over raw bytes: key bytes descend the
//! trie one level each, the `;` delimiter switches to value parsing, and the
//! record terminator applies the accumulated value at the current trie node.
//!
//! State persists across [`RecordScanner::scan`] calls, so a record may span
//! buffer boundaries; [`RecordScanner::finish`] finalizes a trailing record
//! whose line feed is missing at the end of the assigned range.

use crate::fixed::Fixed;
use crate::trie::{KeyTrie, NodeId};

const FIELD_DELIMITER: u8 = b';';
const RECORD_TERMINATOR: u8 = b'\n';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Key,
    Value,
}

/// Streaming scanner that folds record bytes into a private [`KeyTrie`].
pub struct RecordScanner {
    trie: KeyTrie,
    state: State,
    node: NodeId,
    negative: bool,
    magnitude: i32,
}

impl RecordScanner {
    /// Creates a scanner with a fresh, empty trie.
    pub fn new() -> Self {
        Self {
            trie: KeyTrie::new(),
            state: State::Key,
            node: KeyTrie::ROOT,
            negative: false,
            magnitude: 0,
        }
    }

    /// Feeds one buffer of record bytes.
    pub fn scan(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            match self.state {
                State::Key => {
                    if byte == FIELD_DELIMITER {
                        self.state = State::Value;
                        self.negative = false;
                        self.magnitude = 0;
                    } else {
                        self.node = self.trie.child(self.node, byte);
                    }
                }
                State::Value => {
                    if byte == RECORD_TERMINATOR {
                        self.commit();
                    } else if byte == b'-' {
                        self.negative = true;
                    } else if byte != b'.' {
                        // Bytes outside [0-9] are not validated; a stray byte
                        // corrupts only this record's accumulator.
                        self.magnitude = self
                            .magnitude
                            .wrapping_mul(10)
                            .wrapping_add(i32::from(byte.wrapping_sub(b'0')));
                    }
                }
            }
        }
    }

    /// Finalizes an in-flight record and returns the trie.
    ///
    /// The final record of a range may omit its trailing line feed; it is
    /// committed here rather than discarded.
    pub fn finish(mut self) -> KeyTrie {
        if self.state == State::Value {
            self.commit();
        }
        self.trie
    }

    fn commit(&mut self) {
        let tenths = if self.negative {
            -self.magnitude
        } else {
            self.magnitude
        };
        self.trie.record(self.node, Fixed::from_tenths(tenths));
        self.state = State::Key;
        self.node = KeyTrie::ROOT;
    }
}

impl Default for RecordScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_all(input: &[u8]) -> KeyTrie {
        let mut scanner = RecordScanner::new();
        scanner.scan(input);
        scanner.finish()
    }

    #[test]
    fn test_single_record() {
        let trie = scan_all(b"Oslo;12.3\n");
        let agg = trie.get(b"Oslo").unwrap();
        assert_eq!(agg.count(), 1);
        assert_eq!(agg.min(), Fixed::from_tenths(123));
        assert_eq!(agg.max(), Fixed::from_tenths(123));
    }

    #[test]
    fn test_negative_value() {
        let trie = scan_all(b"Tromso;-5.4\n");
        assert_eq!(trie.get(b"Tromso").unwrap().min(), Fixed::from_tenths(-54));
    }

    #[test]
    fn test_multiple_records_same_key() {
        let trie = scan_all(b"A;1.0\nA;3.0\nA;-2.0\n");
        let agg = trie.get(b"A").unwrap();
        assert_eq!(agg.count(), 3);
        assert_eq!(agg.min(), Fixed::from_tenths(-20));
        assert_eq!(agg.max(), Fixed::from_tenths(30));
        assert_eq!(agg.sum(), 20);
    }

    #[test]
    fn test_missing_trailing_line_feed() {
        let trie = scan_all(b"Y;7.1");
        let agg = trie.get(b"Y").unwrap();
        assert_eq!(agg.count(), 1);
        assert_eq!(agg.max(), Fixed::from_tenths(71));
    }

    #[test]
    fn test_finish_without_pending_record_is_noop() {
        let trie = scan_all(b"X;0.0\n");
        assert_eq!(trie.get(b"X").unwrap().count(), 1);
        // node_count: root + 'X' only; no phantom entry from finish().
        assert_eq!(trie.node_count(), 2);
    }

    #[test]
    fn test_record_split_across_buffers() {
        let input = b"StationA;12.3\nStationB;-5.0\n";
        let whole = scan_all(input);

        // Feeding the same bytes split at every position must not change
        // the result.
        for split in 0..=input.len() {
            let mut scanner = RecordScanner::new();
            scanner.scan(&input[..split]);
            scanner.scan(&input[split..]);
            let trie = scanner.finish();

            assert_eq!(trie.get(b"StationA"), whole.get(b"StationA"));
            assert_eq!(trie.get(b"StationB"), whole.get(b"StationB"));
        }
    }

    #[test]
    fn test_non_ascii_key_bytes() {
        let trie = scan_all("Zürich;8.2\n".as_bytes());
        assert_eq!(
            trie.get("Zürich".as_bytes()).unwrap().max(),
            Fixed::from_tenths(82)
        );
    }
}
