//! Byte-keyed ordered trie with per-node aggregates.
//!
//! Keys are raw byte sequences; each byte descends one level. Children are
//! addressed through lazily-allocated 256-slot tables indexed by byte value,
//! so iterating a table in slot order visits children in ascending byte
//! order and the trie's depth-first traversal order is the final sort order
//! at no extra cost.
//!
//! Nodes live in a flat arena (`Vec`) and reference each other by index.
//! The parent index is a non-owning back-reference used only to reconstruct
//! the full key during output.

use crate::aggregate::Aggregate;
use crate::fixed::Fixed;

/// Index of a node within the trie arena.
pub type NodeId = u32;

/// Parent sentinel for the root node.
const NO_PARENT: NodeId = NodeId::MAX;

/// Sentinel for an unoccupied child-table slot.
const NO_CHILD: NodeId = NodeId::MAX;

#[derive(Debug)]
struct Node {
    byte: u8,
    parent: NodeId,
    children: Option<Box<[NodeId; 256]>>,
    agg: Aggregate,
}

impl Node {
    fn new(byte: u8, parent: NodeId) -> Self {
        Self {
            byte,
            parent,
            children: None,
            agg: Aggregate::default(),
        }
    }
}

/// Ordered multi-way trie mapping key byte-sequences to [`Aggregate`]s.
///
/// A node carries a non-empty aggregate exactly when some key terminates
/// there; a node may simultaneously carry an aggregate and have children
/// (one key may be a strict prefix of another).
#[derive(Debug)]
pub struct KeyTrie {
    nodes: Vec<Node>,
}

impl KeyTrie {
    /// Arena index of the root sentinel node.
    pub const ROOT: NodeId = 0;

    /// Creates a trie containing only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(0, NO_PARENT)],
        }
    }

    /// Number of nodes in the arena, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the child of `node` for `byte`, creating it on first use.
    pub fn child(&mut self, node: NodeId, byte: u8) -> NodeId {
        let next = self.nodes.len() as NodeId;
        let table = self.nodes[node as usize]
            .children
            .get_or_insert_with(|| Box::new([NO_CHILD; 256]));
        let existing = table[byte as usize];
        if existing != NO_CHILD {
            return existing;
        }
        table[byte as usize] = next;
        self.nodes.push(Node::new(byte, node));
        next
    }

    /// Descends the whole key from the root, creating nodes as needed.
    pub fn key_node(&mut self, key: &[u8]) -> NodeId {
        key.iter().fold(Self::ROOT, |node, &b| self.child(node, b))
    }

    /// Records one value at the key terminating at `node`.
    pub fn record(&mut self, node: NodeId, value: Fixed) {
        self.nodes[node as usize].agg.update(value);
    }

    /// Looks up the aggregate for an exact key, if one was recorded.
    pub fn get(&self, key: &[u8]) -> Option<&Aggregate> {
        let mut node = Self::ROOT;
        for &b in key {
            let table = self.nodes[node as usize].children.as_ref()?;
            let child = table[b as usize];
            if child == NO_CHILD {
                return None;
            }
            node = child;
        }
        let agg = &self.nodes[node as usize].agg;
        (!agg.is_empty()).then_some(agg)
    }

    /// Reconstructs the full key of `node` by walking parent links.
    pub fn key_of(&self, node: NodeId) -> Vec<u8> {
        let mut bytes = Vec::new();
        let mut current = node;
        while current != Self::ROOT {
            let n = &self.nodes[current as usize];
            bytes.push(n.byte);
            current = n.parent;
        }
        bytes.reverse();
        bytes
    }

    /// Folds every aggregate of `other` into this trie.
    ///
    /// Pure structural merge: merging tries in any order, or pairwise in any
    /// tree shape, yields an identical result. Cost is proportional to the
    /// distinct-key structure of `other`, not its record count.
    pub fn merge(&mut self, other: &KeyTrie) {
        self.merge_node(Self::ROOT, other, Self::ROOT);
    }

    fn merge_node(&mut self, dst: NodeId, other: &KeyTrie, src: NodeId) {
        let src_node = &other.nodes[src as usize];
        if !src_node.agg.is_empty() {
            self.nodes[dst as usize].agg.merge(&src_node.agg);
        }
        if let Some(table) = &src_node.children {
            for (byte, &child) in table.iter().enumerate() {
                if child != NO_CHILD {
                    let dst_child = self.child(dst, byte as u8);
                    self.merge_node(dst_child, other, child);
                }
            }
        }
    }

    /// Visits every aggregate-bearing node in ascending key byte order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(NodeId, &Aggregate),
    {
        let _ = self.try_for_each::<(), _>(|node, agg| {
            f(node, agg);
            Ok(())
        });
    }

    /// Fallible ordered visit; stops at the first error.
    pub fn try_for_each<E, F>(&self, mut f: F) -> Result<(), E>
    where
        F: FnMut(NodeId, &Aggregate) -> Result<(), E>,
    {
        self.try_visit(Self::ROOT, &mut f)
    }

    fn try_visit<E, F>(&self, node: NodeId, f: &mut F) -> Result<(), E>
    where
        F: FnMut(NodeId, &Aggregate) -> Result<(), E>,
    {
        let n = &self.nodes[node as usize];
        if !n.agg.is_empty() {
            f(node, &n.agg)?;
        }
        if let Some(table) = &n.children {
            for &child in table.iter() {
                if child != NO_CHILD {
                    self.try_visit(child, f)?;
                }
            }
        }
        Ok(())
    }
}

impl Default for KeyTrie {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_key(trie: &mut KeyTrie, key: &[u8], tenths: i32) {
        let node = trie.key_node(key);
        trie.record(node, Fixed::from_tenths(tenths));
    }

    fn keys_in_order(trie: &KeyTrie) -> Vec<Vec<u8>> {
        let mut keys = Vec::new();
        trie.for_each(|node, _| keys.push(trie.key_of(node)));
        keys
    }

    #[test]
    fn test_child_is_created_once() {
        let mut trie = KeyTrie::new();
        let a = trie.child(KeyTrie::ROOT, b'A');
        let a_again = trie.child(KeyTrie::ROOT, b'A');
        assert_eq!(a, a_again);
        assert_eq!(trie.node_count(), 2);
    }

    #[test]
    fn test_record_and_get() {
        let mut trie = KeyTrie::new();
        record_key(&mut trie, b"Oslo", 12);
        record_key(&mut trie, b"Oslo", -34);

        let agg = trie.get(b"Oslo").unwrap();
        assert_eq!(agg.count(), 2);
        assert_eq!(agg.min(), Fixed::from_tenths(-34));

        assert!(trie.get(b"Osl").is_none());
        assert!(trie.get(b"Paris").is_none());
    }

    #[test]
    fn test_visit_order_is_ascending_byte_order() {
        let mut trie = KeyTrie::new();
        for key in [&b"beta"[..], b"alpha", b"Zurich", b"Aarhus", b"alp"] {
            record_key(&mut trie, key, 10);
        }

        let keys = keys_in_order(&trie);
        let expected: Vec<Vec<u8>> = vec![
            b"Aarhus".to_vec(),
            b"Zurich".to_vec(),
            b"alp".to_vec(),
            b"alpha".to_vec(),
            b"beta".to_vec(),
        ];
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_key_as_prefix_of_another() {
        let mut trie = KeyTrie::new();
        record_key(&mut trie, b"AB", 20);
        record_key(&mut trie, b"A", 10);

        assert_eq!(trie.get(b"A").unwrap().sum(), 10);
        assert_eq!(trie.get(b"AB").unwrap().sum(), 20);

        // Prefix emits before its extension.
        assert_eq!(keys_in_order(&trie), vec![b"A".to_vec(), b"AB".to_vec()]);
    }

    #[test]
    fn test_key_of_walks_parents() {
        let mut trie = KeyTrie::new();
        let node = trie.key_node(b"abc");
        assert_eq!(trie.key_of(node), b"abc".to_vec());
        assert_eq!(trie.key_of(KeyTrie::ROOT), Vec::<u8>::new());
    }

    #[test]
    fn test_merge_combines_structure_and_aggregates() {
        let mut left = KeyTrie::new();
        record_key(&mut left, b"A", 10);
        record_key(&mut left, b"B", 20);

        let mut right = KeyTrie::new();
        record_key(&mut right, b"B", 40);
        record_key(&mut right, b"C", 30);

        left.merge(&right);

        assert_eq!(left.get(b"A").unwrap().count(), 1);
        let b = left.get(b"B").unwrap();
        assert_eq!(b.count(), 2);
        assert_eq!(b.min(), Fixed::from_tenths(20));
        assert_eq!(b.max(), Fixed::from_tenths(40));
        assert_eq!(left.get(b"C").unwrap().count(), 1);
    }

    #[test]
    fn test_merge_order_does_not_matter() {
        let keys: [(&[u8], i32); 4] = [(b"x", 1), (b"xy", 2), (b"y", 3), (b"x", 4)];

        let mut one = KeyTrie::new();
        let mut two = KeyTrie::new();
        for (i, (key, v)) in keys.iter().enumerate() {
            let target = if i % 2 == 0 { &mut one } else { &mut two };
            record_key(target, key, *v);
        }

        let mut ab = KeyTrie::new();
        ab.merge(&one);
        ab.merge(&two);
        let mut ba = KeyTrie::new();
        ba.merge(&two);
        ba.merge(&one);

        assert_eq!(keys_in_order(&ab), keys_in_order(&ba));
        for (key, _) in keys {
            assert_eq!(ab.get(key), ba.get(key));
        }
    }

    #[test]
    fn test_merge_empty_is_identity() {
        let mut trie = KeyTrie::new();
        record_key(&mut trie, b"K", 5);
        trie.merge(&KeyTrie::new());
        assert_eq!(trie.get(b"K").unwrap().count(), 1);
    }
}
