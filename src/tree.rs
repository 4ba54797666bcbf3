use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::error::{HuffError, Result};
use crate::frequency::FrequencyMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeNode {
    Leaf {
        symbol: char,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: Box<MergeNode>,
        right: Box<MergeNode>,
    },
}

impl MergeNode {
    pub fn freq(&self) -> u64 {
        match self {
            MergeNode::Leaf { freq, .. } | MergeNode::Internal { freq, .. } => *freq,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, MergeNode::Leaf { .. })
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            MergeNode::Leaf { .. } => 1,
            MergeNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

// Heap entry. `seq` is the insertion order and breaks frequency ties so the
// same input always produces the same tree.
#[derive(Debug)]
struct Pending {
    freq: u64,
    seq: u64,
    node: MergeNode,
}

impl Eq for Pending {}
impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.freq == other.freq && self.seq == other.seq
    }
}
impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the lowest first.
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}
impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Binary merge tree built from a frequency table.
#[derive(Debug, Clone)]
pub struct MergeTree {
    root: MergeNode,
    merges: usize,
}

impl MergeTree {
    /// Repeatedly merges the two lowest-frequency nodes until one remains.
    /// The first node popped becomes the left child. Leaves enter the queue
    /// in ascending symbol order.
    pub fn build(freqs: &FrequencyMap) -> Result<Self> {
        let mut heap = BinaryHeap::with_capacity(freqs.len());
        let mut seq = 0;
        for (&symbol, &freq) in freqs {
            heap.push(Pending {
                freq,
                seq,
                node: MergeNode::Leaf { symbol, freq },
            });
            seq += 1;
        }

        let mut merges = 0;
        loop {
            let left = heap.pop().ok_or(HuffError::EmptyInput)?;
            let Some(right) = heap.pop() else {
                debug!(symbols = freqs.len(), merges, "merge tree built");
                return Ok(MergeTree {
                    root: left.node,
                    merges,
                });
            };

            let freq = left.freq + right.freq;
            heap.push(Pending {
                freq,
                seq,
                node: MergeNode::Internal {
                    freq,
                    left: Box::new(left.node),
                    right: Box::new(right.node),
                },
            });
            seq += 1;
            merges += 1;
        }
    }

    pub fn root(&self) -> &MergeNode {
        &self.root
    }

    pub fn merges(&self) -> usize {
        self.merges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::count_symbols;

    fn assert_well_formed(node: &MergeNode) {
        if let MergeNode::Internal { freq, left, right } = node {
            assert_eq!(*freq, left.freq() + right.freq());
            assert_well_formed(left);
            assert_well_formed(right);
        }
    }

    #[test]
    fn n_symbols_take_n_minus_one_merges() {
        let freqs = count_symbols("the quick brown fox jumps over the lazy dog");
        let tree = MergeTree::build(&freqs).unwrap();

        assert_eq!(tree.merges(), freqs.len() - 1);
        assert_eq!(tree.root().leaf_count(), freqs.len());
        assert_eq!(tree.root().freq(), freqs.values().sum::<u64>());
        assert_well_formed(tree.root());
    }

    #[test]
    fn single_symbol_is_a_lone_leaf() {
        let tree = MergeTree::build(&count_symbols("aaaa")).unwrap();
        assert_eq!(tree.merges(), 0);
        assert!(tree.root().is_leaf());
        assert_eq!(
            tree.root(),
            &MergeNode::Leaf {
                symbol: 'a',
                freq: 4
            }
        );
    }

    #[test]
    fn ties_resolve_by_insertion_order() {
        // All equal: 'a' and 'b' merge first, then 'c' and 'd'.
        let tree = MergeTree::build(&count_symbols("abcd")).unwrap();
        let MergeNode::Internal { left, right, .. } = tree.root() else {
            panic!("expected internal root");
        };
        let leaf = |node: &MergeNode, side: bool| match node {
            MergeNode::Internal { left, right, .. } => {
                let child = if side { right } else { left };
                match **child {
                    MergeNode::Leaf { symbol, .. } => symbol,
                    _ => panic!("expected leaf"),
                }
            }
            _ => panic!("expected internal"),
        };
        assert_eq!((leaf(left, false), leaf(left, true)), ('a', 'b'));
        assert_eq!((leaf(right, false), leaf(right, true)), ('c', 'd'));
    }

    #[test]
    fn building_twice_gives_the_same_tree() {
        let freqs = count_symbols("mississippi river banks");
        let first = MergeTree::build(&freqs).unwrap();
        let second = MergeTree::build(&freqs).unwrap();
        assert_eq!(first.root(), second.root());
    }

    #[test]
    fn empty_table_is_rejected() {
        let err = MergeTree::build(&FrequencyMap::new()).unwrap_err();
        assert!(matches!(err, HuffError::EmptyInput));
    }
}
