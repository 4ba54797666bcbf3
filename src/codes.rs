use std::collections::{BTreeMap, HashMap};

use crate::tree::{MergeNode, MergeTree};

/// Forward and reverse views of a prefix-free code.
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    forward: BTreeMap<char, Vec<bool>>,
    reverse: HashMap<Vec<bool>, char>,
    max_len: usize,
}

impl CodeTable {
    /// Left edges are `0`, right edges `1`. A tree that is a single leaf
    /// still gets the one-bit code `0`, since an empty code could never be
    /// matched while decoding.
    pub fn from_tree(tree: &MergeTree) -> Self {
        let mut table = CodeTable::default();
        match tree.root() {
            MergeNode::Leaf { symbol, .. } => table.insert(*symbol, vec![false]),
            root => table.walk(root, &mut Vec::new()),
        }
        table
    }

    fn walk(&mut self, node: &MergeNode, prefix: &mut Vec<bool>) {
        match node {
            MergeNode::Leaf { symbol, .. } => self.insert(*symbol, prefix.clone()),
            MergeNode::Internal { left, right, .. } => {
                prefix.push(false);
                self.walk(left, prefix);
                prefix.pop();

                prefix.push(true);
                self.walk(right, prefix);
                prefix.pop();
            }
        }
    }

    fn insert(&mut self, symbol: char, code: Vec<bool>) {
        self.max_len = self.max_len.max(code.len());
        self.reverse.insert(code.clone(), symbol);
        self.forward.insert(symbol, code);
    }

    pub fn code(&self, symbol: char) -> Option<&[bool]> {
        self.forward.get(&symbol).map(Vec::as_slice)
    }

    pub fn symbol(&self, bits: &[bool]) -> Option<char> {
        self.reverse.get(bits).copied()
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn max_code_len(&self) -> usize {
        self.max_len
    }

    /// Entries in ascending symbol order.
    pub fn entries(&self) -> impl Iterator<Item = (char, &[bool])> {
        self.forward.iter().map(|(&symbol, code)| (symbol, code.as_slice()))
    }
}

/// Renders bits as a string of `0` and `1`.
pub fn render(bits: &[bool]) -> String {
    bits.iter().map(|&bit| if bit { '1' } else { '0' }).collect()
}
