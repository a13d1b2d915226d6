//! Min-heap of tree nodes, ordered by weight, used to build the huffman tree.
//!
//! The heap never grows past MAX_NODES: 256 leaves plus the 255 filler nodes that merging them
//! can create. Ties are broken by array position only, so a fixed insertion order always gives
//! the same pop order.

use crate::error::{HuffError, HuffResult};

use super::huffman::Node;

/// Largest number of nodes a tree over 256 byte values can hold.
pub const MAX_NODES: usize = 2 * u8::MAX as usize + 1;

#[derive(Debug)]
pub struct NodeQueue {
    nodes: Vec<Node>,
}

impl NodeQueue {
    /// Create an empty queue with its full capacity allocated up front.
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(MAX_NODES),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a node, sifting it up past every parent with a larger weight.
    pub fn insert(&mut self, node: Node) -> HuffResult<()> {
        if self.nodes.len() == MAX_NODES {
            return Err(HuffError::AllocationLimit);
        }
        self.nodes.push(node);
        let mut i = self.nodes.len() - 1;
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.nodes[i].weight < self.nodes[parent].weight {
                self.nodes.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
        Ok(())
    }

    /// Remove and return the lightest node, or None if the queue is empty.
    pub fn pop(&mut self) -> Option<Node> {
        if self.nodes.is_empty() {
            return None;
        }
        // swap_remove moves the last node into the root slot
        let node = self.nodes.swap_remove(0);
        self.heapify(0);
        Some(node)
    }

    /// Remove the two lightest nodes, lightest first. Takes nothing unless two are present.
    pub fn pop_pair(&mut self) -> Option<(Node, Node)> {
        if self.nodes.len() < 2 {
            return None;
        }
        let first = self.pop()?;
        let second = self.pop()?;
        Some((first, second))
    }

    /// The lightest node, left in place.
    pub fn peek(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// Sift the node at `index` down until neither child is lighter.
    fn heapify(&mut self, mut index: usize) {
        let size = self.nodes.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < size && self.nodes[left].weight < self.nodes[smallest].weight {
                smallest = left;
            }
            if right < size && self.nodes[right].weight < self.nodes[smallest].weight {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.nodes.swap(smallest, index);
            index = smallest;
        }
    }
}

impl Default for NodeQueue {
    fn default() -> Self {
        Self::new()
    }
}
