use log::{debug, trace};

use super::pqueue::NodeQueue;
use crate::error::HuffResult;
use crate::tools::freq_count::Frequencies;

/// What a node holds: a byte (a data leaf) or two children (a filler node made by merging).
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NodeData {
    Kids(Box<Node>, Box<Node>),
    Leaf(u8),
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Node {
    pub weight: u64,
    pub node_data: NodeData,
}

impl Node {
    /// Create a data leaf for `symbol` seen `weight` times
    pub fn leaf(symbol: u8, weight: u64) -> Node {
        Node {
            weight,
            node_data: NodeData::Leaf(symbol),
        }
    }

    /// Create a filler node over two subtrees, weighing their sum
    pub fn merge(left: Node, right: Node) -> Node {
        Node {
            weight: left.weight + right.weight,
            node_data: NodeData::Kids(Box::new(left), Box::new(right)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node_data, NodeData::Leaf(_))
    }

    /// The byte of a data leaf; None for filler nodes.
    pub fn symbol(&self) -> Option<u8> {
        match self.node_data {
            NodeData::Leaf(sym) => Some(sym),
            NodeData::Kids(..) => None,
        }
    }

    /// Count of nodes on the longest root-to-leaf route. A lone leaf has height 1.
    pub fn height(&self) -> usize {
        match &self.node_data {
            NodeData::Kids(left, right) => 1 + left.height().max(right.height()),
            NodeData::Leaf(_) => 1,
        }
    }

    /// Number of data leaves under (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match &self.node_data {
            NodeData::Kids(left, right) => left.leaf_count() + right.leaf_count(),
            NodeData::Leaf(_) => 1,
        }
    }
}

/// A huffman tree built from the byte frequencies of one input.
#[derive(Debug, Clone)]
pub struct HuffTree {
    root: Node,
}

impl HuffTree {
    /// Build the tree for the byte values seen in `freqs`. Returns None when nothing was counted.
    ///
    /// Leaves go into the queue in ascending byte order. Then, while more than one node remains,
    /// the two lightest are popped and merged: the first popped becomes the left child, the
    /// second the right. With a single distinct byte the root is that byte's leaf.
    pub fn from_freqs(freqs: &Frequencies) -> HuffResult<Option<HuffTree>> {
        let mut queue = NodeQueue::new();
        for (sym, weight) in freqs.iter() {
            queue.insert(Node::leaf(sym, weight))?;
        }

        // Pare the queue down to one single node with child nodes
        while let Some((left_child, right_child)) = queue.pop_pair() {
            trace!(
                "Merging weights {} and {} into {}",
                left_child.weight,
                right_child.weight,
                left_child.weight + right_child.weight
            );
            queue.insert(Node::merge(left_child, right_child))?;
        }

        let tree = queue.pop().map(|root| HuffTree { root });
        if let Some(tree) = &tree {
            debug!(
                "Built tree over {} symbols, height {}",
                tree.root.leaf_count(),
                tree.root.height()
            );
        }
        Ok(tree)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn height(&self) -> usize {
        self.root.height()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }
}
