//! Path table: the root-to-leaf route of every byte value in a huffman tree.
//!
//! A left edge is a 0 bit and a right edge a 1 bit. These paths are the codes written for each
//! input byte, and the path records stored in a file header are what the decoder rebuilds its
//! tree from.
//!

use log::trace;

use super::huffman::{HuffTree, Node, NodeData};
use crate::bitstream::bitbuffer::BitBuffer;
use crate::bitstream::bitreader::BitReader;
use crate::error::{HuffError, HuffResult};

/// The code of one byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRecord {
    pub symbol: u8,
    pub path: BitBuffer,
}

impl PathRecord {
    /// Number of bits in the path. Trees over 256 symbols are at most 255 edges deep.
    pub fn path_length(&self) -> u8 {
        self.path.len() as u8
    }

    /// Put `{symbol, path_length, ceil(path_length / 8) bytes of path}` on the output.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.push(self.symbol);
        out.push(self.path_length());
        out.extend_from_slice(&self.path.to_bytes());
    }

    /// Read one record written by write_to.
    pub fn read_from(br: &mut BitReader<'_>) -> HuffResult<PathRecord> {
        let symbol = br
            .byte()
            .ok_or_else(|| HuffError::corrupt("path table ends before a record's symbol"))?;
        let path_length = br.byte().ok_or_else(|| {
            HuffError::corrupt(format!("path table ends before the length of {:#04x}", symbol))
        })?;
        if path_length == 0 {
            return Err(HuffError::corrupt(format!(
                "symbol {:#04x} has an empty path",
                symbol
            )));
        }
        let bytes = br
            .bytes((path_length as usize + 7) / 8)
            .ok_or_else(|| {
                HuffError::corrupt(format!("path table ends inside the path of {:#04x}", symbol))
            })?;
        Ok(PathRecord {
            symbol,
            path: BitBuffer::from_bytes(bytes, path_length as u64),
        })
    }
}

/// Path records indexed by byte value.
#[derive(Debug, Clone)]
pub struct CodeTable {
    records: Vec<Option<PathRecord>>,
}

impl CodeTable {
    /// Walk `tree` and record the path to each of its leaves.
    pub fn from_tree(tree: &HuffTree) -> CodeTable {
        let mut table = CodeTable {
            records: vec![None; 256],
        };
        let mut path = BitBuffer::new();
        table.build_paths(tree.root(), &mut path, 0);
        table
    }

    /// Pre-order walk. `path` holds the route to `node` in its first `depth` bits; anything past
    /// that is left over from a sibling subtree and gets cut off before it is used.
    fn build_paths(&mut self, node: &Node, path: &mut BitBuffer, depth: u64) {
        match &node.node_data {
            NodeData::Leaf(sym) => {
                let record_path = if depth == 0 {
                    // A lone leaf still needs one bit per byte; give it a single 0.
                    BitBuffer::from_value(0, 1)
                } else {
                    let mut p = path.clone();
                    p.truncate(depth);
                    p
                };
                trace!("Found byte {:#04x} at {}", sym, record_path);
                self.records[*sym as usize] = Some(PathRecord {
                    symbol: *sym,
                    path: record_path,
                });
            }
            NodeData::Kids(left, right) => {
                path.truncate(depth);
                path.unset_bit(depth);
                self.build_paths(left, path, depth + 1);
                path.truncate(depth);
                path.set_bit(depth);
                self.build_paths(right, path, depth + 1);
            }
        }
    }

    /// The record for `symbol`, if it appeared in the input.
    pub fn get(&self, symbol: u8) -> Option<&PathRecord> {
        self.records[symbol as usize].as_ref()
    }

    /// Every record, in ascending byte order.
    pub fn records(&self) -> impl ExactSizeIterator<Item = &PathRecord> + '_ {
        let present: Vec<&PathRecord> = self.records.iter().flatten().collect();
        present.into_iter()
    }

    /// Number of byte values with a path.
    pub fn len(&self) -> usize {
        self.records.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when no path is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let paths: Vec<&BitBuffer> = self.records.iter().flatten().map(|r| &r.path).collect();
        paths.iter().enumerate().all(|(i, a)| {
            paths
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !(a.starts_with(b) || b.starts_with(a)))
        })
    }
}
