//! The decoding side of the huffman tree.
//!
//! The decoder has no frequencies, only path records, so it grows the tree one path at a time:
//! start from a filler root, follow each path (0 left, 1 right) creating fillers as needed, and
//! turn the node at the end into a data leaf. Nodes live in an arena and point at their children
//! by index, which lets a half-built tree have missing children.
//!

use log::trace;
use rustc_hash::FxHashSet;

use super::code_table::PathRecord;
use crate::bitstream::bitreader::BitReader;
use crate::error::{HuffError, HuffResult};

const ROOT: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Filler {
        left: Option<usize>,
        right: Option<usize>,
    },
    Data(u8),
}

/// A tree rebuilt from path records, ready to walk a payload.
#[derive(Debug)]
pub struct DecodeTree {
    nodes: Vec<Slot>,
}

impl DecodeTree {
    /// Rebuild the tree from `records`. Fails if the records repeat a symbol, or if one path
    /// is a prefix of (or equal to) another.
    pub fn from_records(records: &[PathRecord]) -> HuffResult<DecodeTree> {
        let mut tree = DecodeTree {
            nodes: vec![Slot::Filler {
                left: None,
                right: None,
            }],
        };
        let mut seen = FxHashSet::default();
        for record in records {
            if !seen.insert(record.symbol) {
                return Err(HuffError::corrupt(format!(
                    "symbol {:#04x} listed twice in the path table",
                    record.symbol
                )));
            }
            tree.add_path(record)?;
        }
        Ok(tree)
    }

    fn add_path(&mut self, record: &PathRecord) -> HuffResult<()> {
        let clash = || {
            HuffError::corrupt(format!(
                "path of symbol {:#04x} collides with another path",
                record.symbol
            ))
        };
        trace!("Building tree for {:#04x}, path {}", record.symbol, record.path);

        let mut node = ROOT;
        for go_right in record.path.iter() {
            let next = match self.nodes[node] {
                Slot::Data(_) => return Err(clash()),
                Slot::Filler { left, right } => if go_right { right } else { left },
            };
            node = match next {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Slot::Filler {
                        left: None,
                        right: None,
                    });
                    if let Slot::Filler { left, right } = &mut self.nodes[node] {
                        if go_right {
                            *right = Some(child);
                        } else {
                            *left = Some(child);
                        }
                    }
                    child
                }
            };
        }
        // Only a fresh, childless filler can become a leaf
        match self.nodes[node] {
            Slot::Filler {
                left: None,
                right: None,
            } if node != ROOT => {
                self.nodes[node] = Slot::Data(record.symbol);
                Ok(())
            }
            _ => Err(clash()),
        }
    }

    /// Walk exactly `total_bits` payload bits from `br`, pushing one byte onto `out` each time a
    /// data leaf is reached. Running out of payload, stepping into a missing child, or stopping
    /// partway down a path are all corrupt input.
    pub fn decode(&self, br: &mut BitReader<'_>, total_bits: u64, out: &mut Vec<u8>) -> HuffResult<()> {
        let mut node = ROOT;
        for bit_no in 0..total_bits {
            let bit = br.bit().ok_or_else(|| {
                HuffError::corrupt(format!(
                    "payload ends after {} of {} bits",
                    bit_no, total_bits
                ))
            })?;
            let next = match self.nodes[node] {
                Slot::Filler { left, right } => if bit == 1 { right } else { left },
                // Leaves always send the cursor back to the root, so it never rests on one
                Slot::Data(_) => None,
            };
            let child = next.ok_or_else(|| {
                HuffError::corrupt(format!("bit {} walks off the code tree", bit_no))
            })?;
            match self.nodes[child] {
                Slot::Data(sym) => {
                    out.push(sym);
                    node = ROOT;
                }
                Slot::Filler { .. } => node = child,
            }
        }
        if node != ROOT {
            return Err(HuffError::corrupt("payload ends in the middle of a code"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::DecodeTree;
    use crate::bitstream::bitbuffer::BitBuffer;
    use crate::bitstream::bitreader::BitReader;
    use crate::huffman_coding::code_table::PathRecord;

    fn record(symbol: u8, bits: &str) -> PathRecord {
        let mut path = BitBuffer::new();
        for c in bits.chars() {
            path.append_bits((c == '1') as u64, 1);
        }
        PathRecord { symbol, path }
    }

    #[test]
    fn decode_test() {
        let records = [record(b'a', "0"), record(b'b', "10"), record(b'c', "11")];
        let tree = DecodeTree::from_records(&records).unwrap();
        // a b c a = 0 10 11 0
        let payload = [0b0101_1000];
        let mut out = vec![];
        tree.decode(&mut BitReader::new(&payload), 6, &mut out).unwrap();
        assert_eq!(out, b"abca");
    }

    #[test]
    fn single_symbol_test() {
        let tree = DecodeTree::from_records(&[record(b'x', "0")]).unwrap();
        let mut out = vec![];
        tree.decode(&mut BitReader::new(&[0]), 5, &mut out).unwrap();
        assert_eq!(out, b"xxxxx");

        // a 1 bit has nowhere to go
        let mut out = vec![];
        assert!(tree.decode(&mut BitReader::new(&[0b0100_0000]), 3, &mut out).is_err());
    }

    #[test]
    fn collision_test() {
        // prefix
        assert!(DecodeTree::from_records(&[record(1, "0"), record(2, "01")]).is_err());
        assert!(DecodeTree::from_records(&[record(1, "01"), record(2, "0")]).is_err());
        // same path
        assert!(DecodeTree::from_records(&[record(1, "10"), record(2, "10")]).is_err());
        // same symbol
        assert!(DecodeTree::from_records(&[record(1, "0"), record(1, "1")]).is_err());
    }

    #[test]
    fn truncated_payload_test() {
        let records = [record(b'a', "0"), record(b'b', "10"), record(b'c', "11")];
        let tree = DecodeTree::from_records(&records).unwrap();
        let mut out = vec![];
        // more bits claimed than bytes present
        assert!(tree.decode(&mut BitReader::new(&[0]), 9, &mut out).is_err());
        // stops halfway through "10"
        let mut out = vec![];
        assert!(tree.decode(&mut BitReader::new(&[0b1000_0000]), 1, &mut out).is_err());
    }

    #[test]
    fn empty_tree_test() {
        let tree = DecodeTree::from_records(&[]).unwrap();
        let mut out = vec![];
        tree.decode(&mut BitReader::new(&[]), 0, &mut out).unwrap();
        assert!(out.is_empty());
        assert!(tree.decode(&mut BitReader::new(&[0]), 1, &mut out).is_err());
    }
}
