//! The huffman module builds the prefix-free code for one input and rebuilds it on the way back.
//!
//! Encoding happens in three steps:
//! - pqueue: a min-heap of nodes keyed on byte frequency.
//! - huffman: repeatedly merge the two lightest nodes until a single root remains.
//! - code_table: walk the finished tree and record the bit path to every byte value.
//!
//! Decoding only sees the path records stored in the file header, so decode_tree grows a new tree
//! from those paths and walks it one payload bit at a time.
//!
//! Both directions are inherently sequential and do not benefit from multithreading.
//!

pub mod code_table;
pub mod decode_tree;
pub mod huffman;
pub mod pqueue;
