//! Huffman coding file compressor.
//!
//! Version 0.1.0
//!
//! Compresses a file with one static huffman code built from its byte frequencies. The code
//! table travels in a small header ahead of the bit-packed payload, so a file decodes with no
//! outside information.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> huff -c test.txt`
//!
//! This will compress the file and create the file test.txt.huff. The original file is kept.
//! `huff -d test.txt.huff` restores it, and `huff -t test.txt.huff` checks it without writing.
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::{compress, compress_file};
pub use compression::decompress::{decompress, decompress_file, test_file};
pub use error::{HuffError, HuffResult};
