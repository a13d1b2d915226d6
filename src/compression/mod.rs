//! The compression module turns whole files into huff files and back.
//!
//! Compression happens in the following steps:
//! - Frequency count: one pass over the input to weigh every byte value.
//! - Huffman tree: merge the lightest nodes until one root remains.
//! - Path table: record the route from the root to every byte value.
//! - Header: the path table and the payload bit count, written ahead of the payload.
//! - Payload: the path of every input byte, packed end to end.
//!
//! Decompression reads the header, grows a decoding tree from the path table, and walks the
//! payload through it. Both directions are single threaded.
//!

pub mod compress;
pub mod decompress;
pub mod header;
