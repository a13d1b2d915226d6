//! The bitstream module forms the bit-level I/O subsystem of huff.
//!
//! - bitbuffer: the growable packed bit sequence used for every symbol path and for the whole
//!   compressed payload.
//! - bitreader: a cursor that reads header fields and payload bits back out of a compressed file.
//!
//! Both sides use one bit order: most significant bit first. Words of a BitBuffer serialize
//! big-endian so the bytes on disk carry exactly the same bit sequence the reader walks.
//!
pub mod bitbuffer;
pub mod bitreader;
