//! The tools module provides helpers for the huff codec.
//!
//! The tools are:
//! - cli: Command line interface for huff.
//! - file_io: Whole-file reads and all-or-nothing writes.
//! - freq_count: Byte frequency count.
//!
pub mod cli;
pub mod file_io;
pub mod freq_count;
