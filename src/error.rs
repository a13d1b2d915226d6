use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the huff codec and its file driver.
#[derive(Debug, Error)]
pub enum HuffError {
    /// The input path does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    /// The output path exists and overwriting was not requested.
    #[error("output file already exists: {} (use --force to overwrite)", .0.display())]
    OutputExists(PathBuf),
    /// Compressed data is truncated, or a field or bit sequence is invalid.
    #[error("truncated or corrupt compressed data: {0}")]
    CorruptFormat(String),
    /// The node queue is full.
    #[error("node queue capacity exceeded")]
    AllocationLimit,
    /// A byte of the input has no path in the code table.
    #[error("no code for symbol {0:#04x}")]
    MissingCode(u8),
    /// Underlying read or write failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl HuffError {
    /// Shorthand for a [`HuffError::CorruptFormat`] with the given message.
    pub fn corrupt<S: Into<String>>(msg: S) -> Self {
        HuffError::CorruptFormat(msg.into())
    }
}

pub type HuffResult<T> = Result<T, HuffError>;
