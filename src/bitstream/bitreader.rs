//! BitReader: reads the fields and the packed payload of a huff file.
//!
//! Bits come out most significant first, the same order the BitBuffer writes them. Multi-byte
//! integer fields are little-endian. Every read returns None once the data runs out, so callers
//! can turn a short file into a format error right where it happens.
//!

const BIT_MASK: u8 = 0xff;

/// Reads bits and byte-aligned fields from an in-memory byte slice.
#[derive(Debug)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
    bit_index: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new BitReader positioned at the first bit of `buffer`.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            cursor: 0,
            bit_index: 0,
        }
    }

    /// Return bit as Option<u8> (1 or 0), or None if there is no more data to read
    pub fn bit(&mut self) -> Option<u8> {
        let byte = *self.buffer.get(self.cursor)?;
        let bit = (byte & BIT_MASK >> self.bit_index) >> (7 - self.bit_index);
        self.bit_index += 1;
        if self.bit_index == 8 {
            self.bit_index = 0;
            self.cursor += 1;
        }
        Some(bit)
    }

    /// Return Option<bool> *true* if the next bit is 1, *false* if 0, consuming the bit,
    /// or None if there is no more data to read
    pub fn bool_bit(&mut self) -> Option<bool> {
        self.bit().map(|bit| bit == 1)
    }

    /// Return Option<u64> of the next n (0-64) bits, most significant first, or None if there
    /// is not enough data left. Nothing is consumed on None.
    pub fn bint(&mut self, n: usize) -> Option<u64> {
        if n > 64 || self.bits_left() < n as u64 {
            return None;
        }
        let mut result = 0_u64;
        for _ in 0..n {
            result = result << 1 | self.bit()? as u64;
        }
        Some(result)
    }

    /// Skip to the next byte boundary. Does nothing if already aligned.
    pub fn align(&mut self) {
        if self.bit_index > 0 {
            self.bit_index = 0;
            self.cursor += 1;
        }
    }

    /// Returns the next `n` whole bytes as a slice, or None if there are fewer left. Aligns to a
    /// byte boundary first.
    pub fn bytes(&mut self, n: usize) -> Option<&'a [u8]> {
        self.align();
        let end = self.cursor.checked_add(n)?;
        let slice = self.buffer.get(self.cursor..end)?;
        self.cursor = end;
        Some(slice)
    }

    /// Returns a byte as an Option<u8>, or None if there is no more data to read.
    pub fn byte(&mut self) -> Option<u8> {
        self.bytes(1).map(|b| b[0])
    }

    /// Reads a little-endian u16 field.
    pub fn u16_le(&mut self) -> Option<u16> {
        let bytes = self.bytes(2)?;
        Some(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Reads a little-endian u64 field.
    pub fn u64_le(&mut self) -> Option<u64> {
        let mut word = [0_u8; 8];
        word.copy_from_slice(self.bytes(8)?);
        Some(u64::from_le_bytes(word))
    }

    /// Everything from the next byte boundary to the end. Consumes it.
    pub fn rest(&mut self) -> &'a [u8] {
        self.align();
        let rest = self.buffer.get(self.cursor..).unwrap_or(&[]);
        self.cursor = self.buffer.len();
        rest
    }

    /// Count of unread bits.
    pub fn bits_left(&self) -> u64 {
        (self.buffer.len().saturating_sub(self.cursor) * 8).saturating_sub(self.bit_index) as u64
    }

    /// Debugging function. Report current position as [byte.bit].
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}
