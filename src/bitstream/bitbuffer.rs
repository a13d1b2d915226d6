//! BitBuffer: a growable sequence of bits packed into 64 bit words.
//!
//! Bit `i` lives in word `i / 64` at bit position `63 - i % 64`, so bits fill each word from the
//! most significant end, and word 0 is the most significant word of the whole buffer. Words are
//! serialized big-endian, which makes the byte form the same MSB-first bit sequence: bit `i` is
//! bit `7 - i % 8` of byte `i / 8`.
//!
//! The same type holds a single symbol's path and the packed payload of a whole file.
//!
use std::fmt::{Display, Formatter};
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

/// Width of one storage word in bits.
pub const WORD_BITS: usize = u64::BITS as usize;

/// Growable, word-packed bit sequence.
///
/// Invariants: `words.len() == ceil(len / 64)`, `free == words.len() * 64 - len`, and every bit
/// past `len` in the last word is zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitBuffer {
    /// Packed bits, most significant bit first within each word.
    words: Vec<u64>,
    /// Count of valid bits.
    len: u64,
    /// Bits still unused at the low end of the last word.
    free: u8,
}

/// Keep only the `length` low order bits of `value`.
#[inline(always)]
fn low_bits(value: u64, length: u32) -> u64 {
    if length >= u64::BITS {
        value
    } else {
        value & ((1_u64 << length) - 1)
    }
}

/// Number of words needed to hold `bits` bits.
#[inline(always)]
fn words_for(bits: u64) -> usize {
    ((bits + WORD_BITS as u64 - 1) / WORD_BITS as u64) as usize
}

impl BitBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self {
            words: Vec::new(),
            len: 0,
            free: 0,
        }
    }

    /// Create an empty buffer with room for `bits` bits before it reallocates.
    pub fn with_capacity(bits: u64) -> Self {
        Self {
            words: Vec::with_capacity(words_for(bits)),
            len: 0,
            free: 0,
        }
    }

    /// Create a buffer holding the `length` low order bits of `value`, most significant first.
    /// Eg from_value(0b101, 3) holds the bits 1, 0, 1.
    pub fn from_value(value: u64, length: u8) -> Self {
        let mut bb = Self::new();
        bb.append_bits(value, length);
        bb
    }

    /// Rebuild a buffer of `len` bits from its MSB-first byte form. Missing bytes read as zero
    /// and bits past `len` are dropped.
    pub fn from_bytes(bytes: &[u8], len: u64) -> Self {
        let word_count = words_for(len);
        let mut words = Vec::with_capacity(word_count);
        for i in 0..word_count {
            let mut word = [0_u8; 8];
            let start = (i * 8).min(bytes.len());
            let end = (start + 8).min(bytes.len());
            word[..end - start].copy_from_slice(&bytes[start..end]);
            words.push(u64::from_be_bytes(word));
        }
        let mut bb = Self {
            words,
            len,
            free: 0,
        };
        bb.sync_free();
        bb.clear_tail();
        bb
    }

    /// Length in bits.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bits still free in the last word.
    pub fn bits_free(&self) -> u8 {
        self.free
    }

    /// The packed storage words.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Capacity in bits of the words currently allocated to the sequence.
    fn bit_capacity(&self) -> u64 {
        (self.words.len() * WORD_BITS) as u64
    }

    fn sync_free(&mut self) {
        self.free = (self.bit_capacity() - self.len) as u8;
    }

    /// Zero every bit past `len` in the last word.
    fn clear_tail(&mut self) {
        let used = (self.len % WORD_BITS as u64) as u32;
        if used > 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= !0_u64 << (u64::BITS - used);
            }
        }
    }

    /// Append the `length` (0-64) low order bits of `value`, most significant bit first.
    ///
    /// When the last word is short of room, the high part of the chunk fills it and the rest
    /// opens a new word at its most significant end.
    pub fn append_bits(&mut self, value: u64, length: u8) {
        let length = (length as u32).min(u64::BITS);
        if length == 0 {
            return;
        }
        let value = low_bits(value, length);
        if self.free == 0 {
            self.words.push(0);
            self.free = WORD_BITS as u8;
        }
        let free = self.free as u32;
        let last = self.words.len() - 1;
        if length <= free {
            self.words[last] |= value << (free - length);
            self.free -= length as u8;
        } else {
            // spill is 1..=63 here, so neither shift can reach 64
            let spill = length - free;
            self.words[last] |= value >> spill;
            self.words.push(value << (u64::BITS - spill));
            self.free = (u64::BITS - spill) as u8;
        }
        self.len += length as u64;
    }

    /// Append every bit of `other`, using its own length.
    pub fn encode(&mut self, other: &BitBuffer) {
        let full = (other.len / WORD_BITS as u64) as usize;
        let rem = (other.len % WORD_BITS as u64) as u32;
        if self.free == 0 && rem == 0 {
            // Word aligned on both sides: straight copy
            self.words.extend_from_slice(&other.words[..full]);
            self.len += other.len;
            return;
        }
        for &word in &other.words[..full] {
            self.append_bits(word, WORD_BITS as u8);
        }
        if rem > 0 {
            self.append_bits(other.words[full] >> (u64::BITS - rem), rem as u8);
        }
    }

    /// Return bit `i` (1 or 0). Anything past the allocated words reads as 0.
    pub fn get_bit(&self, i: u64) -> u8 {
        if i >= self.bit_capacity() {
            return 0;
        }
        let word = self.words[(i / WORD_BITS as u64) as usize];
        ((word >> (63 - i % WORD_BITS as u64)) & 1) as u8
    }

    /// Grow so bit `i` is inside the sequence.
    fn ensure_bit(&mut self, i: u64) {
        if i >= self.len {
            self.words.resize(words_for(i + 1), 0);
            self.len = i + 1;
            self.sync_free();
        }
    }

    /// Set bit `i`, growing the buffer (and its length) to reach it.
    pub fn set_bit(&mut self, i: u64) {
        self.ensure_bit(i);
        self.words[(i / WORD_BITS as u64) as usize] |= 1_u64 << (63 - i % WORD_BITS as u64);
    }

    /// Clear bit `i`, growing the buffer (and its length) to reach it.
    pub fn unset_bit(&mut self, i: u64) {
        self.ensure_bit(i);
        self.words[(i / WORD_BITS as u64) as usize] &= !(1_u64 << (63 - i % WORD_BITS as u64));
    }

    /// Shorten to `len` bits. Does nothing if the buffer is already that short.
    pub fn truncate(&mut self, len: u64) {
        if len >= self.len {
            return;
        }
        self.words.truncate(words_for(len));
        self.len = len;
        self.sync_free();
        self.clear_tail();
    }

    /// Logical shift toward bit 0: bit `i + n` moves to `i`, zeros enter at the end and the
    /// length is unchanged. Carries flow from each word into the more significant word before it.
    pub fn shift_left(&mut self, n: u64) {
        if n == 0 {
            return;
        }
        if n >= self.len {
            self.words.iter_mut().for_each(|w| *w = 0);
            return;
        }
        let word_shift = (n / WORD_BITS as u64) as usize;
        let bit_shift = (n % WORD_BITS as u64) as u32;
        let count = self.words.len();
        for i in 0..count {
            let hi = self.words.get(i + word_shift).copied().unwrap_or(0);
            let lo = self.words.get(i + word_shift + 1).copied().unwrap_or(0);
            self.words[i] = if bit_shift == 0 {
                hi
            } else {
                (hi << bit_shift) | (lo >> (u64::BITS - bit_shift))
            };
        }
        self.clear_tail();
    }

    /// Logical shift away from bit 0: bit `i` moves to `i + n`, zeros enter at the front and bits
    /// pushed past the length are lost. Carries flow into the less significant word after each.
    pub fn shift_right(&mut self, n: u64) {
        if n == 0 {
            return;
        }
        if n >= self.len {
            self.words.iter_mut().for_each(|w| *w = 0);
            return;
        }
        let word_shift = (n / WORD_BITS as u64) as usize;
        let bit_shift = (n % WORD_BITS as u64) as u32;
        for i in (0..self.words.len()).rev() {
            let hi = if i >= word_shift + 1 {
                self.words[i - word_shift - 1]
            } else {
                0
            };
            let lo = if i >= word_shift {
                self.words[i - word_shift]
            } else {
                0
            };
            self.words[i] = if bit_shift == 0 {
                lo
            } else {
                (lo >> bit_shift) | (hi << (u64::BITS - bit_shift))
            };
        }
        self.clear_tail();
    }

    /// True when the first `prefix.len()` bits of self equal `prefix`.
    pub fn starts_with(&self, prefix: &BitBuffer) -> bool {
        if prefix.len > self.len {
            return false;
        }
        let full = (prefix.len / WORD_BITS as u64) as usize;
        if self.words[..full] != prefix.words[..full] {
            return false;
        }
        let rem = (prefix.len % WORD_BITS as u64) as u32;
        if rem == 0 {
            return true;
        }
        let mask = !0_u64 << (u64::BITS - rem);
        self.words[full] & mask == prefix.words[full]
    }

    /// Iterate over the bits in order, `true` for 1.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.get_bit(i) == 1)
    }

    /// Serialize as big-endian words, trimmed to the `ceil(len / 8)` bytes that hold data.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out: Vec<u8> = self.words.iter().flat_map(|w| w.to_be_bytes()).collect();
        out.truncate(((self.len + 7) / 8) as usize);
        out
    }
}

impl Display for BitBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// OR word by word over the shorter buffer; the longer tail is kept as is.
impl BitOrAssign<&BitBuffer> for BitBuffer {
    fn bitor_assign(&mut self, mask: &BitBuffer) {
        if mask.words.len() > self.words.len() {
            self.words.resize(mask.words.len(), 0);
        }
        self.words
            .iter_mut()
            .zip(&mask.words)
            .for_each(|(w, m)| *w |= m);
        self.len = self.len.max(mask.len);
        self.sync_free();
    }
}

impl BitOr for &BitBuffer {
    type Output = BitBuffer;

    fn bitor(self, mask: &BitBuffer) -> BitBuffer {
        let mut bb = self.clone();
        bb |= mask;
        bb
    }
}

/// AND word by word over the shorter buffer; the result is as long as the shorter operand.
impl BitAndAssign<&BitBuffer> for BitBuffer {
    fn bitand_assign(&mut self, mask: &BitBuffer) {
        self.words
            .iter_mut()
            .zip(&mask.words)
            .for_each(|(w, m)| *w &= m);
        self.truncate(mask.len);
    }
}

impl BitAnd for &BitBuffer {
    type Output = BitBuffer;

    fn bitand(self, mask: &BitBuffer) -> BitBuffer {
        let mut bb = self.clone();
        bb &= mask;
        bb
    }
}
