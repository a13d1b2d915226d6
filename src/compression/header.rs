//! The header at the front of every compressed file: the path table and the payload bit count.

use log::trace;

use crate::bitstream::bitreader::BitReader;
use crate::error::{HuffError, HuffResult};
use crate::huffman_coding::code_table::PathRecord;

/// Most records a header can hold, one per byte value.
pub const MAX_SYMBOLS: usize = 256;

/// Path records and payload length read back from a compressed file.
#[derive(Debug)]
pub struct Header {
    pub records: Vec<PathRecord>,
    pub total_bits: u64,
}

/// Write the symbol count, each path record, and the payload bit count.
pub fn write_header<'a>(
    out: &mut Vec<u8>,
    records: impl ExactSizeIterator<Item = &'a PathRecord>,
    total_bits: u64,
) {
    out.extend_from_slice(&(records.len() as u16).to_le_bytes());
    for record in records {
        trace!(
            "Writing {:#04x}, {} bits: {}",
            record.symbol,
            record.path_length(),
            record.path
        );
        record.write_to(out);
    }
    out.extend_from_slice(&total_bits.to_le_bytes());
}

/// Read a header written by write_header, leaving `br` at the start of the payload.
pub fn read_header(br: &mut BitReader<'_>) -> HuffResult<Header> {
    let count = br
        .u16_le()
        .ok_or_else(|| HuffError::corrupt("file too short to hold a symbol count"))?
        as usize;
    if count > MAX_SYMBOLS {
        return Err(HuffError::corrupt(format!(
            "symbol count {} is over {}",
            count, MAX_SYMBOLS
        )));
    }

    let mut records = Vec::with_capacity(count);
    for _ in 0..count {
        let record = PathRecord::read_from(br)?;
        trace!(
            "Read {:#04x}, {} bits: {} at {}",
            record.symbol,
            record.path_length(),
            record.path,
            br.loc()
        );
        records.push(record);
    }

    let total_bits = br
        .u64_le()
        .ok_or_else(|| HuffError::corrupt("file ends before the payload bit count"))?;
    Ok(Header {
        records,
        total_bits,
    })
}
