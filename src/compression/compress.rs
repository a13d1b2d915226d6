use std::path::{Path, PathBuf};

use log::{debug, info};

use super::header::write_header;
use crate::bitstream::bitbuffer::BitBuffer;
use crate::error::{HuffError, HuffResult};
use crate::huffman_coding::code_table::CodeTable;
use crate::huffman_coding::huffman::HuffTree;
use crate::tools::file_io::{read_input, with_suffix, write_output};
use crate::tools::freq_count::freqs;

/// Extension added to compressed files.
pub const HUFF_EXT: &str = "huff";

/*
    Compression is one pass to count byte frequencies and a second to emit codes.
    The whole input is in memory, so the payload can be sized exactly before the
    second pass: the sum over every byte value of its count times its path length.
*/

/// Compress `data` into a complete huff file image.
pub fn compress(data: &[u8]) -> HuffResult<Vec<u8>> {
    let freqs = freqs(data);
    let mut out = Vec::with_capacity(data.len() / 2 + 16);

    let tree = match HuffTree::from_freqs(&freqs)? {
        Some(tree) => tree,
        None => {
            debug!("Empty input, writing an empty header");
            write_header(&mut out, std::iter::empty(), 0);
            return Ok(out);
        }
    };
    let table = CodeTable::from_tree(&tree);

    let total_bits: u64 = freqs
        .iter()
        .filter_map(|(sym, count)| table.get(sym).map(|r| count * r.path.len()))
        .sum();
    debug!(
        "{} bytes, {} distinct symbols, tree height {}, {} payload bits",
        freqs.total(),
        freqs.distinct(),
        tree.height(),
        total_bits
    );

    let mut payload = BitBuffer::with_capacity(total_bits);
    for &byte in data {
        let record = table.get(byte).ok_or(HuffError::MissingCode(byte))?;
        payload.encode(&record.path);
    }

    write_header(&mut out, table.records(), payload.len());
    out.extend_from_slice(&payload.to_bytes());
    Ok(out)
}

/// Compress the file at `path` into `<path>.huff`. Returns the output path.
pub fn compress_file(path: &Path, force: bool) -> HuffResult<PathBuf> {
    let data = read_input(path)?;
    let out_path = with_suffix(path, &format!(".{}", HUFF_EXT));
    let packed = compress(&data)?;
    write_output(&out_path, &packed, force)?;

    info!(
        "{}: {} -> {} bytes ({:.1}%)",
        path.display(),
        data.len(),
        packed.len(),
        ratio(packed.len(), data.len())
    );
    Ok(out_path)
}

/// Output size as a percentage of input size.
pub(crate) fn ratio(out_len: usize, in_len: usize) -> f64 {
    if in_len == 0 {
        0.0
    } else {
        out_len as f64 * 100.0 / in_len as f64
    }
}
