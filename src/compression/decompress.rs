use std::path::{Path, PathBuf};

use log::{debug, info};

use super::compress::{ratio, HUFF_EXT};
use super::header::read_header;
use crate::bitstream::bitreader::BitReader;
use crate::error::{HuffError, HuffResult};
use crate::huffman_coding::decode_tree::DecodeTree;
use crate::tools::file_io::{read_input, with_suffix, write_output};

/// Decompress a complete huff file image.
pub fn decompress(packed: &[u8]) -> HuffResult<Vec<u8>> {
    let mut br = BitReader::new(packed);
    let header = read_header(&mut br)?;

    // The payload must be exactly as long as the bit count says, no shorter and no longer.
    // Check the claim against the bits on hand before doing any arithmetic with it.
    let present_bits = br.bits_left();
    if header.total_bits > present_bits {
        return Err(HuffError::corrupt(format!(
            "payload of {} bits claimed, only {} bits present",
            header.total_bits, present_bits
        )));
    }
    let payload_bytes = header.total_bits / 8 + u64::from(header.total_bits % 8 != 0);
    let present = present_bits / 8;
    if present != payload_bytes {
        return Err(HuffError::corrupt(format!(
            "payload of {} bits needs {} bytes, found {}",
            header.total_bits, payload_bytes, present
        )));
    }

    let tree = DecodeTree::from_records(&header.records)?;
    debug!(
        "{} symbols, {} payload bits",
        header.records.len(),
        header.total_bits
    );

    // Every code is at least one bit, so the bits present bound the output length
    let mut out = Vec::with_capacity(present_bits as usize);
    tree.decode(&mut br, header.total_bits, &mut out)?;
    Ok(out)
}

/// Where decompressing `path` writes: the name without `.huff`, or with `.out` added when there
/// is no `.huff` to strip.
pub fn output_path(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext == HUFF_EXT => path.with_extension(""),
        _ => with_suffix(path, ".out"),
    }
}

/// Decompress the file at `path`. Returns the output path.
pub fn decompress_file(path: &Path, force: bool) -> HuffResult<PathBuf> {
    let packed = read_input(path)?;
    let out_path = output_path(path);
    let data = decompress(&packed)?;
    write_output(&out_path, &data, force)?;

    info!(
        "{}: {} -> {} bytes ({:.1}%)",
        path.display(),
        packed.len(),
        data.len(),
        ratio(packed.len(), data.len())
    );
    Ok(out_path)
}

/// Decode the file at `path` without writing anything. Returns the decoded length.
pub fn test_file(path: &Path) -> HuffResult<u64> {
    let packed = read_input(path)?;
    let data = decompress(&packed)?;
    info!("{}: ok, {} bytes", path.display(), data.len());
    Ok(data.len() as u64)
}

#[cfg(test)]
mod test {
    use super::{decompress, decompress_file, output_path, test_file};
    use crate::compression::compress::{compress, compress_file};
    use crate::error::HuffError;
    use std::fs;
    use std::path::PathBuf;

    fn round_trip(data: &[u8]) {
        let packed = compress(data).unwrap();
        assert_eq!(decompress(&packed).unwrap(), data);
    }

    #[test]
    fn round_trip_test() {
        round_trip(b"");
        round_trip(b"a");
        round_trip(b"ab");
        round_trip(b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        round_trip(b"It is a truth universally acknowledged, that a single man in possession of a good fortune, must be in want of a wife.");
        round_trip(&[0xaa, 0xaa, 0xaa, 0xbb]);

        let all: Vec<u8> = (0..=255_u8).cycle().take(5000).collect();
        round_trip(&all);

        // skewed weights give codes far longer than a byte
        let mut fib = vec![];
        let (mut a, mut b) = (1_usize, 1_usize);
        for sym in 0..20_u8 {
            fib.extend(std::iter::repeat(sym).take(a));
            let next = a + b;
            a = b;
            b = next;
        }
        round_trip(&fib);

        // something noisy
        let mut x = 0x2545_f491_u32;
        let noisy: Vec<u8> = (0..10_000)
            .map(|_| {
                x ^= x << 13;
                x ^= x >> 17;
                x ^= x << 5;
                (x >> 24) as u8
            })
            .collect();
        round_trip(&noisy);
    }

    #[test]
    fn two_symbol_test() {
        let packed = [
            2, 0, 0xaa, 1, 0x80, 0xbb, 1, 0x00, 4, 0, 0, 0, 0, 0, 0, 0, 0xe0,
        ];
        assert_eq!(decompress(&packed).unwrap(), vec![0xaa, 0xaa, 0xaa, 0xbb]);
    }

    #[test]
    fn corrupt_test() {
        let packed = compress(b"abracadabra").unwrap();
        let corrupt = |data: &[u8]| matches!(decompress(data), Err(HuffError::CorruptFormat(_)));

        // every strict prefix is truncated somewhere
        for end in 0..packed.len() {
            assert!(corrupt(&packed[..end]), "prefix of {} bytes decoded", end);
        }
        // trailing junk
        let mut long = packed.clone();
        long.push(0);
        assert!(corrupt(&long));
        // empty header with a payload bit count
        assert!(corrupt(&[0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0]));
        // zero length path
        assert!(corrupt(&[1, 0, b'a', 0, 1, 0, 0, 0, 0, 0, 0, 0, 0]));
        // duplicate symbol
        assert!(corrupt(&[
            2, 0, b'a', 1, 0x00, b'a', 1, 0x80, 1, 0, 0, 0, 0, 0, 0, 0, 0
        ]));
        // a bit count far beyond the data
        let mut huge = vec![0, 0];
        huge.extend_from_slice(&u64::MAX.to_le_bytes());
        assert!(corrupt(&huge));
        huge.push(0xff);
        assert!(corrupt(&huge));
        // a lone 0 path cannot decode a 1 bit
        assert!(corrupt(&[1, 0, b'a', 1, 0x00, 1, 0, 0, 0, 0, 0, 0, 0, 0x80]));
    }

    #[test]
    fn output_path_test() {
        assert_eq!(output_path(&PathBuf::from("a/b.txt.huff")), PathBuf::from("a/b.txt"));
        assert_eq!(output_path(&PathBuf::from("b.txt")), PathBuf::from("b.txt.out"));
        assert_eq!(output_path(&PathBuf::from("b")), PathBuf::from("b.out"));
    }

    #[test]
    fn file_round_trip_test() {
        let dir = std::env::temp_dir();
        let src = dir.join(format!("huff_file_rt_{}.txt", std::process::id()));
        let text = b"she sells sea shells by the sea shore".repeat(20);
        fs::write(&src, &text).unwrap();

        let packed = compress_file(&src, false).unwrap();
        assert_eq!(packed, dir.join(format!("huff_file_rt_{}.txt.huff", std::process::id())));
        assert_eq!(test_file(&packed).unwrap(), text.len() as u64);

        // the original is still there
        assert!(matches!(
            decompress_file(&packed, false),
            Err(HuffError::OutputExists(_))
        ));
        fs::remove_file(&src).unwrap();
        let restored = decompress_file(&packed, false).unwrap();
        assert_eq!(restored, src);
        assert_eq!(fs::read(&restored).unwrap(), text);

        fs::remove_file(&restored).unwrap();
        fs::remove_file(&packed).unwrap();
    }

    #[test]
    fn missing_file_test() {
        let path = std::env::temp_dir().join(format!("huff_missing_{}", std::process::id()));
        assert!(matches!(compress_file(&path, false), Err(HuffError::FileNotFound(_))));
        assert!(matches!(test_file(&path), Err(HuffError::FileNotFound(_))));
    }
}
