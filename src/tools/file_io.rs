//! Whole-file reads and all-or-nothing writes.
//!
//! Output goes to a `.part` sibling first and is renamed into place once it is fully on disk,
//! so a failed run never leaves a partial file under the real name.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{HuffError, HuffResult};

/// Read the whole of `path` into memory.
pub fn read_input(path: &Path) -> HuffResult<Vec<u8>> {
    fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => HuffError::FileNotFound(path.to_path_buf()),
        _ => HuffError::Io(e),
    })
}

/// `path` with `suffix` tacked onto its file name.
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Write `data` to `path`. An existing `path` is an error unless `force` is set.
pub fn write_output(path: &Path, data: &[u8], force: bool) -> HuffResult<()> {
    if path.exists() {
        if !force {
            return Err(HuffError::OutputExists(path.to_path_buf()));
        }
        warn!("Overwriting {}", path.display());
    }

    let temp = with_suffix(path, ".part");
    debug!("Writing {} bytes to {}", data.len(), temp.display());
    // Never reuse a .part file that is already there; it is not ours to clobber
    let f_out = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => HuffError::OutputExists(temp.clone()),
            _ => HuffError::Io(e),
        })?;

    let result = write_and_sync(f_out, data).and_then(|_| fs::rename(&temp, path));
    if let Err(e) = result {
        // Best effort; the original error is the one worth reporting
        let _ = fs::remove_file(&temp);
        return Err(HuffError::Io(e));
    }
    Ok(())
}

fn write_and_sync(mut f_out: File, data: &[u8]) -> io::Result<()> {
    f_out.write_all(data)?;
    f_out.sync_all()
}

#[cfg(test)]
mod test {
    use super::{read_input, with_suffix, write_output};
    use crate::error::HuffError;
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("huff_file_io_{}_{}", std::process::id(), name))
    }

    #[test]
    fn missing_input_test() {
        let path = temp_path("missing");
        assert!(matches!(read_input(&path), Err(HuffError::FileNotFound(p)) if p == path));
    }

    #[test]
    fn write_then_read_test() {
        let path = temp_path("write");
        let _ = fs::remove_file(&path);
        write_output(&path, b"hello", false).unwrap();
        assert_eq!(read_input(&path).unwrap(), b"hello");
        assert!(!with_suffix(&path, ".part").exists());

        // refuses to clobber without force
        assert!(matches!(
            write_output(&path, b"bye", false),
            Err(HuffError::OutputExists(_))
        ));
        assert_eq!(read_input(&path).unwrap(), b"hello");

        write_output(&path, b"bye", true).unwrap();
        assert_eq!(read_input(&path).unwrap(), b"bye");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn failed_write_test() {
        // the parent directory does not exist, so nothing can be created
        let path = temp_path("no_such_dir").join("out");
        assert!(matches!(write_output(&path, b"x", false), Err(HuffError::Io(_))));
        assert!(!path.exists());
        assert!(!with_suffix(&path, ".part").exists());
    }

    #[test]
    fn stale_part_file_test() {
        let path = temp_path("stale");
        let part = with_suffix(&path, ".part");
        let _ = fs::remove_file(&path);
        fs::write(&part, b"someone else's").unwrap();

        assert!(matches!(
            write_output(&path, b"new", true),
            Err(HuffError::OutputExists(p)) if p == part
        ));
        // left alone, and no output appeared
        assert_eq!(fs::read(&part).unwrap(), b"someone else's");
        assert!(!path.exists());
        fs::remove_file(&part).unwrap();
    }

    #[test]
    fn suffix_test() {
        assert_eq!(
            with_suffix(&PathBuf::from("dir/a.txt"), ".huff"),
            PathBuf::from("dir/a.txt.huff")
        );
    }
}
