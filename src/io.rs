//! Bounded, read-only access to candidate files.

use crate::error::Result;
use std::fs::{File, OpenOptions};
use std::io::Read;
use std::path::Path;

/// Opens a candidate file without write access.
pub fn open_read_only(path: impl AsRef<Path>) -> Result<File> {
    let file = OpenOptions::new()
        .read(true)
        .write(false)
        .open(path.as_ref())?;
    Ok(file)
}

/// Reads at most `limit` bytes from the start of `path`.
///
/// Shorter files yield a shorter buffer; an empty file yields an empty one.
/// The handle is closed before returning.
pub fn read_prefix(path: impl AsRef<Path>, limit: usize) -> Result<Vec<u8>> {
    let file = open_read_only(path)?;
    let mut buffer = Vec::with_capacity(limit);
    file.take(limit as u64).read_to_end(&mut buffer)?;
    Ok(buffer)
}
