//! Last-saved timestamps recovered from embedded document metadata.
//!
//! Only document formats are inspected: OOXML packages through their core
//! properties, OLE compound files through the FILETIME heuristic. Every
//! failure (unreadable file, broken archive, bad XML, implausible value)
//! yields `None`.

pub mod filetime;
pub mod ooxml;

use crate::io::{open_read_only, read_prefix};
use crate::types::{DocumentTimestamp, FileType, FILETIME_WINDOW};
use std::io::Cursor;
use std::path::Path;

/// Recovers the last-saved time of the file at `path`, already detected as
/// `file_type`.
pub fn document_timestamp(path: impl AsRef<Path>, file_type: FileType) -> Option<DocumentTimestamp> {
    let path = path.as_ref();

    let result = if file_type.is_ooxml() {
        open_read_only(path).and_then(ooxml::modified_timestamp)
    } else if file_type.is_ole() {
        read_prefix(path, FILETIME_WINDOW).map(|window| filetime::scan_filetime(&window))
    } else {
        return None;
    };

    match result {
        Ok(timestamp) => timestamp,
        Err(e) => {
            tracing::debug!("no timestamp for {}: {}", path.display(), e);
            None
        }
    }
}

/// In-memory counterpart of [`document_timestamp`].
#[must_use]
pub fn document_timestamp_bytes(data: &[u8], file_type: FileType) -> Option<DocumentTimestamp> {
    if file_type.is_ooxml() {
        ooxml::modified_timestamp(Cursor::new(data))
            .inspect_err(|e| tracing::debug!("no OOXML timestamp: {}", e))
            .ok()
            .flatten()
    } else if file_type.is_ole() {
        filetime::scan_filetime(data)
    } else {
        None
    }
}
