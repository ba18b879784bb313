//! Content-based format detection.
//!
//! Rules are applied in a fixed order and the first one that decides wins:
//!
//! 1. text heuristic (BOM or text score over the prefix)
//! 2. `RIFF` form type (WAV / AVI / WebP, otherwise unknown)
//! 3. ISO-BMFF `ftyp` major brand within the first 32 bytes
//! 4. the ordered [`signatures::SIGNATURES`] table, with OLE and ZIP
//!    matches handed to their disambiguators
//!
//! Detection never fails: unreadable input is [`FileType::Unknown`].

pub mod containers;
pub mod signatures;
pub mod text;

use crate::io::{open_read_only, read_prefix};
use crate::types::{FileType, PREFIX_SIZE};
use signatures::{Outcome, Refiner};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

/// Classifies a prefix of at most [`PREFIX_SIZE`] bytes.
///
/// `open_archive` is only invoked when the prefix carries the ZIP signature;
/// it must yield the whole file, since ZIP listings are read from the end.
pub fn classify<R, F>(prefix: &[u8], open_archive: F) -> FileType
where
    R: Read + Seek,
    F: FnOnce() -> crate::Result<R>,
{
    let prefix = &prefix[..prefix.len().min(PREFIX_SIZE)];

    if text::looks_like_text(prefix) {
        return FileType::Text;
    }

    if let Some(file_type) = containers::riff_form(prefix) {
        return file_type;
    }

    if let Some(file_type) = containers::ftyp_brand(prefix) {
        return file_type;
    }

    let Some(signature) = signatures::lookup(prefix) else {
        return FileType::Unknown;
    };

    match signature.outcome {
        Outcome::Final(file_type) => file_type,
        Outcome::Refine(Refiner::Ole) => containers::ole_kind(prefix),
        Outcome::Refine(Refiner::Zip) => match open_archive() {
            Ok(reader) => containers::disambiguate_zip(reader),
            Err(e) => {
                tracing::debug!("cannot reopen ZIP candidate, keeping generic zip: {}", e);
                FileType::Zip
            }
        },
    }
}

/// Detects the format of the file at `path`.
pub fn detect_file(path: impl AsRef<Path>) -> FileType {
    let path = path.as_ref();

    let prefix = match read_prefix(path, PREFIX_SIZE) {
        Ok(prefix) => prefix,
        Err(e) => {
            tracing::debug!("cannot read {}: {}", path.display(), e);
            return FileType::Unknown;
        }
    };

    let file_type = classify(&prefix, || open_read_only(path));
    tracing::debug!("{} -> {}", path.display(), file_type.extension());
    file_type
}

/// Detects the format of an in-memory file image.
#[must_use]
pub fn detect_bytes(data: &[u8]) -> FileType {
    classify(data, || Ok(Cursor::new(data)))
}
