//! Container-aware disambiguation for signatures shared by several formats.

use crate::error::Result;
use crate::types::FileType;
use memchr::memmem;
use std::collections::BTreeSet;
use std::io::{Read, Seek};

const RIFF_MAGIC: &[u8] = b"RIFF";
const RIFF_HEADER_LEN: usize = 12;

const FTYP_MARKER: &[u8] = b"ftyp";
const FTYP_SEARCH_LIMIT: usize = 32;
/// Brands reported as MP4. `M4V ` is part of this set, so the dedicated
/// `M4V ` branch in [`ftyp_brand`] never fires.
const MP4_BRANDS: &[&[u8; 4]] = &[b"mp41", b"mp42", b"isom", b"M4V ", b"MSNV"];
const M4V_BRAND: &[u8; 4] = b"M4V ";

/// Property-stream name of a message's subject (PR_SUBJECT, PT_STRING8),
/// present in the storage names of Outlook `.msg` files.
pub const MSG_MARKER: &[u8] = b"__substg1.0_1000001E";

const CONTENT_TYPES_ENTRY: &str = "[Content_Types].xml";
const JAR_MANIFEST_ENTRY: &str = "META-INF/MANIFEST.MF";
const APK_MANIFEST_ENTRY: &str = "AndroidManifest.xml";

/// Resolves a `RIFF` header by its form type at bytes `[8, 12)`.
///
/// Returns `None` when the prefix is not RIFF at all. A RIFF prefix that is
/// too short or carries an unrecognized form type resolves to
/// [`FileType::Unknown`].
#[must_use]
pub fn riff_form(data: &[u8]) -> Option<FileType> {
    if !data.starts_with(RIFF_MAGIC) {
        return None;
    }
    if data.len() < RIFF_HEADER_LEN {
        return Some(FileType::Unknown);
    }

    let file_type = match &data[8..12] {
        b"WAVE" => FileType::Wav,
        b"AVI " => FileType::Avi,
        b"WEBP" => FileType::WebP,
        _ => FileType::Unknown,
    };
    Some(file_type)
}

/// Looks for an ISO-BMFF `ftyp` box in the first 32 bytes and maps its
/// major brand. Unrecognized brands return `None` so the signature table
/// still gets a chance.
#[must_use]
pub fn ftyp_brand(data: &[u8]) -> Option<FileType> {
    let window = &data[..data.len().min(FTYP_SEARCH_LIMIT)];
    let pos = memmem::find(window, FTYP_MARKER)?;
    let brand = data.get(pos + 4..pos + 8)?;

    if MP4_BRANDS.iter().any(|b| b.as_slice() == brand) {
        Some(FileType::Mp4)
    } else if brand == M4V_BRAND.as_slice() {
        Some(FileType::M4v)
    } else {
        None
    }
}

/// Splits OLE compound files into Outlook messages and everything else.
/// Word, Excel and PowerPoint binaries all collapse into [`FileType::Doc`].
#[must_use]
pub fn ole_kind(prefix: &[u8]) -> FileType {
    if memmem::find(prefix, MSG_MARKER).is_some() {
        FileType::Msg
    } else {
        FileType::Doc
    }
}

/// Entry names of a ZIP container. Consulted once, then dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveManifest {
    names: BTreeSet<String>,
}

impl ArchiveManifest {
    /// Reads the central directory. Entry contents are not decompressed.
    pub fn read<R: Read + Seek>(reader: R) -> Result<Self> {
        let archive = zip::ZipArchive::new(reader)?;
        let manifest = archive.file_names().collect();
        Ok(manifest)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    #[must_use]
    pub fn any_with_prefix(&self, prefix: &str) -> bool {
        self.names.iter().any(|name| name.starts_with(prefix))
    }

    /// Maps the manifest to the most specific ZIP-based format.
    ///
    /// OOXML requires `[Content_Types].xml`; word, spreadsheet and
    /// presentation parts are checked in that order.
    #[must_use]
    pub fn classify(&self) -> FileType {
        if self.contains(CONTENT_TYPES_ENTRY) {
            if self.any_with_prefix("word/") {
                return FileType::Docx;
            }
            if self.any_with_prefix("xl/") {
                return FileType::Xlsx;
            }
            if self.any_with_prefix("ppt/") {
                return FileType::Pptx;
            }
        }

        if self.contains(JAR_MANIFEST_ENTRY) {
            FileType::Jar
        } else if self.contains(APK_MANIFEST_ENTRY) {
            FileType::Apk
        } else {
            FileType::Zip
        }
    }
}

impl<'a> FromIterator<&'a str> for ArchiveManifest {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(str::to_owned).collect(),
        }
    }
}

/// Classifies a ZIP container by its entry names.
///
/// An archive that cannot be listed despite its `PK\x03\x04` signature is
/// still reported as [`FileType::Zip`].
pub fn disambiguate_zip<R: Read + Seek>(reader: R) -> FileType {
    match ArchiveManifest::read(reader) {
        Ok(manifest) => manifest.classify(),
        Err(e) => {
            tracing::debug!("unreadable ZIP directory, keeping generic zip: {}", e);
            FileType::Zip
        }
    }
}
