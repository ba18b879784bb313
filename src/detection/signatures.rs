//! Ordered signature table.
//!
//! Lookup is first-match-wins over byte prefixes, so the order of
//! [`SIGNATURES`] is the priority policy. Entries whose outcome is
//! [`Outcome::Refine`] only say which disambiguator must decide the final
//! type. RIFF and ISO-BMFF brand checks run before the table and have no
//! generic entry here.

use crate::types::FileType;
use aho_corasick::{AhoCorasick, Anchored, Input, MatchKind, StartKind};
use std::sync::LazyLock;

/// Container disambiguators reachable from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refiner {
    /// OLE compound file: message vs. legacy document.
    Ole,
    /// ZIP container: OOXML, JAR, APK or plain ZIP.
    Zip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Final(FileType),
    Refine(Refiner),
}

#[derive(Debug, Clone, Copy)]
pub struct Signature {
    pub pattern: &'static [u8],
    pub outcome: Outcome,
}

impl Signature {
    const fn new(pattern: &'static [u8], file_type: FileType) -> Self {
        Self {
            pattern,
            outcome: Outcome::Final(file_type),
        }
    }

    const fn refine(pattern: &'static [u8], refiner: Refiner) -> Self {
        Self {
            pattern,
            outcome: Outcome::Refine(refiner),
        }
    }

    #[inline]
    #[must_use]
    pub fn matches(&self, data: &[u8]) -> bool {
        data.starts_with(self.pattern)
    }
}

pub const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
pub const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

pub static SIGNATURES: &[Signature] = &[
    Signature::new(&[0x0A], FileType::Pcx),
    Signature::new(b"L\x00\x00\x00", FileType::Lnk),
    Signature::new(b"ftypqt", FileType::Mov),
    // Images
    Signature::new(&[0xFF, 0xD8, 0xFF], FileType::Jpeg),
    Signature::new(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A], FileType::Png),
    Signature::new(b"GIF87a", FileType::Gif),
    Signature::new(b"GIF89a", FileType::Gif),
    Signature::new(&[0x42, 0x4D], FileType::Bmp),
    Signature::new(&[0x00, 0x00, 0x01, 0x00], FileType::Ico),
    Signature::new(&[0x49, 0x49, 0x2A, 0x00], FileType::Tiff),
    Signature::new(&[0x4D, 0x4D, 0x00, 0x2A], FileType::Tiff),
    // Documents
    Signature::new(b"%PDF-", FileType::Pdf),
    Signature::new(b"%!PS", FileType::PostScript),
    Signature::refine(ZIP_MAGIC, Refiner::Zip),
    // Audio
    Signature::new(b"ID3", FileType::Mp3),
    Signature::new(&[0xFF, 0xFB], FileType::Mp3),
    Signature::new(&[0xFF, 0xF3], FileType::Mp3),
    Signature::new(&[0xFF, 0xF2], FileType::Mp3),
    Signature::new(b"OggS", FileType::Ogg),
    Signature::new(b"fLaC", FileType::Flac),
    // Video
    Signature::new(b"\x00\x00\x00\x18ftypmp4", FileType::Mp4),
    Signature::new(b"\x00\x00\x00\x20ftypmp4", FileType::Mp4),
    Signature::new(b"\x00\x00\x00\x1Cftypmp4", FileType::Mp4),
    Signature::new(b"ftypmp4", FileType::Mp4),
    Signature::new(b"ftypisom", FileType::Mp4),
    Signature::new(b"ftypMSNV", FileType::Mp4),
    Signature::new(b"ftypM4V", FileType::M4v),
    Signature::new(&[0x1A, 0x45, 0xDF, 0xA3], FileType::Mkv),
    Signature::new(b"FLV\x01", FileType::Flv),
    Signature::new(&[0x00, 0x00, 0x01, 0xBA], FileType::Mpeg),
    Signature::new(&[0x00, 0x00, 0x01, 0xB3], FileType::Mpeg),
    // Archives
    Signature::new(b"Rar!\x1A\x07\x00", FileType::Rar),
    Signature::new(b"Rar!\x1A\x07\x01\x00", FileType::Rar),
    Signature::new(&[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C], FileType::SevenZip),
    // Legacy Office and Outlook
    Signature::refine(OLE_MAGIC, Refiner::Ole),
];

/// Anchored leftmost-first automaton over [`SIGNATURES`]; among patterns
/// matching at offset 0 it reports the one declared first.
static PATTERN_MATCHER: LazyLock<Option<AhoCorasick>> = LazyLock::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostFirst)
        .start_kind(StartKind::Anchored)
        .build(SIGNATURES.iter().map(|sig| sig.pattern))
        .ok()
});

/// Returns the first table entry whose pattern is a prefix of `data`.
#[must_use]
pub fn lookup(data: &[u8]) -> Option<&'static Signature> {
    let Some(matcher) = PATTERN_MATCHER.as_ref() else {
        return lookup_linear(data);
    };

    matcher
        .find(Input::new(data).anchored(Anchored::Yes))
        .map(|mat| &SIGNATURES[mat.pattern().as_usize()])
}

/// Plain in-order scan, used when the automaton could not be built.
#[must_use]
pub fn lookup_linear(data: &[u8]) -> Option<&'static Signature> {
    SIGNATURES.iter().find(|sig| sig.matches(data))
}
