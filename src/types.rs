use chrono::NaiveDateTime;

/// Number of leading bytes inspected by the signature detector.
pub const PREFIX_SIZE: usize = 512;
/// Number of leading bytes scanned for OLE FILETIME values.
pub const FILETIME_WINDOW: usize = 8192;

/// Format inferred from a file's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Text,
    Jpeg,
    Png,
    Gif,
    Bmp,
    Ico,
    Tiff,
    Pcx,
    WebP,
    Wav,
    Avi,
    Mp4,
    M4v,
    Mov,
    Mkv,
    Flv,
    Mpeg,
    Mp3,
    Ogg,
    Flac,
    Pdf,
    PostScript,
    Zip,
    Docx,
    Xlsx,
    Pptx,
    Jar,
    Apk,
    Rar,
    SevenZip,
    Doc,
    Msg,
    Lnk,
    Unknown,
}

impl FileType {
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Ico => "ico",
            Self::Tiff => "tif",
            Self::Pcx => "pcx",
            Self::WebP => "webp",
            Self::Wav => "wav",
            Self::Avi => "avi",
            Self::Mp4 => "mp4",
            Self::M4v => "m4v",
            Self::Mov => "mov",
            Self::Mkv => "mkv",
            Self::Flv => "flv",
            Self::Mpeg => "mpg",
            Self::Mp3 => "mp3",
            Self::Ogg => "ogg",
            Self::Flac => "flac",
            Self::Pdf => "pdf",
            Self::PostScript => "ps",
            Self::Zip => "zip",
            Self::Docx => "docx",
            Self::Xlsx => "xlsx",
            Self::Pptx => "pptx",
            Self::Jar => "jar",
            Self::Apk => "apk",
            Self::Rar => "rar",
            Self::SevenZip => "7z",
            Self::Doc => "doc",
            Self::Msg => "msg",
            Self::Lnk => "lnk",
            Self::Unknown => "bin",
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Gif => "GIF",
            Self::Bmp => "BMP",
            Self::Ico => "Icon",
            Self::Tiff => "TIFF",
            Self::Pcx => "PCX",
            Self::WebP => "WebP",
            Self::Wav => "WAVE Audio",
            Self::Avi => "AVI Video",
            Self::Mp4 => "MPEG-4 Video",
            Self::M4v => "M4V Video",
            Self::Mov => "QuickTime Video",
            Self::Mkv => "Matroska Video",
            Self::Flv => "Flash Video",
            Self::Mpeg => "MPEG Video",
            Self::Mp3 => "MP3 Audio",
            Self::Ogg => "Ogg",
            Self::Flac => "FLAC Audio",
            Self::Pdf => "PDF",
            Self::PostScript => "PostScript",
            Self::Zip => "ZIP Archive",
            Self::Docx => "Word Document",
            Self::Xlsx => "Excel Workbook",
            Self::Pptx => "PowerPoint Presentation",
            Self::Jar => "Java Archive",
            Self::Apk => "Android Package",
            Self::Rar => "RAR Archive",
            Self::SevenZip => "7-Zip Archive",
            Self::Doc => "Legacy Office Document",
            Self::Msg => "Outlook Message",
            Self::Lnk => "Windows Shortcut",
            Self::Unknown => "Unknown",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// OOXML packages carrying `docProps/core.xml`.
    #[inline]
    #[must_use]
    pub const fn is_ooxml(&self) -> bool {
        matches!(self, Self::Docx | Self::Xlsx | Self::Pptx)
    }

    /// OLE compound files scanned for FILETIME values.
    #[inline]
    #[must_use]
    pub const fn is_ole(&self) -> bool {
        matches!(self, Self::Doc | Self::Msg)
    }

    /// Formats whose last-saved timestamp may be recovered.
    #[inline]
    #[must_use]
    pub const fn is_document(&self) -> bool {
        self.is_ooxml() || self.is_ole()
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Last-saved time recovered from embedded document metadata, to the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentTimestamp(NaiveDateTime);

impl DocumentTimestamp {
    pub const STEM_FORMAT: &'static str = "%Y-%m-%d_%H-%M-%S";

    #[must_use]
    pub fn new(datetime: NaiveDateTime) -> Self {
        use chrono::Timelike;
        Self(datetime.with_nanosecond(0).unwrap_or(datetime))
    }

    /// File stem derived from the timestamp, e.g. `2024-01-15_14-30-22`.
    #[must_use]
    pub fn file_stem(&self) -> String {
        self.0.format(Self::STEM_FORMAT).to_string()
    }
}

impl std::fmt::Display for DocumentTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}
