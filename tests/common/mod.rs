#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const OLE_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
pub const MSG_MARKER: &[u8] = b"__substg1.0_1000001E";
/// 2015-06-01T00:00:00Z as a Windows FILETIME.
pub const FILETIME_2015_06_01: u64 = 130_775_904_000_000_000;
/// 1970-01-01T00:00:00Z as a Windows FILETIME.
pub const FILETIME_UNIX_EPOCH: u64 = 116_444_736_000_000_000;

pub const CONTENT_TYPES: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#;

/// Stored ZIP whose first entry is a block of zeros, so the 512-byte prefix
/// never scores as text.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    writer.start_file("padding.bin", options).unwrap();
    writer.write_all(&[0u8; 600]).unwrap();

    for (name, data) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

pub fn core_xml(modified: &str) -> Vec<u8> {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
<dc:creator>Recovered</dc:creator>
<dcterms:modified xsi:type="dcterms:W3CDTF">{modified}</dcterms:modified>
</cp:coreProperties>"#
    )
    .into_bytes()
}

pub fn xlsx_bytes(modified: &str) -> Vec<u8> {
    let core = core_xml(modified);
    zip_bytes(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("xl/workbook.xml", b"<workbook/>"),
        ("docProps/core.xml", &core),
    ])
}

pub fn docx_bytes(modified: &str) -> Vec<u8> {
    let core = core_xml(modified);
    zip_bytes(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("word/document.xml", b"<document/>"),
        ("docProps/core.xml", &core),
    ])
}

/// OLE header followed by zeros, optionally carrying the message marker and
/// a FILETIME at offset 200.
pub fn ole_bytes(with_msg_marker: bool, filetime: Option<u64>) -> Vec<u8> {
    let mut data = vec![0u8; 1024];
    data[..8].copy_from_slice(&OLE_MAGIC);
    if with_msg_marker {
        data[300..300 + MSG_MARKER.len()].copy_from_slice(MSG_MARKER);
    }
    if let Some(value) = filetime {
        data[200..208].copy_from_slice(&value.to_le_bytes());
    }
    data
}

/// `head` followed by zeros up to `len` bytes.
pub fn padded(head: &[u8], len: usize) -> Vec<u8> {
    let mut data = head.to_vec();
    data.resize(len.max(head.len()), 0);
    data
}

pub fn jpeg_bytes() -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    data.extend_from_slice(b"JFIF\x00");
    data.extend((0..2048u32).map(|i| (i.wrapping_mul(131) % 7) as u8));
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}
