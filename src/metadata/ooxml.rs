//! Last-modified time of OOXML packages (`docProps/core.xml`).

use crate::error::Result;
use crate::types::DocumentTimestamp;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use std::io::{Read, Seek};
use zip::result::ZipError;

pub const CORE_PROPERTIES_ENTRY: &str = "docProps/core.xml";
pub const DCTERMS_NS: &[u8] = b"http://purl.org/dc/terms/";

/// Reads `dcterms:modified` from the package's core properties.
///
/// A package without `docProps/core.xml`, or core properties without a
/// usable `modified` element, yields `Ok(None)`.
pub fn modified_timestamp<R: Read + Seek>(reader: R) -> Result<Option<DocumentTimestamp>> {
    let mut archive = zip::ZipArchive::new(reader)?;

    let mut entry = match archive.by_name(CORE_PROPERTIES_ENTRY) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut xml = Vec::new();
    entry.read_to_end(&mut xml)?;

    modified_from_core_xml(&xml)
}

/// Finds the first `{http://purl.org/dc/terms/}modified` element and parses
/// its text.
///
/// ```xml
/// <cp:coreProperties
///     xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties"
///     xmlns:dcterms="http://purl.org/dc/terms/">
///   <dcterms:modified xsi:type="dcterms:W3CDTF">2024-01-15T14:30:22Z</dcterms:modified>
/// </cp:coreProperties>
/// ```
pub fn modified_from_core_xml(xml: &[u8]) -> Result<Option<DocumentTimestamp>> {
    let mut reader = NsReader::from_reader(xml);
    let mut buf = Vec::new();
    let mut in_modified = false;

    loop {
        match reader.read_resolved_event_into(&mut buf)? {
            (ResolveResult::Bound(Namespace(ns)), Event::Start(e))
                if ns == DCTERMS_NS && e.local_name().as_ref() == b"modified" =>
            {
                in_modified = true;
            }
            (ResolveResult::Bound(Namespace(ns)), Event::Empty(e))
                if ns == DCTERMS_NS && e.local_name().as_ref() == b"modified" =>
            {
                return Ok(None);
            }
            (_, Event::Text(text)) if in_modified => {
                let value = text.unescape()?;
                if !value.trim().is_empty() {
                    return Ok(parse_w3cdtf(value.trim()));
                }
            }
            (_, Event::CData(data)) if in_modified => {
                let bytes = data.into_inner();
                return Ok(std::str::from_utf8(&bytes)
                    .ok()
                    .and_then(|value| parse_w3cdtf(value.trim())));
            }
            (_, Event::End(_)) if in_modified => return Ok(None),
            (_, Event::Eof) => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}

/// Parses a W3CDTF (ISO 8601) value such as `2024-01-15T14:30:22Z`.
///
/// Values with an offset keep their own wall-clock time. Fractional seconds
/// are dropped.
#[must_use]
pub fn parse_w3cdtf(value: &str) -> Option<DocumentTimestamp> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(DocumentTimestamp::new(datetime.naive_local()));
    }

    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(DocumentTimestamp::new(datetime));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(DocumentTimestamp::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core_xml(modified: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:creator>Jane Doe</dc:creator>
  <dcterms:created xsi:type="dcterms:W3CDTF">2020-05-01T08:00:00Z</dcterms:created>
  {modified}
</cp:coreProperties>"#
        )
    }

    #[test]
    fn test_modified_utc() {
        let xml = core_xml(r#"<dcterms:modified xsi:type="dcterms:W3CDTF">2024-01-15T14:30:22Z</dcterms:modified>"#);
        let ts = modified_from_core_xml(xml.as_bytes()).unwrap().unwrap();
        assert_eq!(ts.file_stem(), "2024-01-15_14-30-22");
    }

    #[test]
    fn test_modified_keeps_offset_wall_clock() {
        let xml = core_xml("<dcterms:modified>2022-11-03T23:05:09+02:00</dcterms:modified>");
        let ts = modified_from_core_xml(xml.as_bytes()).unwrap().unwrap();
        assert_eq!(ts.file_stem(), "2022-11-03_23-05-09");
    }

    #[test]
    fn test_prefix_is_resolved_by_namespace() {
        let xml = r#"<core xmlns:t="http://purl.org/dc/terms/"><t:modified>2021-07-04T12:00:00Z</t:modified></core>"#;
        let ts = modified_from_core_xml(xml.as_bytes()).unwrap().unwrap();
        assert_eq!(ts.file_stem(), "2021-07-04_12-00-00");
    }

    #[test]
    fn test_wrong_namespace_is_ignored() {
        let xml = r#"<core xmlns:dcterms="urn:not-dublin-core"><dcterms:modified>2021-07-04T12:00:00Z</dcterms:modified></core>"#;
        assert_eq!(modified_from_core_xml(xml.as_bytes()).unwrap(), None);
    }

    #[test]
    fn test_missing_or_empty_modified() {
        assert_eq!(modified_from_core_xml(core_xml("").as_bytes()).unwrap(), None);
        let empty = core_xml("<dcterms:modified/>");
        assert_eq!(modified_from_core_xml(empty.as_bytes()).unwrap(), None);
    }

    #[test]
    fn test_modified_in_cdata() {
        let xml = core_xml("<dcterms:modified><![CDATA[2023-03-10T09:15:00Z]]></dcterms:modified>");
        let ts = modified_from_core_xml(xml.as_bytes()).unwrap().unwrap();
        assert_eq!(ts.file_stem(), "2023-03-10_09-15-00");

        let padded = core_xml("<dcterms:modified>\n  <![CDATA[ 2023-03-10T09:15:00Z ]]>\n</dcterms:modified>");
        let ts = modified_from_core_xml(padded.as_bytes()).unwrap().unwrap();
        assert_eq!(ts.file_stem(), "2023-03-10_09-15-00");
    }

    #[test]
    fn test_unparseable_value() {
        let xml = core_xml("<dcterms:modified>last tuesday</dcterms:modified>");
        assert_eq!(modified_from_core_xml(xml.as_bytes()).unwrap(), None);
    }

    #[test]
    fn test_parse_w3cdtf_variants() {
        assert_eq!(
            parse_w3cdtf("2024-01-15T14:30:22.123Z").unwrap().file_stem(),
            "2024-01-15_14-30-22"
        );
        assert_eq!(
            parse_w3cdtf("2024-01-15T14:30:22").unwrap().file_stem(),
            "2024-01-15_14-30-22"
        );
        assert_eq!(parse_w3cdtf("2024-01-15").unwrap().file_stem(), "2024-01-15_00-00-00");
        assert!(parse_w3cdtf("").is_none());
    }
}
