//! Plain-text heuristic, evaluated before every binary signature.
//!
//! A binary format whose first [`PREFIX_SIZE`] bytes are mostly printable is
//! reported as text. This is a known limitation of the heuristic.

use crate::types::PREFIX_SIZE;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Minimum score per byte for a prefix to count as text (exclusive).
pub const TEXT_THRESHOLD: f64 = 0.7;

#[inline]
fn byte_weight(byte: u8) -> f64 {
    match byte {
        32..=126 | b'\t' | b'\n' | b'\r' => 1.0,
        128..=255 => 0.5,
        _ => 0.0,
    }
}

/// Average per-byte text weight over the first [`PREFIX_SIZE`] bytes.
///
/// Printable ASCII, tab, LF and CR weigh 1.0, bytes >= 0x80 weigh 0.5
/// (possible UTF-8), remaining control bytes weigh nothing.
#[must_use]
pub fn text_score(data: &[u8]) -> f64 {
    let window = &data[..data.len().min(PREFIX_SIZE)];
    if window.is_empty() {
        return 0.0;
    }
    let total: f64 = window.iter().map(|&b| byte_weight(b)).sum();
    total / window.len() as f64
}

#[must_use]
pub fn has_text_bom(data: &[u8]) -> bool {
    data.starts_with(UTF8_BOM) || data.starts_with(UTF16_LE_BOM) || data.starts_with(UTF16_BE_BOM)
}

#[must_use]
pub fn looks_like_text(data: &[u8]) -> bool {
    if data.is_empty() {
        return false;
    }
    has_text_bom(data) || text_score(data) > TEXT_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_is_text() {
        assert!(looks_like_text(b"Hello, World!\r\n\tindented line\n"));
    }

    #[test]
    fn test_empty_is_not_text() {
        assert!(!looks_like_text(&[]));
        assert_eq!(text_score(&[]), 0.0);
    }

    #[test]
    fn test_bom_wins_over_score() {
        let mut data = vec![0xFF, 0xFE];
        data.extend_from_slice(&[0x00; 64]);
        assert!(looks_like_text(&data));

        let mut data = vec![0xEF, 0xBB, 0xBF];
        data.extend_from_slice(&[0x01; 64]);
        assert!(looks_like_text(&data));
    }

    #[test]
    fn test_high_bytes_count_half() {
        assert_eq!(text_score(&[0xC3, 0xA9]), 0.5);
        assert!(!looks_like_text(&[0xC3, 0xA9, 0xC3, 0xA9]));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // 7 printable + 3 NUL = exactly 0.7
        let data = b"abcdefg\0\0\0";
        assert!((text_score(data) - 0.7).abs() < f64::EPSILON);
        assert!(!looks_like_text(data));
    }

    #[test]
    fn test_only_prefix_is_scored() {
        let mut data = vec![b'a'; PREFIX_SIZE];
        data.extend_from_slice(&[0x00; 4096]);
        assert_eq!(text_score(&data), 1.0);
    }
}
