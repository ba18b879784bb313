//! FILETIME heuristic for OLE compound files.
//!
//! Instead of walking the property-set streams, every 8-byte little-endian
//! window is read as a Windows FILETIME and the first one landing between
//! 2000-01-01 and 2038-01-19 wins. Incidental byte patterns can match; the
//! result is a best guess.

use crate::error::{CoreError, Result};
use crate::types::{DocumentTimestamp, FILETIME_WINDOW};
use chrono::DateTime;

/// FILETIME ticks between 1601-01-01 and 1970-01-01.
pub const FILETIME_UNIX_EPOCH: u64 = 116_444_736_000_000_000;
pub const TICKS_PER_SECOND: u64 = 10_000_000;
/// 2000-01-01T00:00:00Z, exclusive.
pub const MIN_UNIX_SECONDS: i64 = 946_684_800;
/// `i32::MAX`, exclusive.
pub const MAX_UNIX_SECONDS: i64 = 2_147_483_647;

/// Converts a FILETIME into a UTC timestamp inside the accepted range.
pub fn filetime_to_timestamp(filetime: u64) -> Result<DocumentTimestamp> {
    let ticks = i128::from(filetime) - i128::from(FILETIME_UNIX_EPOCH);
    let seconds = (ticks / i128::from(TICKS_PER_SECOND)) as i64;

    let lower = i128::from(MIN_UNIX_SECONDS) * i128::from(TICKS_PER_SECOND);
    let upper = i128::from(MAX_UNIX_SECONDS) * i128::from(TICKS_PER_SECOND);
    if ticks <= lower || ticks >= upper {
        return Err(CoreError::OutOfRange { seconds });
    }

    let nanos = ((ticks % i128::from(TICKS_PER_SECOND)) * 100) as u32;
    DateTime::from_timestamp(seconds, nanos)
        .map(|datetime| DocumentTimestamp::new(datetime.naive_utc()))
        .ok_or(CoreError::OutOfRange { seconds })
}

/// Returns the first plausible FILETIME in the first [`FILETIME_WINDOW`]
/// bytes, scanning offsets left to right.
#[must_use]
pub fn scan_filetime(data: &[u8]) -> Option<DocumentTimestamp> {
    let window = &data[..data.len().min(FILETIME_WINDOW)];

    window.windows(8).enumerate().find_map(|(offset, chunk)| {
        let value = u64::from_le_bytes(<[u8; 8]>::try_from(chunk).ok()?);
        let timestamp = filetime_to_timestamp(value).ok()?;
        tracing::trace!("FILETIME candidate at offset {}: {}", offset, timestamp);
        Some(timestamp)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filetime_for(unix_seconds: u64) -> u64 {
        FILETIME_UNIX_EPOCH + unix_seconds * TICKS_PER_SECOND
    }

    #[test]
    fn test_unix_epoch_is_rejected() {
        assert!(matches!(
            filetime_to_timestamp(FILETIME_UNIX_EPOCH),
            Err(CoreError::OutOfRange { seconds: 0 })
        ));
    }

    #[test]
    fn test_bounds_are_exclusive() {
        assert!(filetime_to_timestamp(filetime_for(946_684_800)).is_err());
        assert!(filetime_to_timestamp(filetime_for(946_684_801)).is_ok());
        assert!(filetime_to_timestamp(filetime_for(2_147_483_646)).is_ok());
        assert!(filetime_to_timestamp(filetime_for(2_147_483_647)).is_err());
        assert!(filetime_to_timestamp(0).is_err());
        assert!(filetime_to_timestamp(u64::MAX).is_err());
    }

    #[test]
    fn test_2015_is_accepted() {
        // 2015-06-01T00:00:00Z
        let ts = filetime_to_timestamp(130_775_904_000_000_000).unwrap();
        assert_eq!(ts.file_stem(), "2015-06-01_00-00-00");
    }

    #[test]
    fn test_scan_finds_embedded_value() {
        let mut data = vec![0u8; 512];
        data[100..108].copy_from_slice(&130_775_904_000_000_000u64.to_le_bytes());
        let ts = scan_filetime(&data).unwrap();
        assert_eq!(ts.file_stem(), "2015-06-01_00-00-00");
    }

    #[test]
    fn test_scan_prefers_leftmost() {
        let mut data = vec![0u8; 512];
        data[40..48].copy_from_slice(&filetime_for(1_600_000_000).to_le_bytes());
        data[300..308].copy_from_slice(&filetime_for(1_433_116_800).to_le_bytes());
        let ts = scan_filetime(&data).unwrap();
        assert_eq!(ts.file_stem(), "2020-09-13_12-26-40");
    }

    #[test]
    fn test_scan_ignores_values_past_window() {
        let mut data = vec![0u8; FILETIME_WINDOW + 64];
        data[FILETIME_WINDOW + 8..FILETIME_WINDOW + 16]
            .copy_from_slice(&130_775_904_000_000_000u64.to_le_bytes());
        assert!(scan_filetime(&data).is_none());
    }

    #[test]
    fn test_scan_short_input() {
        assert!(scan_filetime(&[]).is_none());
        assert!(scan_filetime(&[0x01; 7]).is_none());
    }
}
