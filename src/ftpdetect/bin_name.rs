//! # FF bin names
//!
//! Every record of a detection file starts with the name of the FF bin file holding the
//! detection. Two layouts exist:
//!
//! ```text
//! FF_CA0001_20180614_023512_123_0000256.fits    (6 segments, station code in segment 1)
//! FF453_20180614_023512_123_0000256.fits        (5 segments)
//! ```
//!
//! In both, the date `YYYYMMDD`, the time `HHMMSS` and the milliseconds follow each
//! other; only their position shifts by one segment.
use crate::{cams_errors::CamsError, constants::JulianDate, time::calendar_to_jd};

/// Segment count of the layout carrying a station code.
const OLD_LAYOUT_SEGMENTS: usize = 6;

/// Layout of an FF bin name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinLayout {
    /// `FF_<station>_<date>_<time>_<ms>_<frame>`
    Old,
    /// `FF<station>_<date>_<time>_<ms>_<frame>`
    New,
}

impl BinLayout {
    fn shift(self) -> usize {
        match self {
            BinLayout::Old => 1,
            BinLayout::New => 0,
        }
    }
}

/// UTC calendar timestamp carried by a bin name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinTimestamp {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u32,
}

impl BinTimestamp {
    /// Julian Date (UTC) of the timestamp.
    pub fn to_jd(&self) -> Result<JulianDate, CamsError> {
        calendar_to_jd(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.millisecond,
        )
    }
}

fn digits<T: std::str::FromStr>(
    segment: &str,
    range: std::ops::Range<usize>,
    name: &str,
) -> Result<T, CamsError> {
    segment
        .get(range)
        .filter(|s| s.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| CamsError::InvalidBinName(name.to_string()))
}

/// Split a bin name into its layout and timestamp.
///
/// Errors
/// ----------
/// * [`CamsError::InvalidBinName`] when a segment is missing or a field is not made of digits.
pub fn parse_bin_name(name: &str) -> Result<(BinLayout, BinTimestamp), CamsError> {
    let name = name.trim();
    let segments: Vec<&str> = name.split('_').collect();

    let layout = if segments.len() == OLD_LAYOUT_SEGMENTS {
        BinLayout::Old
    } else {
        BinLayout::New
    };
    let sc = layout.shift();

    let segment = |i: usize| {
        segments
            .get(i + sc)
            .copied()
            .ok_or_else(|| CamsError::InvalidBinName(name.to_string()))
    };

    let date = segment(1)?;
    let time = segment(2)?;
    let millis = segment(3)?;

    if date.len() != 8 || time.len() != 6 || millis.is_empty() {
        return Err(CamsError::InvalidBinName(name.to_string()));
    }

    let timestamp = BinTimestamp {
        year: digits(date, 0..4, name)?,
        month: digits(date, 4..6, name)?,
        day: digits(date, 6..8, name)?,
        hour: digits(time, 0..2, name)?,
        minute: digits(time, 2..4, name)?,
        second: digits(time, 4..6, name)?,
        millisecond: digits(millis, 0..millis.len(), name)?,
    };

    Ok((layout, timestamp))
}

/// Reference Julian Date of a record, from its bin name.
pub fn bin_name_to_jd(name: &str) -> Result<JulianDate, CamsError> {
    let (_, timestamp) = parse_bin_name(name)?;
    timestamp.to_jd()
}

#[cfg(test)]
mod bin_name_test {
    use super::*;
    use crate::constants::SECONDS_PER_DAY;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_parse_new_layout() {
        let (layout, ts) = parse_bin_name("FF453_20180614_023512_123_0000256.fits").unwrap();
        assert_eq!(layout, BinLayout::New);
        assert_eq!(
            ts,
            BinTimestamp {
                year: 2018,
                month: 6,
                day: 14,
                hour: 2,
                minute: 35,
                second: 12,
                millisecond: 123,
            }
        );
    }

    #[test]
    fn test_both_layouts_give_the_same_epoch() {
        let old = bin_name_to_jd("FF_CA0001_20180614_023512_123_0000256.fits").unwrap();
        let new = bin_name_to_jd("FF453_20180614_023512_123_0000256.fits").unwrap();
        assert_eq!(old, new);

        let expected = 2458283.5 + (2.0 * 3600.0 + 35.0 * 60.0 + 12.123) / SECONDS_PER_DAY;
        assert_abs_diff_eq!(new, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_bin_names() {
        assert!(matches!(
            parse_bin_name("FF453_20180614"),
            Err(CamsError::InvalidBinName(_))
        ));
        assert!(matches!(
            parse_bin_name("FF453_2018O614_023512_123_0000256.fits"),
            Err(CamsError::InvalidBinName(_))
        ));
        assert!(matches!(
            parse_bin_name("FF453_20180614_0235_123_0000256.fits"),
            Err(CamsError::InvalidBinName(_))
        ));
        assert!(matches!(
            bin_name_to_jd("FF453_20181332_023512_123_0000256.fits"),
            Err(CamsError::InvalidTimestamp(_))
        ));
    }
}
