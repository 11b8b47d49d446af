//! # CameraTimeOffsets reader
//!
//! Two header lines followed by `station_id offset_seconds` pairs. The offset is the
//! correction to add to the clock of the station.
use camino::Utf8Path;
use nom::{IResult, Parser};

use super::camera_sites::{parse_float_field, parse_station_token};
use super::{skip_header, StationId, TimeOffsets};
use crate::{cams_errors::CamsError, constants::CATALOG_HEADER_LINES};

fn parse_offset_line(input: &str) -> IResult<&str, (&str, f64)> {
    (parse_station_token, parse_float_field).parse(input)
}

/// Parse the content of a `CameraTimeOffsets.txt` file.
///
/// Blank lines are skipped. A malformed offset fails the whole load with
/// [`CamsError::CatalogParsing`].
pub fn parse_time_offsets(content: &str, origin: &Utf8Path) -> Result<TimeOffsets, CamsError> {
    skip_header(content, CATALOG_HEADER_LINES, origin)?
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_number, line)| {
            parse_offset_line(line)
                .map(|(_, (id, offset))| (StationId::new(id), offset))
                .map_err(|_| CamsError::CatalogParsing {
                    path: origin.to_path_buf(),
                    line_number,
                    line: line.to_string(),
                })
        })
        .collect()
}

/// Loads time offsets in seconds from a `CameraTimeOffsets.txt` file.
pub fn read_time_offsets(path: &Utf8Path) -> Result<TimeOffsets, CamsError> {
    let content = std::fs::read_to_string(path)?;
    parse_time_offsets(&content, path)
}

#[cfg(test)]
mod time_offsets_test {
    use super::*;

    #[test]
    fn test_parse_time_offsets() {
        let content = "Camera time offsets\nID  Offset(s)\n000123  0.25\nCA0001 -1.5\n\n";
        let offsets = parse_time_offsets(content, Utf8Path::new("offsets.txt")).unwrap();

        assert_eq!(offsets.len(), 2);
        assert_eq!(offsets.get(&StationId::new("123")), Some(0.25));
        assert_eq!(offsets.get(&StationId::new("CA0001")), Some(-1.5));
        assert_eq!(offsets.get(&StationId::new("7")), None);
    }

    #[test]
    fn test_parse_time_offsets_invalid() {
        let content = "h1\nh2\n1 0.5\n2 half\n";
        let result = parse_time_offsets(content, Utf8Path::new("offsets.txt"));
        assert!(matches!(
            result,
            Err(CamsError::CatalogParsing { line_number: 4, .. })
        ));

        let result = parse_time_offsets("", Utf8Path::new("offsets.txt"));
        assert!(matches!(result, Err(CamsError::TruncatedHeader { .. })));
    }
}
