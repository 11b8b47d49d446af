//! # CameraSites reader
//!
//! `CameraSites.txt` lists one camera per line after a two-line header:
//!
//! ```text
//! Camera sites
//! ID  Lat(+N)  Lon(+W)  Height(km)
//! 000123   43.19279  81.31565  0.324
//! # 000124 43.26420  80.77209  0.316   (commented out)
//! ```
//!
//! Fields are whitespace separated; anything after the fourth field is ignored. The
//! file stores longitudes positive **west**, the loader returns them positive east.
use camino::Utf8Path;
use nom::{
    branch::alt,
    bytes::complete::take_till1,
    character::complete::{space0, space1},
    combinator::{eof, peek},
    number::complete::double,
    sequence::{preceded, terminated},
    IResult, Parser,
};

use super::{skip_header, StationId, StationRecord};
use crate::{
    cams_errors::CamsError,
    constants::{CATALOG_HEADER_LINES, KM_TO_M},
};

pub(super) fn parse_station_token(input: &str) -> IResult<&str, &str> {
    preceded(space0, take_till1(|c: char| c.is_whitespace())).parse(input)
}

/// A float field, preceded by whitespace and followed by whitespace or the end of line.
pub(super) fn parse_float_field(input: &str) -> IResult<&str, f64> {
    preceded(space1, terminated(double, peek(alt((space1, eof))))).parse(input)
}

fn parse_site_line(input: &str) -> IResult<&str, (&str, f64, f64, f64)> {
    (
        parse_station_token,
        parse_float_field,
        parse_float_field,
        parse_float_field,
    )
        .parse(input)
}

/// Parse the content of a `CameraSites.txt` file.
///
/// Arguments
/// -----------------
/// * `content` – Full text of the file, header included.
/// * `origin` – Path used to label errors.
///
/// Return
/// ----------
/// * The station records in file order, with latitude/longitude in **radians**
///   (longitude +E) and height in **meters**.
///
/// Errors
/// ----------
/// * [`CamsError::TruncatedHeader`] if the file has fewer lines than its header.
/// * [`CamsError::CatalogParsing`] on the first record whose numeric fields do not parse;
///   the whole load fails.
pub fn parse_camera_sites(
    content: &str,
    origin: &Utf8Path,
) -> Result<Vec<StationRecord>, CamsError> {
    skip_header(content, CATALOG_HEADER_LINES, origin)?
        .filter(|(_, line)| !line.starts_with('#') && !line.trim().is_empty())
        .map(|(line_number, line)| {
            let (_, (id, lat, lon, height)) =
                parse_site_line(line).map_err(|_| CamsError::CatalogParsing {
                    path: origin.to_path_buf(),
                    line_number,
                    line: line.to_string(),
                })?;

            Ok(StationRecord {
                id: StationId::new(id),
                latitude: lat.to_radians(),
                longitude: (-lon).to_radians(),
                height: height * KM_TO_M,
                time_offset: None,
            })
        })
        .collect()
}

/// Loads locations of cameras from a CAMS-style `CameraSites.txt` file.
///
/// See [`parse_camera_sites`] for the format and error semantics.
pub fn read_camera_sites(path: &Utf8Path) -> Result<Vec<StationRecord>, CamsError> {
    let content = std::fs::read_to_string(path)?;
    parse_camera_sites(&content, path)
}
