//! # Camera stations: identifiers, geodetic records and clock offsets
//!
//! This module holds the **read-only station metadata** the detection parser resolves
//! every record against:
//!
//! - [`StationId`](crate::stations::StationId) – the single canonical identifier used as a key by every component.
//! - [`StationRecord`](crate::stations::StationRecord) – geodetic position of one camera and its optional clock offset.
//! - [`StationCatalog`](crate::stations::StationCatalog) – `StationId → StationRecord` lookup, loaded from `CameraSites.txt`
//!   and optionally enriched with `CameraTimeOffsets.txt`.
//! - [`TimeOffsets`](crate::stations::TimeOffsets) – `StationId → seconds` table as read from the offsets file.
//!
//! ## Identifier canonicalization
//!
//! The three input files name stations with free-form tokens. A token that parses as an
//! integer is canonicalized to its decimal rendering (`"000123"` → `"123"`), any other
//! token is kept verbatim (trimmed). Because [`StationId::new`](crate::stations::StationId::new) is the only way to build
//! an id, a station written `0123` in one file and `123` in another resolves to the same
//! key everywhere.
//!
//! ## Units
//!
//! - Latitude: **radians**, +N.
//! - Longitude: **radians**, +E (the site file stores +W; the loader negates it).
//! - Height: **meters** (the site file stores kilometers).
//! - Clock offsets: **seconds**, added to the reference time of the station.
//!
//! ## See also
//! ------------
//! * [`read_camera_sites`](crate::stations::camera_sites::read_camera_sites) – Site file loader.
//! * [`read_time_offsets`](crate::stations::time_offsets::read_time_offsets) – Clock offset loader.
//! * [`read_ftpdetectinfo`](crate::ftpdetect::reader::read_ftpdetectinfo) – Main consumer of the catalog.

pub mod camera_sites;
pub mod time_offsets;

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use camino::Utf8Path;
use itertools::Itertools;
use log::debug;

use crate::{
    cams_errors::CamsError,
    constants::{Meter, Radian, Second},
};

/// Canonical station identifier.
///
/// Stored as a string; numeric tokens are normalized so that leading zeros and
/// explicit signs do not create distinct keys. Use [`StationId::numeric`] for the
/// integer view when one exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(String);

impl StationId {
    /// Build the canonical identifier for a raw file token.
    pub fn new(token: &str) -> Self {
        let token = token.trim();
        match token.parse::<i64>() {
            Ok(n) => StationId(n.to_string()),
            Err(_) => StationId(token.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer view of the identifier, if the station is numbered.
    pub fn numeric(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StationId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(StationId::new(s))
    }
}

impl From<&str> for StationId {
    fn from(s: &str) -> Self {
        StationId::new(s)
    }
}

impl From<i64> for StationId {
    fn from(n: i64) -> Self {
        StationId(n.to_string())
    }
}

/// Geodetic position of a camera station.
///
/// # Fields
///
/// * `id` - canonical station identifier
/// * `latitude` - geodetic latitude in radians, +N
/// * `longitude` - geodetic longitude in radians, +E
/// * `height` - height above the ellipsoid in meters
/// * `time_offset` - clock correction in seconds, when a time-offset table was attached
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    pub id: StationId,
    pub latitude: Radian,
    pub longitude: Radian,
    pub height: Meter,
    pub time_offset: Option<Second>,
}

/// Clock offsets per station, in seconds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeOffsets(HashMap<StationId, Second>);

impl TimeOffsets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: StationId, offset: Second) {
        self.0.insert(id, offset);
    }

    pub fn get(&self, id: &StationId) -> Option<Second> {
        self.0.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StationId, &Second)> {
        self.0.iter()
    }
}

impl FromIterator<(StationId, Second)> for TimeOffsets {
    fn from_iter<I: IntoIterator<Item = (StationId, Second)>>(iter: I) -> Self {
        TimeOffsets(iter.into_iter().collect())
    }
}

/// Read-only lookup of camera stations.
///
/// Besides the geodetic records, the catalog remembers whether a time-offset table was
/// attached: only then is a station without an offset worth reporting, see
/// [`StationCatalog::clock_offset`].
#[derive(Debug, Clone, Default)]
pub struct StationCatalog {
    stations: HashMap<StationId, StationRecord>,
    time_offsets_attached: bool,
}

impl StationCatalog {
    /// Build a catalog from station records. Later records replace earlier ones with the
    /// same identifier.
    pub fn new(records: impl IntoIterator<Item = StationRecord>) -> Self {
        StationCatalog {
            stations: records.into_iter().map(|r| (r.id.clone(), r)).collect(),
            time_offsets_attached: false,
        }
    }

    /// Load a catalog from a `CameraSites.txt` file.
    pub fn from_camera_sites(path: &Utf8Path) -> Result<Self, CamsError> {
        Ok(Self::new(camera_sites::read_camera_sites(path)?))
    }

    /// Attach clock offsets to the matching stations.
    ///
    /// Offsets naming a station that is not in the catalog are ignored.
    pub fn with_time_offsets(mut self, offsets: &TimeOffsets) -> Self {
        for (id, offset) in offsets.iter() {
            match self.stations.get_mut(id) {
                Some(record) => record.time_offset = Some(*offset),
                None => debug!("Ignoring time offset of {offset} s for unknown station {id}"),
            }
        }
        self.time_offsets_attached = true;
        self
    }

    pub fn get(&self, id: &StationId) -> Option<&StationRecord> {
        self.stations.get(id)
    }

    pub fn contains(&self, id: &StationId) -> bool {
        self.stations.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Station records ordered by identifier.
    pub fn iter(&self) -> impl Iterator<Item = &StationRecord> {
        self.stations
            .values()
            .sorted_by(|a, b| a.id.cmp(&b.id))
    }

    pub fn has_time_offsets(&self) -> bool {
        self.time_offsets_attached
    }

    /// Clock offset of a station.
    ///
    /// Return
    /// ----------
    /// * `Ok(None)` when no time-offset table was attached to the catalog,
    /// * `Ok(Some(offset))` when the station has an offset,
    /// * `Err(CamsError::MissingTimeOffset)` when a table was attached but does not
    ///   cover this station. Callers treat this as recoverable.
    pub fn clock_offset(&self, id: &StationId) -> Result<Option<Second>, CamsError> {
        if !self.time_offsets_attached {
            return Ok(None);
        }

        self.stations
            .get(id)
            .and_then(|record| record.time_offset)
            .map(Some)
            .ok_or_else(|| CamsError::MissingTimeOffset(id.clone()))
    }
}

/// Skip the fixed header of a catalog file, failing when the file is shorter.
pub(crate) fn skip_header<'a>(
    content: &'a str,
    header_lines: usize,
    origin: &Utf8Path,
) -> Result<impl Iterator<Item = (usize, &'a str)>, CamsError> {
    let mut lines = content.lines().enumerate();
    for _ in 0..header_lines {
        if lines.next().is_none() {
            return Err(CamsError::TruncatedHeader {
                path: origin.to_path_buf(),
                expected: header_lines,
            });
        }
    }
    Ok(lines.map(|(i, line)| (i + 1, line)))
}
