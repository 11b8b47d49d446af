//! # Meteor observations
//!
//! One [`MeteorObservation`](crate::observations::MeteorObservation) is the frame-by-frame
//! track of a single meteor as seen by a single camera station. Records are assembled point
//! by point with an [`ObservationBuilder`](crate::observations::ObservationBuilder) while the
//! detection file is parsed, then frozen with
//! [`ObservationBuilder::finish`](crate::observations::ObservationBuilder::finish): a finished
//! observation has fixed-length arrays and offers no way to append points.
//!
//! ## Units & conventions
//!
//! - Time samples: **seconds** relative to the reference Julian Date `jdt_ref`.
//! - Angles: **radians**. RA/Dec are J2000 after parsing and of date after
//!   [`prepare_observations`](crate::observations::prepare::prepare_observations).
//! - Azimuth: +E of due North.
//! - Magnitudes: `None` where the detection software reported no value.
//!
//! ## Modules
//!
//! * [`prepare`](crate::observations::prepare) – Time alignment and precession to the epoch of date.
//! * [`display`](crate::observations::display) – Table rendering of an observation.

pub mod display;
pub mod prepare;

use crate::constants::{Degree, JulianDate, Meter, Radian, Second, SECONDS_PER_DAY};
use crate::stations::{StationId, StationRecord};

/// Caller-grouped records of one event, in the order they are fed to a solver.
pub type ObservationSet = Vec<MeteorObservation>;

/// Append-only accumulator for the points of one station's record.
#[derive(Debug, Clone)]
pub struct ObservationBuilder {
    jdt_ref: JulianDate,
    station_id: StationId,
    latitude: Radian,
    longitude: Radian,
    height: Meter,
    fps: f64,
    time_data: Vec<Second>,
    azim_data: Vec<Radian>,
    elev_data: Vec<Radian>,
    ra_data: Vec<Radian>,
    dec_data: Vec<Radian>,
    mag_data: Vec<Option<f64>>,
}

impl ObservationBuilder {
    /// Start a record for `station`, with time zero at `jdt_ref`.
    ///
    /// Arguments
    /// ---------
    /// * `jdt_ref`: reference Julian Date (t = 0), clock offset already applied
    /// * `station`: geodetic position of the camera
    /// * `fps`: frame rate used to convert frame numbers into seconds
    pub fn new(jdt_ref: JulianDate, station: &StationRecord, fps: f64) -> Self {
        ObservationBuilder {
            jdt_ref,
            station_id: station.id.clone(),
            latitude: station.latitude,
            longitude: station.longitude,
            height: station.height,
            fps,
            time_data: Vec::new(),
            azim_data: Vec::new(),
            elev_data: Vec::new(),
            ra_data: Vec::new(),
            dec_data: Vec::new(),
            mag_data: Vec::new(),
        }
    }

    /// Adds the measurement point to the meteor.
    ///
    /// Arguments
    /// ---------
    /// * `frame_n`: frame number from the reference time
    /// * `azim`: azimuth, +E of due N, degrees
    /// * `elev`: elevation angle, degrees
    /// * `ra`: right ascension, J2000, degrees
    /// * `dec`: declination, J2000, degrees
    /// * `mag`: visual magnitude, if measured
    pub fn add_point(
        &mut self,
        frame_n: f64,
        azim: Degree,
        elev: Degree,
        ra: Degree,
        dec: Degree,
        mag: Option<f64>,
    ) {
        self.time_data.push(self.frame_time(frame_n));
        self.azim_data.push(azim.to_radians());
        self.elev_data.push(elev.to_radians());
        self.ra_data.push(ra.to_radians());
        self.dec_data.push(dec.to_radians());
        self.mag_data.push(mag);
    }

    pub fn station_id(&self) -> &StationId {
        &self.station_id
    }

    /// Time of the latest point, in seconds from `jdt_ref`.
    pub fn last_time(&self) -> Option<Second> {
        self.time_data.last().copied()
    }

    /// Time a frame number maps to in this record.
    pub fn frame_time(&self, frame_n: f64) -> Second {
        frame_n / self.fps
    }

    pub fn len(&self) -> usize {
        self.time_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_data.is_empty()
    }

    /// Freeze the record.
    pub fn finish(self) -> MeteorObservation {
        MeteorObservation {
            jdt_ref: self.jdt_ref,
            station_id: self.station_id,
            latitude: self.latitude,
            longitude: self.longitude,
            height: self.height,
            fps: self.fps,
            time_data: self.time_data.into_boxed_slice(),
            azim_data: self.azim_data.into_boxed_slice(),
            elev_data: self.elev_data.into_boxed_slice(),
            ra_data: self.ra_data.into_boxed_slice(),
            dec_data: self.dec_data.into_boxed_slice(),
            mag_data: self.mag_data.into_boxed_slice(),
            abs_mag_data: None,
        }
    }
}

/// Frozen track of one meteor seen from one station.
///
/// All per-point arrays share the same length. Values may be rewritten in place by the
/// normalizer and the photometry hook, the number of points never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct MeteorObservation {
    jdt_ref: JulianDate,
    station_id: StationId,
    latitude: Radian,
    longitude: Radian,
    height: Meter,
    fps: f64,
    time_data: Box<[Second]>,
    azim_data: Box<[Radian]>,
    elev_data: Box<[Radian]>,
    ra_data: Box<[Radian]>,
    dec_data: Box<[Radian]>,
    mag_data: Box<[Option<f64>]>,
    abs_mag_data: Option<Box<[Option<f64>]>>,
}

impl MeteorObservation {
    pub fn jdt_ref(&self) -> JulianDate {
        self.jdt_ref
    }

    pub fn station_id(&self) -> &StationId {
        &self.station_id
    }

    pub fn latitude(&self) -> Radian {
        self.latitude
    }

    pub fn longitude(&self) -> Radian {
        self.longitude
    }

    pub fn height(&self) -> Meter {
        self.height
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn time_data(&self) -> &[Second] {
        &self.time_data
    }

    pub fn azim_data(&self) -> &[Radian] {
        &self.azim_data
    }

    pub fn elev_data(&self) -> &[Radian] {
        &self.elev_data
    }

    pub fn ra_data(&self) -> &[Radian] {
        &self.ra_data
    }

    pub fn dec_data(&self) -> &[Radian] {
        &self.dec_data
    }

    pub fn mag_data(&self) -> &[Option<f64>] {
        &self.mag_data
    }

    /// Absolute magnitudes, once computed from a solved trajectory.
    pub fn abs_mag_data(&self) -> Option<&[Option<f64>]> {
        self.abs_mag_data.as_deref()
    }

    pub fn len(&self) -> usize {
        self.time_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_data.is_empty()
    }

    /// Apply a station clock correction after parsing.
    ///
    /// Equivalent to having the offset attached to the station catalog when the file
    /// was read: the reference epoch moves by `offset` seconds.
    pub fn apply_time_offset(&mut self, offset: Second) {
        self.jdt_ref += offset / SECONDS_PER_DAY;
    }

    /// Move the reference epoch to `jdt_ref` and shift every time sample by `dt` seconds.
    pub(crate) fn retime(&mut self, jdt_ref: JulianDate, dt: Second) {
        self.jdt_ref = jdt_ref;
        self.time_data.iter_mut().for_each(|t| *t += dt);
    }

    pub(crate) fn set_equatorial(&mut self, ra: Vec<Radian>, dec: Vec<Radian>) {
        debug_assert_eq!(ra.len(), self.len());
        debug_assert_eq!(dec.len(), self.len());
        self.ra_data = ra.into_boxed_slice();
        self.dec_data = dec.into_boxed_slice();
    }

    pub(crate) fn set_horizontal(&mut self, azim: Vec<Radian>, elev: Vec<Radian>) {
        debug_assert_eq!(azim.len(), self.len());
        debug_assert_eq!(elev.len(), self.len());
        self.azim_data = azim.into_boxed_slice();
        self.elev_data = elev.into_boxed_slice();
    }

    pub(crate) fn set_abs_magnitudes(&mut self, abs_mag: Vec<Option<f64>>) {
        debug_assert_eq!(abs_mag.len(), self.len());
        self.abs_mag_data = Some(abs_mag.into_boxed_slice());
    }
}
