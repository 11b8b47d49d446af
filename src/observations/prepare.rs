//! # Observation normalizer
//!
//! Brings the records of one multi-station event onto a common time base and into the
//! equatorial frame of date, which is what trajectory solvers expect.
//!
//! Steps
//! -----
//! 1. The first record is the reference. Its reference epoch is moved forward to its first
//!    time sample, so that this sample becomes exactly `t = 0`.
//! 2. Every other record is rebased on that epoch: its time samples are shifted by the
//!    difference of reference epochs (in seconds) and its `jdt_ref` is set to the shared one.
//! 3. RA/Dec are precessed from J2000 to the shared epoch and azimuth/elevation are
//!    recomputed from the precessed coordinates at each station.
//!
//! The order of the records is preserved.
use log::{debug, info};

use super::{MeteorObservation, ObservationSet};
use crate::constants::{JulianDate, J2000_JD, SECONDS_PER_DAY};
use crate::ref_system::{radec_to_altaz_vect, EquatorialPrecession, Iau1976Precession};

/// Observations of one event sharing a single reference Julian Date.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedObservations {
    pub jdt_ref: JulianDate,
    pub observations: Vec<MeteorObservation>,
}

impl PreparedObservations {
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MeteorObservation> {
        self.observations.iter()
    }
}

/// Normalize the records of one event with the IAU 1976 precession model.
///
/// Returns `None` for an empty input.
///
/// See also
/// ------------
/// * [`prepare_observations_with`] – Same transformation with a caller-provided precession.
pub fn prepare_observations(observations: ObservationSet) -> Option<PreparedObservations> {
    prepare_observations_with(observations, &Iau1976Precession)
}

/// Normalize the records of one event.
///
/// Arguments
/// ---------
/// * `observations`: records of a single event, the first one being the reference
/// * `precession`: transform from J2000 to the shared epoch
///
/// Return
/// ----------
/// * `None` when `observations` is empty, otherwise the rebased records together with the
///   shared reference Julian Date. The first time sample of the first record is `0.0`.
pub fn prepare_observations_with<P>(
    mut observations: ObservationSet,
    precession: &P,
) -> Option<PreparedObservations>
where
    P: EquatorialPrecession + ?Sized,
{
    let (reference, others) = observations.split_first_mut()?;

    let tsec_delta = reference.time_data().first().copied().unwrap_or(0.0);
    let jdt_ref = reference.jdt_ref() + tsec_delta / SECONDS_PER_DAY;
    reference.retime(jdt_ref, -tsec_delta);

    for obs in others {
        let dt = (obs.jdt_ref() - jdt_ref) * SECONDS_PER_DAY;
        debug!(
            "Shifting station {} by {dt:.6} s onto the reference epoch",
            obs.station_id()
        );
        obs.retime(jdt_ref, dt);
    }

    for obs in observations.iter_mut() {
        let (ra, dec) = precession.precess(J2000_JD, jdt_ref, obs.ra_data(), obs.dec_data());
        let (azim, elev) =
            radec_to_altaz_vect(&ra, &dec, jdt_ref, obs.latitude(), obs.longitude());
        obs.set_equatorial(ra, dec);
        obs.set_horizontal(azim, elev);
    }

    info!(
        "Prepared {} observations on reference JD {jdt_ref:.6}",
        observations.len()
    );

    Some(PreparedObservations {
        jdt_ref,
        observations,
    })
}
