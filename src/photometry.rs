//! # Absolute magnitudes
//!
//! Once a trajectory is solved, the range from each station to each point is known and
//! apparent magnitudes can be normalized to the standard distance of 100 km:
//!
//! ```text
//! M = m + 5 · log10(100 km / range)
//! ```
use crate::{
    cams_errors::CamsError,
    constants::{Meter, ABS_MAG_DISTANCE},
    observations::MeteorObservation,
    solver::TrajectorySolver,
};

/// Absolute magnitude of a point of apparent magnitude `mag` seen at `range` meters.
///
/// Returns `None` for a non-positive range.
pub fn absolute_magnitude(mag: f64, range: Meter) -> Option<f64> {
    (range > 0.0).then(|| mag + 5.0 * (ABS_MAG_DISTANCE / range).log10())
}

/// Compute the absolute magnitudes of every observation of a solved event.
///
/// `observations[i]` must be the `i`-th observation fed to `solver`. Points without an
/// apparent magnitude stay without absolute magnitude. When the solver modeled fewer
/// ranges than points, the remaining points are left without absolute magnitude.
///
/// Errors
/// ----------
/// * [`CamsError::MissingModelRange`] if the solver has no ranges for an observation.
pub fn compute_absolute_magnitudes<S>(
    solver: &S,
    observations: &mut [MeteorObservation],
) -> Result<(), CamsError>
where
    S: TrajectorySolver + ?Sized,
{
    for (i, obs) in observations.iter_mut().enumerate() {
        let ranges = solver
            .model_range(i)
            .ok_or(CamsError::MissingModelRange(i))?;

        let mut abs_mag = vec![None; obs.len()];
        for ((abs, mag), &range) in abs_mag.iter_mut().zip(obs.mag_data()).zip(ranges) {
            *abs = mag.and_then(|m| absolute_magnitude(m, range));
        }

        obs.set_abs_magnitudes(abs_mag);
    }

    Ok(())
}
