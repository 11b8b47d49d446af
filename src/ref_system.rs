//! # Reference systems: precession and horizontal coordinates
//!
//! Frame utilities used by the observation normalizer:
//!
//! - [`precession_matrix`]: IAU 1976 precession from the mean equator and equinox of
//!   J2000.0 to the mean equator and equinox of date.
//! - [`EquatorialPrecession`]: the vectorized transform seam consumed by
//!   [`prepare_observations`](crate::observations::prepare::prepare_observations), with
//!   the default [`Iau1976Precession`] implementation.
//! - [`radec_to_altaz`]: equatorial (of date) to topocentric horizontal coordinates.
//!
//! All angles are **radians**, all epochs are **Julian Dates**.
use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::{JulianDate, Radian, DPI, J2000_JD, RADEG};
use crate::time::local_sidereal_time;

/// Principal axis of an elementary rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Construct a right-handed 3×3 rotation matrix around one of the principal axes.
///
/// The matrix represents an **active rotation** of a vector by `alpha` (radians,
/// counter-clockwise when looking from the tip of the axis toward the origin).
/// A change of basis by `alpha` is therefore `rotmt(-alpha, axis)`.
///
/// # See also
/// * [`precession_matrix`] – chains three of these rotations
pub fn rotmt(alpha: Radian, axis: Axis) -> Matrix3<f64> {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Compute the precession matrix from J2000 to the mean equator and equinox of a given epoch (IAU 1976 model).
///
/// The returned matrix `P` satisfies `x_date = P · x_J2000` for direction vectors in the
/// mean equatorial frames.
///
/// Method
/// ------
/// `P = R3(−z) · R2(θ) · R3(−ζ)` where `Rk` are changes of basis and the angles are
/// polynomials in Julian centuries `T = (jd − 2451545.0) / 36525`:
///
/// ```text
/// ζ(T)     = (0.6406161 + 0.0000839·T + 0.0000050·T²) · T  [deg]
/// θ(T)     = (0.5567530 - 0.0001185·T - 0.0000116·T²) · T  [deg]
/// z(T)     = (0.6406161 + 0.0003041·T + 0.0000051·T²) · T  [deg]
/// ```
///
/// Remarks
/// -------
/// * Valid within a few centuries of J2000.
/// * At `jd == J2000_JD` all angles vanish and `P` is the identity.
pub fn precession_matrix(jd: JulianDate) -> Matrix3<f64> {
    // Precession polynomial coefficients (in radians)
    let zed = 0.6406161 * RADEG;
    let zd = 0.6406161 * RADEG;
    let thd = 0.5567530 * RADEG;

    let zedd = 0.0000839 * RADEG;
    let zdd = 0.0003041 * RADEG;
    let thdd = -0.0001185 * RADEG;

    let zeddd = 0.0000050 * RADEG;
    let zddd = 0.0000051 * RADEG;
    let thddd = -0.0000116 * RADEG;

    let t = (jd - J2000_JD) / 36525.0;

    let zeta = ((zeddd * t + zedd) * t + zed) * t;
    let z = ((zddd * t + zdd) * t + zd) * t;
    let theta = ((thddd * t + thdd) * t + thd) * t;

    let r1 = rotmt(zeta, Axis::Z);
    let r2 = rotmt(-theta, Axis::Y);
    let r3 = rotmt(z, Axis::Z);

    r3 * r2 * r1
}

/// Unit direction vector of an equatorial position.
pub fn radec_to_cartesian(ra: Radian, dec: Radian) -> Vector3<f64> {
    let cos_dec = dec.cos();
    Vector3::new(cos_dec * ra.cos(), cos_dec * ra.sin(), dec.sin())
}

/// Convert a 3D Cartesian position vector to right ascension and declination.
///
/// Returns
/// --------
/// * Tuple `(α, δ, ρ)`:
///     - `α`: right ascension in radians, in the range [0, 2π).
///     - `δ`: declination in radians, in the range [−π/2, +π/2].
///     - `ρ`: Euclidean norm of the vector.
///
/// Remarks
/// -------
/// * If the input vector has zero norm, the result is `(0.0, 0.0, 0.0)`.
pub fn cartesian_to_radec(cartesian_position: Vector3<f64>) -> (Radian, Radian, f64) {
    let pos_norm = cartesian_position.norm();
    if pos_norm == 0. {
        return (0.0, 0.0, pos_norm);
    }

    let delta = (cartesian_position.z / pos_norm).clamp(-1.0, 1.0).asin();

    let cos_delta = delta.cos();
    if cos_delta == 0.0 {
        return (0.0, delta, pos_norm);
    }

    let alpha = cartesian_position.y.atan2(cartesian_position.x);
    let alpha = if alpha < 0.0 { alpha + DPI } else { alpha };
    (alpha, delta, pos_norm)
}

/// Vectorized equatorial precession from one epoch to another.
///
/// The normalizer only depends on this trait, so an alternative model (or a
/// test double) can be plugged in without touching the time alignment logic.
pub trait EquatorialPrecession {
    /// Precess the paired `ra`/`dec` arrays from `jd_from` to `jd_to`.
    ///
    /// Both output vectors have the length of the inputs.
    fn precess(
        &self,
        jd_from: JulianDate,
        jd_to: JulianDate,
        ra: &[Radian],
        dec: &[Radian],
    ) -> (Vec<Radian>, Vec<Radian>);
}

/// IAU 1976 precession, routed through J2000.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Iau1976Precession;

impl EquatorialPrecession for Iau1976Precession {
    fn precess(
        &self,
        jd_from: JulianDate,
        jd_to: JulianDate,
        ra: &[Radian],
        dec: &[Radian],
    ) -> (Vec<Radian>, Vec<Radian>) {
        if jd_from == jd_to {
            return (ra.to_vec(), dec.to_vec());
        }

        // x_to = P(to) · P(from)ᵀ · x_from
        let rot = precession_matrix(jd_to) * precession_matrix(jd_from).transpose();

        ra.iter()
            .zip(dec)
            .map(|(&a, &d)| {
                let (a, d, _) = cartesian_to_radec(rot * radec_to_cartesian(a, d));
                (a, d)
            })
            .unzip()
    }
}

/// Convert equatorial coordinates of date to horizontal coordinates at a site.
///
/// Arguments
/// ---------
/// * `ra`, `dec`: right ascension and declination of date (radians)
/// * `jd`: Julian Date of the observation
/// * `lat`, `lon`: geodetic latitude (+N) and longitude (+E) of the site (radians)
///
/// Returns
/// --------
/// * `(azimuth, elevation)` in radians; azimuth is measured from due North toward East,
///   in [0, 2π).
pub fn radec_to_altaz(
    ra: Radian,
    dec: Radian,
    jd: JulianDate,
    lat: Radian,
    lon: Radian,
) -> (Radian, Radian) {
    let ha = local_sidereal_time(jd, lon) - ra;

    let (sin_dec, cos_dec) = dec.sin_cos();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_ha, cos_ha) = ha.sin_cos();

    let sin_elev = (sin_dec * sin_lat + cos_dec * cos_lat * cos_ha).clamp(-1.0, 1.0);
    let elev = sin_elev.asin();

    let azim = (-cos_dec * sin_ha).atan2(sin_dec * cos_lat - cos_dec * sin_lat * cos_ha);

    (azim.rem_euclid(DPI), elev)
}

/// Vectorized form of [`radec_to_altaz`] sharing one epoch and one site.
pub fn radec_to_altaz_vect(
    ra: &[Radian],
    dec: &[Radian],
    jd: JulianDate,
    lat: Radian,
    lon: Radian,
) -> (Vec<Radian>, Vec<Radian>) {
    ra.iter()
        .zip(dec)
        .map(|(&a, &d)| radec_to_altaz(a, d, jd, lat, lon))
        .unzip()
}

#[cfg(test)]
mod ref_system_test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_precession_identity_at_j2000() {
        let p = precession_matrix(J2000_JD);
        assert_abs_diff_eq!(p, Matrix3::identity(), epsilon = 1e-15);

        let ra = vec![0.0, 1.2, 3.5, 6.0];
        let dec = vec![0.0, -0.4, 0.9, 1.3];
        let (ra_p, dec_p) = Iau1976Precession.precess(J2000_JD, J2000_JD, &ra, &dec);
        assert_eq!(ra_p, ra);
        assert_eq!(dec_p, dec);
    }

    #[test]
    fn test_precession_is_rotation() {
        let p = precession_matrix(2469807.5);
        assert_abs_diff_eq!(p * p.transpose(), Matrix3::identity(), epsilon = 1e-14);
        assert_abs_diff_eq!(p.determinant(), 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_precession_fifty_years() {
        // J2000 -> J2050, a point on the equinox drifts by ζ + z in RA and θ in Dec
        let jd_2050 = J2000_JD + 50.0 * 365.25;
        let (ra, dec) = Iau1976Precession.precess(J2000_JD, jd_2050, &[0.0], &[0.0]);

        assert_abs_diff_eq!(ra[0].to_degrees(), 0.6406, epsilon = 2e-3);
        assert_abs_diff_eq!(dec[0].to_degrees(), 0.2784, epsilon = 1e-3);
    }

    #[test]
    fn test_precession_round_trip() {
        let jd = 2458283.6;
        let ra = vec![0.3, 2.1, 5.9];
        let dec = vec![0.1, -1.0, 0.7];

        let (ra_d, dec_d) = Iau1976Precession.precess(J2000_JD, jd, &ra, &dec);
        let (ra_b, dec_b) = Iau1976Precession.precess(jd, J2000_JD, &ra_d, &dec_d);

        for i in 0..ra.len() {
            assert_abs_diff_eq!(ra_b[i], ra[i], epsilon = 1e-12);
            assert_abs_diff_eq!(dec_b[i], dec[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_cartesian_round_trip() {
        let (ra, dec, norm) = cartesian_to_radec(radec_to_cartesian(4.0, -0.3));
        assert_abs_diff_eq!(ra, 4.0, epsilon = 1e-14);
        assert_abs_diff_eq!(dec, -0.3, epsilon = 1e-14);
        assert_abs_diff_eq!(norm, 1.0, epsilon = 1e-14);

        assert_eq!(cartesian_to_radec(Vector3::zeros()), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_altaz_zenith_and_meridian() {
        let jd = 2458283.6;
        let lat = 43.1_f64.to_radians();
        let lon = -81.3_f64.to_radians();
        let lst = local_sidereal_time(jd, lon);

        // Object on the local meridian at dec == lat is at the zenith
        let (_, elev) = radec_to_altaz(lst, lat, jd, lat, lon);
        assert_abs_diff_eq!(elev, FRAC_PI_2, epsilon = 1e-9);

        // Meridian transit south of the zenith has azimuth 180°
        let (azim, elev) = radec_to_altaz(lst, 0.0, jd, lat, lon);
        assert_abs_diff_eq!(azim, std::f64::consts::PI, epsilon = 1e-9);
        assert_abs_diff_eq!(elev, FRAC_PI_2 - lat, epsilon = 1e-9);

        // Six hours before transit the celestial equator point rises due East
        let (azim, elev) = radec_to_altaz(lst + FRAC_PI_2, 0.0, jd, lat, lon);
        assert_abs_diff_eq!(azim, FRAC_PI_2, epsilon = 1e-9);
        assert_abs_diff_eq!(elev, 0.0, epsilon = 1e-9);
    }
}
