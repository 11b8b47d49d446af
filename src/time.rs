use hifitime::{Duration, Epoch};

use crate::{
    cams_errors::CamsError,
    constants::{JulianDate, Radian, DPI, JDTOMJD, MJD, T2000},
};

/// Transformation from UTC calendar fields to a Julian Date.
///
/// This is the reference-time conversion used for the FF bin names of the detection
/// files: the calendar fields are read in UTC and the milliseconds are added as a
/// duration, so values above 999 roll over into the next second instead of failing.
///
/// Arguments
/// ---------
/// * `year`, `month`, `day`: calendar date
/// * `hour`, `minute`, `second`: time of day
/// * `millisecond`: milliseconds past `second`
///
/// Return
/// ------
/// * the Julian Date (UTC days) of the instant, or [`CamsError::InvalidTimestamp`] when
///   the calendar fields do not describe a valid date
pub fn calendar_to_jd(
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    millisecond: u32,
) -> Result<JulianDate, CamsError> {
    let epoch = Epoch::maybe_from_gregorian_utc(year, month, day, hour, minute, second, 0)
        .map_err(|e| {
            CamsError::InvalidTimestamp(format!(
                "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}: {e}"
            ))
        })?;

    let epoch = epoch + Duration::from_milliseconds(millisecond as f64);
    Ok(epoch.to_jde_utc_days())
}

/// Transformation from modified julian date (MJD) in julian date (JD)
pub fn mjd_to_jd(mjd: MJD) -> JulianDate {
    mjd + JDTOMJD
}

/// Transformation from julian date (JD) in modified julian date (MJD)
pub fn jd_to_mjd(jd: JulianDate) -> MJD {
    jd - JDTOMJD
}

/// Render a Julian Date as an ISO-8601 UTC timestamp.
pub fn iso_utc_from_jd(jd: JulianDate) -> String {
    format!("{}", Epoch::from_jde_utc(jd))
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date (UT1 time scale).
///
/// This function implements the IAU 1982/2000 polynomial formula
/// for the mean sidereal time at 0h UT1, plus the fractional-day
/// correction term due to Earth's rotation rate.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, UT1 time scale)
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
///
/// # Details
/// The GMST is computed in two steps:
/// 1. Use a cubic polynomial (coefficients C0–C3) to get GMST at 0h UT1
///    in seconds for the given date.
/// 2. Add the contribution of Earth's rotation during the fractional day
///    using the factor `RAP`, which converts solar days to sidereal days.
///
/// # References
/// * IAU 1982, IERS Conventions 1996/2000.
/// * Explanatory Supplement to the Astronomical Almanac (1992).
pub fn gmst(tjm: MJD) -> Radian {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    let itjm = tjm.floor();
    let t = (itjm - T2000) / 36525.0;

    let mut gmst0 = ((C3 * t + C2) * t + C1) * t + C0;
    gmst0 *= DPI / 86400.0;

    // tjm.fract() is the elapsed fraction of the solar day
    let h = tjm.fract() * DPI;
    let gmst = gmst0 + h * RAP;

    gmst.rem_euclid(DPI)
}

/// Local mean sidereal time (radians, [0, 2π)) of a site at a given Julian Date.
///
/// UT1 is approximated by UTC, which is well below the angular resolution of the
/// video cameras producing the detections.
///
/// Arguments
/// ---------
/// * `jd`: Julian Date (UTC)
/// * `longitude`: geodetic longitude of the site, radians, +E
pub fn local_sidereal_time(jd: JulianDate, longitude: Radian) -> Radian {
    (gmst(jd_to_mjd(jd)) + longitude).rem_euclid(DPI)
}
