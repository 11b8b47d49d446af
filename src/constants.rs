//! # Constants and type definitions for camsprep
//!
//! This module centralizes the **conversion factors**, **reference epochs** and **type
//! aliases** used throughout the crate, together with the fixed layout parameters of the
//! CAMS text products.
//!
//! ## Overview
//!
//! - Unit conversions (degrees ↔ radians, days ↔ seconds, kilometers ↔ meters)
//! - Reference epochs (J2000.0 as Julian Date and as Modified Julian Date)
//! - Core type aliases shared by the loaders, the parser and the normalizer
//! - Header sizes and sentinels of the `CameraSites`, `CameraTimeOffsets` and
//!   `FTPdetectinfo` files

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Kilometers → meters
pub const KM_TO_M: f64 = 1_000.0;

// -------------------------------------------------------------------------------------------------
// Reference epochs
// -------------------------------------------------------------------------------------------------

/// Julian Date of the J2000.0 catalog epoch (2000-01-01 12:00:00)
pub const J2000_JD: f64 = 2_451_545.0;

/// MJD epoch of J2000.0
pub const T2000: f64 = 51544.5;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2400000.5;

// -------------------------------------------------------------------------------------------------
// File layouts
// -------------------------------------------------------------------------------------------------

/// Header lines at the top of `CameraSites.txt` and `CameraTimeOffsets.txt`
pub const CATALOG_HEADER_LINES: usize = 2;

/// Header lines at the top of an `FTPdetectinfo` file
pub const FTPDETECT_HEADER_LINES: usize = 11;

/// Marker contained in every record separator of an `FTPdetectinfo` file
pub const RECORD_SEPARATOR: &str = "-----";

/// Magnitude token used by the detection software when no magnitude was measured
pub const NO_MAGNITUDE: &str = "inf";

/// Distance (m) at which absolute magnitudes are defined
pub const ABS_MAG_DISTANCE: f64 = 100_000.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in meters
pub type Meter = f64;
/// Duration in seconds
pub type Second = f64;
/// Julian Date (days)
pub type JulianDate = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
