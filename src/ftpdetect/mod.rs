//! # FTPdetectinfo detection files
//!
//! An `FTPdetectinfo` file lists, for one night and one or more cameras, every meteor
//! detected by the capture software. After an 11-line header the file is a sequence of
//! blocks:
//!
//! ```text
//! -------------------------------------------------------
//! FF453_20180614_023512_123_0000256.fits          <- FF bin name, gives the reference time
//! Recalibrated with RMS on: 2018-06-14 10:00:00   <- calibration line, ignored
//! 000453 0001 0032 25.00 000.0 000.0 ...          <- meteor header: station id, fps
//! 101.0 512.3 301.2 250.1234 +30.4567 10.1234 40.5678 1200 2.35
//! ...                                             <- one line per frame
//! ```
//!
//! ## Modules
//!
//! * [`bin_name`](crate::ftpdetect::bin_name) – Decoding of the FF bin file names into a Julian Date.
//! * [`reader`](crate::ftpdetect::reader) – The record state machine and the file loader.

pub mod bin_name;
pub mod reader;

pub use reader::{parse_ftpdetectinfo, read_ftpdetectinfo, DetectionReport};
