//! # camsprep
//!
//! Ingestion of CAMS-format multi-station meteor detections and their preparation for
//! trajectory solvers.
//!
//! Pipeline, leaves first:
//!
//! 1. [`stations`] – camera sites and clock offsets.
//! 2. [`ftpdetect`] – `FTPdetectinfo` records into [`observations::MeteorObservation`]s.
//! 3. [`observations::prepare`] – common reference epoch and precession to the epoch of date.
//! 4. [`solver`] – hand-off to an external trajectory solver, then [`photometry`].
//!
//! [`cams::Cams`] wires the stages together around one station catalog.

pub mod cams;
pub mod cams_errors;
pub mod constants;
pub mod ftpdetect;
pub mod observations;
pub mod photometry;
pub mod ref_system;
pub mod solver;
pub mod stations;
pub mod time;

pub use cams::Cams;
pub use cams_errors::CamsError;
pub use ftpdetect::DetectionReport;
pub use observations::{
    prepare::PreparedObservations, MeteorObservation, ObservationBuilder, ObservationSet,
};
pub use stations::{StationCatalog, StationId, StationRecord, TimeOffsets};
