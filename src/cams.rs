//! # Cams: station context and processing entry points
//!
//! This module defines the [`Cams`](crate::cams::Cams) struct, the façade that owns the read-only
//! [`StationCatalog`](crate::stations::StationCatalog) for the lifetime of a processing run and
//! exposes the two high-level operations:
//!
//! 1. [`load_ftpdetectinfo`](crate::cams::Cams::load_ftpdetectinfo) – parse a detection file
//!    against the catalog, clock offsets included.
//! 2. [`solve_trajectory`](crate::cams::Cams::solve_trajectory) – normalize the observations of
//!    one event and hand them to a trajectory solver.
//!
//! ## Typical usage
//!
//! ```rust, no_run
//! use camino::Utf8Path;
//! use camsprep::cams::Cams;
//!
//! let cams = Cams::from_files(
//!     Utf8Path::new("CameraSites.txt"),
//!     Some(Utf8Path::new("CameraTimeOffsets.txt")),
//! )
//! .unwrap();
//!
//! let report = cams.load_ftpdetectinfo(Utf8Path::new("FTPdetectinfo.txt")).unwrap();
//! if let Some(reason) = &report.halted {
//!     eprintln!("partial load: {reason}");
//! }
//! ```
//!
//! ## See also
//! ------------
//! * [`read_ftpdetectinfo`](crate::ftpdetect::reader::read_ftpdetectinfo) – Parser behind [`Cams::load_ftpdetectinfo`].
//! * [`solve_trajectory`](crate::solver::solve_trajectory) – Normalize-then-solve pipeline.

use camino::Utf8Path;
use log::info;

use crate::{
    cams_errors::CamsError,
    ftpdetect::{read_ftpdetectinfo, DetectionReport},
    observations::ObservationSet,
    solver::{SolverFactory, SolverParams, TrajectorySolution},
    stations::{time_offsets::read_time_offsets, StationCatalog},
};

#[derive(Debug, Clone)]
pub struct Cams {
    catalog: StationCatalog,
}

impl Cams {
    pub fn new(catalog: StationCatalog) -> Self {
        Cams { catalog }
    }

    /// Construct a [`Cams`] context from the station files.
    ///
    /// Arguments
    /// -----------------
    /// * `camera_sites`: path to a `CameraSites.txt` file.
    /// * `time_offsets`: optional path to a `CameraTimeOffsets.txt` file. When given, every
    ///   record read later gets its station's clock correction, and stations missing from
    ///   the offsets file are reported as warnings.
    ///
    /// Return
    /// ----------
    /// * The context, or the first loading error.
    pub fn from_files(
        camera_sites: &Utf8Path,
        time_offsets: Option<&Utf8Path>,
    ) -> Result<Self, CamsError> {
        let mut catalog = StationCatalog::from_camera_sites(camera_sites)?;
        info!("Loaded {} camera sites from {camera_sites}", catalog.len());

        if let Some(path) = time_offsets {
            let offsets = read_time_offsets(path)?;
            info!("Loaded {} camera time offsets from {path}", offsets.len());
            catalog = catalog.with_time_offsets(&offsets);
        }

        Ok(Cams::new(catalog))
    }

    pub fn catalog(&self) -> &StationCatalog {
        &self.catalog
    }

    /// Load every meteor record of an `FTPdetectinfo` file.
    pub fn load_ftpdetectinfo(&self, path: &Utf8Path) -> Result<DetectionReport, CamsError> {
        read_ftpdetectinfo(path, &self.catalog)
    }

    /// Normalize the observations of one event and solve its trajectory.
    ///
    /// See [`solve_trajectory`](crate::solver::solve_trajectory).
    pub fn solve_trajectory<F>(
        &self,
        observations: ObservationSet,
        selector: &str,
        factory: &F,
        params: &SolverParams,
    ) -> Result<Option<TrajectorySolution>, CamsError>
    where
        F: SolverFactory + ?Sized,
    {
        crate::solver::solve_trajectory(observations, selector, factory, params)
    }
}
