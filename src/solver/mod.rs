//! # Trajectory solver adapter
//!
//! Maps normalized observations onto the contract of an external multi-station
//! trajectory solver. The solvers themselves live outside this crate; they are reached
//! through two traits:
//!
//! - [`SolverFactory`] builds a solver for one event, either the geometric solver with
//!   Monte Carlo uncertainties or the fixed-velocity-model solver.
//! - [`TrajectorySolver`] receives one [`StationTrack`] per observation, runs, and exposes
//!   the post-solve quantities the photometry needs.
//!
//! Solvers are selected by name, see [`SolverKind`].
//!
//! ## See also
//! ------------
//! * [`prepare_observations`](crate::observations::prepare::prepare_observations) – Builds the input of [`run_solver`].
//! * [`compute_absolute_magnitudes`](crate::photometry::compute_absolute_magnitudes) – Post-solve photometry.

pub mod params;

use std::fmt;
use std::str::FromStr;

use log::{error, info};

pub use params::{SolverParams, SolverParamsBuilder};

use crate::{
    cams_errors::CamsError,
    constants::{JulianDate, Meter, Radian, Second},
    observations::{
        prepare::{prepare_observations, PreparedObservations},
        MeteorObservation, ObservationSet,
    },
    photometry::compute_absolute_magnitudes,
    stations::StationId,
};

/// The trajectory solvers an event can be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverKind {
    /// Geometric intersecting-lines-of-sight solver with Monte Carlo uncertainties.
    GeometricMonteCarlo,
    /// Solver fitting a fixed velocity model to all stations at once.
    FixedVelocityModel,
}

impl SolverKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolverKind::GeometricMonteCarlo => "geometric-montecarlo",
            SolverKind::FixedVelocityModel => "fixed-velocity-model",
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolverKind {
    type Err = CamsError;

    /// Accepts the canonical names and the historical aliases `original` and `gural`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "geometric-montecarlo" | "original" => Ok(SolverKind::GeometricMonteCarlo),
            "fixed-velocity-model" | "gural" => Ok(SolverKind::FixedVelocityModel),
            other => Err(CamsError::UnknownSolver(other.to_string())),
        }
    }
}

/// Measurements of one station, as handed to [`TrajectorySolver::infill_trajectory`].
///
/// Angles are azimuth (+E of due N) and elevation of date, times are seconds from the
/// shared reference epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationTrack<'a> {
    pub azim: &'a [Radian],
    pub elev: &'a [Radian],
    pub time: &'a [Second],
    pub latitude: Radian,
    pub longitude: Radian,
    pub height: Meter,
    /// Only given to the geometric solver.
    pub station_id: Option<&'a StationId>,
}

impl<'a> StationTrack<'a> {
    fn from_observation(obs: &'a MeteorObservation, kind: SolverKind) -> Self {
        StationTrack {
            azim: obs.azim_data(),
            elev: obs.elev_data(),
            time: obs.time_data(),
            latitude: obs.latitude(),
            longitude: obs.longitude(),
            height: obs.height(),
            station_id: match kind {
                SolverKind::GeometricMonteCarlo => Some(obs.station_id()),
                SolverKind::FixedVelocityModel => None,
            },
        }
    }
}

/// A trajectory solver for a single event.
pub trait TrajectorySolver {
    /// Add the measurements of one station. Called once per observation, in order.
    fn infill_trajectory(&mut self, track: StationTrack<'_>) -> Result<(), CamsError>;

    /// Solve the trajectory. Blocks until the solver is done.
    fn run(&mut self) -> Result<(), CamsError>;

    /// Modeled range from the station to the meteor, per point, for the observation at
    /// `observation_index` (infill order). `None` before [`run`](Self::run).
    fn model_range(&self, observation_index: usize) -> Option<&[Meter]>;

    /// Average velocity in m/s, once solved.
    fn v_avg(&self) -> Option<f64>;
}

/// Builds the solvers named by [`SolverKind`].
pub trait SolverFactory {
    fn geometric(
        &self,
        jdt_ref: JulianDate,
        params: &SolverParams,
    ) -> Result<Box<dyn TrajectorySolver>, CamsError>;

    fn fixed_velocity(
        &self,
        n_stations: usize,
        jdt_ref: JulianDate,
        params: &SolverParams,
    ) -> Result<Box<dyn TrajectorySolver>, CamsError>;
}

/// Feed prepared observations to the solver named by `selector` and run it.
///
/// Arguments
/// -----------------
/// * `prepared` – Observations sharing one reference epoch.
/// * `selector` – Solver name, see [`SolverKind`].
/// * `factory` – Builds the selected solver.
/// * `params` – Solver configuration.
///
/// Return
/// ----------
/// * `Ok(None)` when `selector` names no known solver; the problem is logged.
/// * `Ok(Some(solver))` with the solved trajectory otherwise.
///
/// Errors
/// ----------
/// * Any error raised by the factory or the solver.
pub fn run_solver<F>(
    prepared: &PreparedObservations,
    selector: &str,
    factory: &F,
    params: &SolverParams,
) -> Result<Option<Box<dyn TrajectorySolver>>, CamsError>
where
    F: SolverFactory + ?Sized,
{
    let kind = match selector.parse::<SolverKind>() {
        Ok(kind) => kind,
        Err(err) => {
            error!("{err}");
            return Ok(None);
        }
    };

    let mut solver = match kind {
        SolverKind::GeometricMonteCarlo => factory.geometric(prepared.jdt_ref, params)?,
        SolverKind::FixedVelocityModel => {
            factory.fixed_velocity(prepared.len(), prepared.jdt_ref, params)?
        }
    };

    for obs in prepared.iter() {
        solver.infill_trajectory(StationTrack::from_observation(obs, kind))?;
    }

    info!(
        "Running the {kind} solver on {} stations",
        prepared.len()
    );
    solver.run()?;

    Ok(Some(solver))
}

/// A solved event: the observations as fed to the solver, and the solver itself.
pub struct TrajectorySolution {
    pub prepared: PreparedObservations,
    pub solver: Box<dyn TrajectorySolver>,
}

impl TrajectorySolution {
    /// Fill the absolute magnitudes of the observations from the solved ranges.
    pub fn compute_absolute_magnitudes(&mut self) -> Result<(), CamsError> {
        compute_absolute_magnitudes(self.solver.as_ref(), &mut self.prepared.observations)
    }
}

impl fmt::Debug for TrajectorySolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrajectorySolution")
            .field("prepared", &self.prepared)
            .field("v_avg", &self.solver.v_avg())
            .finish()
    }
}

/// Normalize the observations of one event and solve its trajectory.
///
/// Every prepared observation is logged before the solver is built.
///
/// Return
/// ----------
/// * `Ok(None)` for an empty input or an unknown `selector`.
pub fn solve_trajectory<F>(
    observations: ObservationSet,
    selector: &str,
    factory: &F,
    params: &SolverParams,
) -> Result<Option<TrajectorySolution>, CamsError>
where
    F: SolverFactory + ?Sized,
{
    let Some(prepared) = prepare_observations(observations) else {
        return Ok(None);
    };

    for obs in prepared.iter() {
        info!("\n{obs}");
    }

    Ok(run_solver(&prepared, selector, factory, params)?
        .map(|solver| TrajectorySolution { prepared, solver }))
}
