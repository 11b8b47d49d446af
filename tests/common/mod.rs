#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use camino::Utf8Path;
use camsprep::constants::{JulianDate, Meter};
use camsprep::solver::{SolverFactory, SolverParams, StationTrack, TrajectorySolver};
use camsprep::{CamsError, MeteorObservation, StationId};

pub const CAMERA_SITES: &str = "tests/data/CameraSites.txt";
pub const CAMERA_TIME_OFFSETS: &str = "tests/data/CameraTimeOffsets.txt";
pub const FTPDETECT: &str = "tests/data/FTPdetectinfo_20180614.txt";
pub const FTPDETECT_UNKNOWN_STATION: &str = "tests/data/FTPdetectinfo_unknown_station.txt";

/// Route the crate's `log` records to stderr, honoring `RUST_LOG`.
pub fn init_logger() {
    let _ = pretty_env_logger::try_init();
}

pub fn data(path: &str) -> &Utf8Path {
    Utf8Path::new(path)
}

pub fn assert_observation_close(actual: &MeteorObservation, expected: &MeteorObservation, epsilon: f64) {
    assert_eq!(actual.station_id(), expected.station_id());
    assert_eq!(actual.len(), expected.len());
    assert_relative_eq!(actual.jdt_ref(), expected.jdt_ref(), epsilon = epsilon);
    for i in 0..actual.len() {
        assert_relative_eq!(actual.time_data()[i], expected.time_data()[i], epsilon = epsilon);
        assert_relative_eq!(actual.ra_data()[i], expected.ra_data()[i], epsilon = epsilon);
        assert_relative_eq!(actual.dec_data()[i], expected.dec_data()[i], epsilon = epsilon);
        assert_relative_eq!(actual.azim_data()[i], expected.azim_data()[i], epsilon = epsilon);
        assert_relative_eq!(actual.elev_data()[i], expected.elev_data()[i], epsilon = epsilon);
    }
}

/// Everything a [`MockSolver`] was asked to do.
#[derive(Debug, Default)]
pub struct SolverLog {
    pub geometric: Vec<JulianDate>,
    pub fixed_velocity: Vec<(usize, JulianDate)>,
    pub tracks: Vec<Track>,
    pub runs: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub station_id: Option<StationId>,
    pub time: Vec<f64>,
    pub azim: Vec<f64>,
    pub elev: Vec<f64>,
    pub latitude: f64,
    pub longitude: f64,
    pub height: f64,
}

/// Solver placing every point at a constant range.
pub struct MockSolver {
    log: Rc<RefCell<SolverLog>>,
    range: Meter,
    ranges: Vec<Vec<Meter>>,
    solved: bool,
    fail_run: bool,
}

impl TrajectorySolver for MockSolver {
    fn infill_trajectory(&mut self, track: StationTrack<'_>) -> Result<(), CamsError> {
        self.log.borrow_mut().tracks.push(Track {
            station_id: track.station_id.cloned(),
            time: track.time.to_vec(),
            azim: track.azim.to_vec(),
            elev: track.elev.to_vec(),
            latitude: track.latitude,
            longitude: track.longitude,
            height: track.height,
        });
        self.ranges.push(vec![self.range; track.time.len()]);
        Ok(())
    }

    fn run(&mut self) -> Result<(), CamsError> {
        self.log.borrow_mut().runs += 1;
        if self.fail_run {
            return Err(CamsError::SolverFailure("no convergence".into()));
        }
        self.solved = true;
        Ok(())
    }

    fn model_range(&self, observation_index: usize) -> Option<&[Meter]> {
        if !self.solved {
            return None;
        }
        self.ranges.get(observation_index).map(Vec::as_slice)
    }

    fn v_avg(&self) -> Option<f64> {
        self.solved.then_some(25_000.0)
    }
}

pub struct MockFactory {
    pub log: Rc<RefCell<SolverLog>>,
    pub range: Meter,
    pub fail_run: bool,
}

impl MockFactory {
    pub fn new(range: Meter) -> Self {
        MockFactory {
            log: Rc::default(),
            range,
            fail_run: false,
        }
    }

    pub fn failing() -> Self {
        MockFactory {
            fail_run: true,
            ..Self::new(100_000.0)
        }
    }

    fn solver(&self) -> Box<dyn TrajectorySolver> {
        Box::new(MockSolver {
            log: Rc::clone(&self.log),
            range: self.range,
            ranges: Vec::new(),
            solved: false,
            fail_run: self.fail_run,
        })
    }
}

impl SolverFactory for MockFactory {
    fn geometric(
        &self,
        jdt_ref: JulianDate,
        _params: &SolverParams,
    ) -> Result<Box<dyn TrajectorySolver>, CamsError> {
        self.log.borrow_mut().geometric.push(jdt_ref);
        Ok(self.solver())
    }

    fn fixed_velocity(
        &self,
        n_stations: usize,
        jdt_ref: JulianDate,
        _params: &SolverParams,
    ) -> Result<Box<dyn TrajectorySolver>, CamsError> {
        self.log
            .borrow_mut()
            .fixed_velocity
            .push((n_stations, jdt_ref));
        Ok(self.solver())
    }
}
