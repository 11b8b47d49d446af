use approx::assert_abs_diff_eq;
use camsprep::photometry::compute_absolute_magnitudes;
use camsprep::solver::{run_solver, SolverFactory, SolverParams};
use camsprep::observations::prepare::prepare_observations;
use camsprep::{Cams, CamsError, MeteorObservation, StationId};

mod common;
use common::{data, MockFactory, CAMERA_SITES, CAMERA_TIME_OFFSETS, FTPDETECT};

fn setup() -> (Cams, Vec<MeteorObservation>) {
    common::init_logger();
    let cams = Cams::from_files(data(CAMERA_SITES), Some(data(CAMERA_TIME_OFFSETS))).unwrap();
    let observations = cams
        .load_ftpdetectinfo(data(FTPDETECT))
        .unwrap()
        .into_observations();
    (cams, observations)
}

#[test]
fn test_geometric_solver() {
    let (cams, observations) = setup();
    let factory = MockFactory::new(100_000.0);
    let params = SolverParams::builder()
        .output_dir("target/trajectories")
        .mc_runs(5)
        .build()
        .unwrap();

    let solution = cams
        .solve_trajectory(observations, "geometric-montecarlo", &factory, &params)
        .unwrap()
        .unwrap();

    let log = factory.log.borrow();
    assert_eq!(log.geometric, vec![solution.prepared.jdt_ref]);
    assert!(log.fixed_velocity.is_empty());
    assert_eq!(log.runs, 1);
    assert_eq!(log.tracks.len(), 3);

    let ids: Vec<_> = log.tracks.iter().map(|t| t.station_id.clone()).collect();
    assert_eq!(
        ids,
        vec![
            Some(StationId::new("453")),
            Some(StationId::new("454")),
            Some(StationId::new("CA0001"))
        ]
    );

    for (track, obs) in log.tracks.iter().zip(solution.prepared.iter()) {
        assert_eq!(track.time, obs.time_data());
        assert_eq!(track.azim, obs.azim_data());
        assert_eq!(track.elev, obs.elev_data());
        assert_eq!(track.latitude, obs.latitude());
        assert_eq!(track.longitude, obs.longitude());
        assert_eq!(track.height, obs.height());
    }
    assert_eq!(solution.solver.v_avg(), Some(25_000.0));
}

#[test]
fn test_fixed_velocity_solver() {
    let (cams, observations) = setup();
    let factory = MockFactory::new(100_000.0);

    let solution = cams
        .solve_trajectory(observations, "gural", &factory, &SolverParams::default())
        .unwrap()
        .unwrap();

    let log = factory.log.borrow();
    assert!(log.geometric.is_empty());
    assert_eq!(log.fixed_velocity, vec![(3, solution.prepared.jdt_ref)]);
    assert!(log.tracks.iter().all(|t| t.station_id.is_none()));
}

#[test]
fn test_unknown_solver_selector() {
    let (cams, observations) = setup();
    let factory = MockFactory::new(100_000.0);

    let result = cams.solve_trajectory(observations, "milig", &factory, &SolverParams::default());
    assert!(matches!(result, Ok(None)));

    let log = factory.log.borrow();
    assert!(log.geometric.is_empty() && log.fixed_velocity.is_empty());
    assert_eq!(log.runs, 0);
}

#[test]
fn test_solver_failure_propagates() {
    let (_, observations) = setup();
    let prepared = prepare_observations(observations).unwrap();
    let factory = MockFactory::failing();

    let result = run_solver(&prepared, "original", &factory, &SolverParams::default());
    assert!(matches!(result, Err(CamsError::SolverFailure(_))));
}

#[test]
fn test_absolute_magnitudes_after_solve() {
    let (cams, observations) = setup();
    let factory = MockFactory::new(200_000.0);

    let mut solution = cams
        .solve_trajectory(observations, "original", &factory, &SolverParams::default())
        .unwrap()
        .unwrap();
    solution.compute_absolute_magnitudes().unwrap();

    let correction = 5.0 * 0.5_f64.log10();
    for obs in solution.prepared.iter() {
        let abs_mag = obs.abs_mag_data().unwrap();
        assert_eq!(abs_mag.len(), obs.len());
        for (abs, mag) in abs_mag.iter().zip(obs.mag_data()) {
            match (abs, mag) {
                (Some(abs), Some(mag)) => assert_abs_diff_eq!(*abs, mag + correction, epsilon = 1e-12),
                (None, None) => {}
                other => panic!("magnitude presence mismatch: {other:?}"),
            }
        }
    }
    assert!(solution.prepared.observations[0].to_string().contains("Abs mag"));
}

#[test]
fn test_absolute_magnitudes_before_solve() {
    let (_, observations) = setup();
    let mut prepared = prepare_observations(observations).unwrap();
    let factory = MockFactory::new(100_000.0);
    let solver = factory
        .geometric(prepared.jdt_ref, &SolverParams::default())
        .unwrap();

    assert_eq!(
        compute_absolute_magnitudes(solver.as_ref(), &mut prepared.observations),
        Err(CamsError::MissingModelRange(0))
    );
}
