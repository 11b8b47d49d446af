//! # Trajectory solver configuration
//!
//! [`SolverParams`] gathers the options forwarded to a trajectory solver when it is built
//! by a [`SolverFactory`](crate::solver::SolverFactory). Use [`SolverParams::builder`] to
//! override the defaults; [`SolverParamsBuilder::build`] validates the result.
//!
//! Options a given solver does not know about can be carried in
//! [`SolverParams::extra`] as free-form `key = value` pairs.
use std::cmp::Ordering::{Equal, Greater};
use std::collections::BTreeMap;
use std::fmt;

use camino::Utf8PathBuf;

use crate::{cams_errors::CamsError, constants::Second};

/// Measurement type fed to the solvers: azimuth (+E of due N) and elevation.
pub const MEASTYPE_AZIM_ELEV: u8 = 2;

/// Exponential deceleration model of the fixed-velocity-model solver.
pub const VELOCITY_MODEL_EXPONENTIAL: u8 = 3;

/// Configuration of a trajectory solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverParams {
    /// Directory where the solver writes its results.
    pub output_dir: Utf8PathBuf,
    /// Estimate uncertainties with Monte Carlo runs.
    pub monte_carlo: bool,
    /// Number of Monte Carlo runs.
    pub mc_runs: usize,
    /// Standard deviation of the measurement noise added in Monte Carlo runs, in units of
    /// the measured scatter.
    pub mc_noise_std: f64,
    /// Maximum time offset between stations the solver may fit, in seconds.
    pub max_toffset: Option<Second>,
    pub gravity_correction: bool,
    pub show_plots: bool,
    pub save_results: bool,
    /// Velocity model of the fixed-velocity-model solver (0 constant, 1 linear,
    /// 2 quadratic, 3 exponential).
    pub velocity_model: u8,
    /// Measurement type declared to the solver.
    pub meastype: u8,
    /// Solver specific options.
    pub extra: BTreeMap<String, String>,
}

impl SolverParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`SolverParamsBuilder`] initialized with the default values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use camsprep::solver::SolverParams;
    ///
    /// let params = SolverParams::builder()
    ///     .output_dir("results")
    ///     .mc_runs(50)
    ///     .show_plots(false)
    ///     .extra("filter_picks", "true")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(params.mc_runs, 50);
    /// ```
    pub fn builder() -> SolverParamsBuilder {
        SolverParamsBuilder::new()
    }

    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }
}

impl Default for SolverParams {
    fn default() -> Self {
        SolverParams {
            output_dir: Utf8PathBuf::from("."),
            monte_carlo: true,
            mc_runs: 10,
            mc_noise_std: 1.0,
            max_toffset: None,
            gravity_correction: true,
            show_plots: false,
            save_results: true,
            velocity_model: VELOCITY_MODEL_EXPONENTIAL,
            meastype: MEASTYPE_AZIM_ELEV,
            extra: BTreeMap::new(),
        }
    }
}

/// Builder for [`SolverParams`], with validation.
#[derive(Debug, Clone, Default)]
pub struct SolverParamsBuilder {
    params: SolverParams,
}

impl SolverParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_dir(mut self, v: impl Into<Utf8PathBuf>) -> Self {
        self.params.output_dir = v.into();
        self
    }
    pub fn monte_carlo(mut self, v: bool) -> Self {
        self.params.monte_carlo = v;
        self
    }
    pub fn mc_runs(mut self, v: usize) -> Self {
        self.params.mc_runs = v;
        self
    }
    pub fn mc_noise_std(mut self, v: f64) -> Self {
        self.params.mc_noise_std = v;
        self
    }
    pub fn max_toffset(mut self, v: Second) -> Self {
        self.params.max_toffset = Some(v);
        self
    }
    pub fn gravity_correction(mut self, v: bool) -> Self {
        self.params.gravity_correction = v;
        self
    }
    pub fn show_plots(mut self, v: bool) -> Self {
        self.params.show_plots = v;
        self
    }
    pub fn save_results(mut self, v: bool) -> Self {
        self.params.save_results = v;
        self
    }
    pub fn velocity_model(mut self, v: u8) -> Self {
        self.params.velocity_model = v;
        self
    }
    pub fn meastype(mut self, v: u8) -> Self {
        self.params.meastype = v;
        self
    }
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.extra.insert(key.into(), value.into());
        self
    }

    /// Return true iff x > 0.0 and comparable (i.e., not NaN).
    fn gt0(x: f64) -> bool {
        x.partial_cmp(&0.0) == Some(Greater)
    }

    /// Return true iff x >= 0.0 and comparable (i.e., not NaN).
    fn ge0(x: f64) -> bool {
        matches!(x.partial_cmp(&0.0), Some(Greater) | Some(Equal))
    }

    /// Finalize the builder.
    ///
    /// Validation rules
    /// -----------------
    /// * `mc_noise_std ≥ 0.0`.
    /// * `mc_runs ≥ 1` when `monte_carlo` is enabled.
    /// * `max_toffset > 0.0` when set.
    /// * `velocity_model` in `0..=3`.
    /// * `meastype` is [`MEASTYPE_AZIM_ELEV`], the only measurement type the adapter feeds.
    ///
    /// Returns
    /// -----------------
    /// * `Err(CamsError::InvalidSolverParameter)` naming the first rule that fails.
    pub fn build(self) -> Result<SolverParams, CamsError> {
        let p = &self.params;

        if !Self::ge0(p.mc_noise_std) {
            return Err(CamsError::InvalidSolverParameter(
                "mc_noise_std must be non-negative".into(),
            ));
        }
        if p.monte_carlo && p.mc_runs == 0 {
            return Err(CamsError::InvalidSolverParameter(
                "mc_runs must be >= 1 when monte_carlo is enabled".into(),
            ));
        }
        if let Some(max_toffset) = p.max_toffset {
            if !Self::gt0(max_toffset) {
                return Err(CamsError::InvalidSolverParameter(
                    "max_toffset must be > 0".into(),
                ));
            }
        }
        if p.velocity_model > VELOCITY_MODEL_EXPONENTIAL {
            return Err(CamsError::InvalidSolverParameter(
                "velocity_model must be in 0..=3".into(),
            ));
        }
        if p.meastype != MEASTYPE_AZIM_ELEV {
            return Err(CamsError::InvalidSolverParameter(format!(
                "meastype must be {MEASTYPE_AZIM_ELEV} (azimuth/elevation)"
            )));
        }

        Ok(self.params)
    }
}

impl fmt::Display for SolverParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Trajectory solver parameters")?;
        writeln!(f, "----------------------------")?;
        writeln!(f, "  output_dir         = {}", self.output_dir)?;
        writeln!(f, "  monte_carlo        = {}", self.monte_carlo)?;
        writeln!(f, "  mc_runs            = {}", self.mc_runs)?;
        writeln!(f, "  mc_noise_std       = {:.3}", self.mc_noise_std)?;
        match self.max_toffset {
            Some(t) => writeln!(f, "  max_toffset        = {t:.3} s")?,
            None => writeln!(f, "  max_toffset        = solver default")?,
        }
        writeln!(f, "  gravity_correction = {}", self.gravity_correction)?;
        writeln!(f, "  show_plots         = {}", self.show_plots)?;
        writeln!(f, "  save_results       = {}", self.save_results)?;
        writeln!(f, "  velocity_model     = {}", self.velocity_model)?;
        write!(f, "  meastype           = {}", self.meastype)?;
        for (key, value) in &self.extra {
            write!(f, "\n  {key:<18} = {value}")?;
        }
        Ok(())
    }
}
