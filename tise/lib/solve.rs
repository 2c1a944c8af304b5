//! Functions to compute bound-state solutions to the one-dimensional,
//! time-independent Schrödinger equation (TISE) for sampled potentials.
//!
//! The full pipeline is
//! ```text
//! samples ─interp→ Potential ─discretize→ Tridiagonal ─eigh→ Spectrum ─→ Observables
//! ```
//! and is driven by [`solve`], which either returns a complete
//! [`ResultBundle`] or an error; nothing is returned from a partially
//! completed solve.

use std::cmp;
use ndarray as nd;
use crate::{
    error::{ ConfigError, SolveError },
    eigen::{ self, Select },
    hamiltonian,
    interp::Method,
    observables::{ self, Observables },
    potential::Potential,
};

pub type SolveResult<T> = Result<T, SolveError>;

/// Complete description of a bound-state problem.
///
/// State indices are one-based, with state 1 the ground state.
#[derive(Clone, Debug)]
pub struct ProblemSpec {
    /// Particle mass.
    pub mass: f64,
    /// Left edge of the coordinate grid.
    pub xmin: f64,
    /// Right edge of the coordinate grid (inclusive).
    pub xmax: f64,
    /// Number of grid points.
    pub npoint: usize,
    /// First state to report.
    pub first_state: usize,
    /// Last state to report (inclusive).
    pub last_state: usize,
    /// Method used to resample the potential onto the grid.
    pub method: Method,
    /// Coordinates of the potential samples; strictly increasing.
    pub data_x: nd::Array1<f64>,
    /// Potential samples.
    pub data_v: nd::Array1<f64>,
}

impl ProblemSpec {
    /// Check all parameters for consistency.
    ///
    /// This performs no numerical work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_mass(self.mass)?;
        ConfigError::check_domain(self.xmin, self.xmax)?;
        ConfigError::check_npoint(self.npoint)?;
        ConfigError::check_states(self.first_state, self.last_state, self.npoint)?;
        ConfigError::check_samples(&self.data_x, &self.data_v)?;
        Ok(())
    }

    /// Get the "linspace-style" grid arguments (start, inclusive end, and an
    /// array length).
    pub fn xargs(&self) -> (f64, f64, usize) {
        (self.xmin, self.xmax, self.npoint)
    }

    /// Get the number of requested states.
    pub fn nstates(&self) -> usize {
        (self.last_state + 1).saturating_sub(self.first_state)
    }

    /// Get the requested states as a zero-based eigenpair selection.
    pub fn select(&self) -> Select {
        Select::Index(self.first_state - 1, self.last_state - 1)
    }

    /// Return `true` if the potential samples cover the whole grid.
    pub fn samples_cover_domain(&self) -> bool {
        let n = self.data_x.len();
        n > 0 && self.data_x[0] <= self.xmin && self.data_x[n - 1] >= self.xmax
    }
}

/// A single solution to the TISE.
///
/// This struct is usually only returned by a solver function; you probably
/// won't ever instantiate it yourself. The wavefunction and observables are
/// missing when only energies were computed.
#[derive(Clone, Debug)]
pub struct Solution {
    /// State index (one-based)
    pub n: usize,
    /// Energy
    pub e: f64,
    /// Wavefunction, with unit discrete norm
    pub wf: Option<nd::Array1<f64>>,
    /// Position statistics
    pub obs: Option<Observables>,
}

impl Solution {
    /// Compare two `Solution`s by their energy.
    pub fn cmp_energy(&self, other: &Self) -> Option<cmp::Ordering> {
        self.e.partial_cmp(&other.e)
    }
}

/// Output of a full solve.
///
/// Holds the resampled potential, and the energies, wavefunctions, and
/// position statistics of the requested states. The wavefunction matrix has
/// one row per grid point and one column per state.
#[derive(Clone, Debug)]
pub struct ResultBundle {
    potential: Potential,
    first_state: usize,
    energies: nd::Array1<f64>,
    wavefunctions: nd::Array2<f64>,
    observables: Vec<Observables>,
}

impl ResultBundle {
    /// Get a reference to the resampled potential.
    pub fn get_potential(&self) -> &Potential { &self.potential }

    /// Get a reference to the coordinate array.
    pub fn get_x(&self) -> &nd::Array1<f64> { self.potential.get_x() }

    /// Get the index of the first reported state.
    pub fn get_first_state(&self) -> usize { self.first_state }

    /// Get a reference to the energies of the requested states.
    pub fn get_energies(&self) -> &nd::Array1<f64> { &self.energies }

    /// Get a reference to the wavefunction matrix.
    pub fn get_wavefunctions(&self) -> &nd::Array2<f64> { &self.wavefunctions }

    /// Get a reference to the position statistics of the requested states.
    pub fn get_observables(&self) -> &[Observables] { &self.observables }

    /// Get the number of reported states.
    pub fn nstates(&self) -> usize { self.energies.len() }

    /// Split into per-state [`Solution`]s.
    pub fn solutions(&self) -> Vec<Solution> {
        self.energies.iter()
            .zip(self.wavefunctions.columns())
            .zip(&self.observables)
            .enumerate()
            .map(|(k, ((e, wf), obs))| {
                Solution {
                    n: self.first_state + k,
                    e: *e,
                    wf: Some(wf.to_owned()),
                    obs: Some(*obs),
                }
            })
            .collect()
    }
}

/// Solve for states `first_state` through `last_state` (one-based,
/// inclusive) of a particle of mass `mass` in a potential already sampled on
/// a uniform grid.
pub fn solve_potential(
    potential: Potential,
    mass: f64,
    first_state: usize,
    last_state: usize,
) -> SolveResult<ResultBundle>
{
    ConfigError::check_states(first_state, last_state, potential.len())?;
    let H = hamiltonian::discretize(&potential, mass)?;
    let select = Select::Index(first_state - 1, last_state - 1);
    let spectrum = eigen::eigh_tridiagonal(&H, select)?;
    let (energies, wavefunctions) = spectrum.into_parts();
    let observables
        = observables::position_stats_all(
            potential.get_x(), &wavefunctions, first_state)?;
    log::debug!(
        "solve::solve_potential: computed {} states ({}..={})",
        energies.len(), first_state, last_state,
    );
    Ok(ResultBundle {
        potential,
        first_state,
        energies,
        wavefunctions,
        observables,
    })
}

/// Master solving function.
///
/// Validates `problem` before doing any numerical work, then resamples the
/// potential, discretizes the Hamiltonian, diagonalizes it, and computes
/// position statistics for the requested states.
pub fn solve(problem: &ProblemSpec) -> SolveResult<ResultBundle> {
    problem.validate()?;
    let potential
        = Potential::from_samples(
            &problem.data_x, &problem.data_v, problem.method, problem.xargs())?;
    solve_potential(
        potential, problem.mass, problem.first_state, problem.last_state)
}

/// Like [`solve`], but compute only the energies of the requested states.
///
/// The returned [`Solution`]s carry no wavefunctions or observables.
pub fn solve_energies(problem: &ProblemSpec) -> SolveResult<Vec<Solution>> {
    problem.validate()?;
    let potential
        = Potential::from_samples(
            &problem.data_x, &problem.data_v, problem.method, problem.xargs())?;
    let H = hamiltonian::discretize(&potential, problem.mass)?;
    let evals = eigen::eigvalsh_tridiagonal(&H, problem.select())?;
    let sols: Vec<Solution>
        = evals.into_iter()
        .enumerate()
        .map(|(k, e)| {
            Solution { n: problem.first_state + k, e, wf: None, obs: None }
        })
        .collect();
    Ok(sols)
}
