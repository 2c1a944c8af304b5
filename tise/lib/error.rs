//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! Every failure falls into one of three kinds (see [`ErrorKind`]): bad input
//! parameters, a degenerate coordinate grid, or a numerical routine that could
//! not produce a trustworthy result. None of these are recoverable within a
//! single solve.
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use ndarray_linalg::error::LinalgError;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Coarse classification of every error returned by this crate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unsupported or inconsistent input parameters.
    InvalidConfiguration,
    /// Degenerate or non-uniform coordinate grid.
    InvalidGrid,
    /// A numerical routine failed to converge or produced an invalid result.
    NumericalFailure,
}

/// Returned when problem parameters are unsupported or inconsistent.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unrecognized interpolation method name.
    #[error("unknown interpolation method '{0}'; expected one of 'linear', 'cspline', 'polynomial'")]
    UnknownMethod(String),

    /// Non-positive or non-finite mass.
    #[error("mass must be positive and finite; got {0}")]
    BadMass(f64),

    /// Empty or inverted coordinate domain.
    #[error("domain must satisfy xmin < xmax; got [{0}, {1}]")]
    BadDomain(f64, f64),

    /// Fewer than two grid points requested.
    #[error("number of grid points must be at least 2; got {0}")]
    BadNpoint(usize),

    /// State indices outside of `1 ≤ first ≤ last ≤ npoint`.
    #[error("state range must satisfy 1 <= first <= last <= {npoint}; got {first}..={last}")]
    BadStateRange { first: usize, last: usize, npoint: usize },

    /// Fewer than two potential samples.
    #[error("at least 2 potential samples are required; got {0}")]
    TooFewSamples(usize),

    /// A potential sample coordinate or value is NaN or infinite.
    #[error("potential samples must be finite; got a non-finite value at index {0}")]
    NonFiniteSample(usize),

    /// Potential sample coordinates are not strictly increasing.
    #[error("potential sample coordinates must be strictly increasing; violated at index {0}")]
    UnsortedSamples(usize),

    /// An eigenpair index selection outside of the matrix size.
    #[error("eigenpair selection {lo}..={hi} is invalid for a matrix of size {n}")]
    BadSelection { lo: usize, hi: usize, n: usize },

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

/// Returned when a coordinate grid cannot be used for finite differences.
#[derive(Debug, Error)]
pub enum GridError {
    /// Fewer than two grid points.
    #[error("coordinate grid must have at least 2 points; got {0}")]
    TooFewPoints(usize),

    /// Non-positive or non-finite grid spacing.
    #[error("grid spacing must be positive and finite; got {0}")]
    BadSpacing(f64),

    /// NaN or infinite potential value on the grid.
    #[error("potential must be finite on the grid; got {value} at index {index}")]
    NonFinitePotential { index: usize, value: f64 },

    /// Grid spacing that varies along the grid.
    #[error("grid spacing is not uniform: step {index} is {step} but expected {dx}")]
    NonUniform { index: usize, step: f64, dx: f64 },

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

/// Returned when a numerical routine fails.
#[derive(Debug, Error)]
pub enum NumericalError {
    /// The tridiagonal QL iteration exceeded its iteration limit.
    #[error("eigen::eigh_tridiagonal: QL iteration failed to converge for eigenvalue {index} within {maxiters} iterations")]
    NoConvergence { index: usize, maxiters: usize },

    /// A position variance came out negative beyond round-off, or NaN.
    #[error("observables: position variance for state {state} is invalid ({variance:e}); eigenvector is not normalized")]
    NegativeVariance { state: usize, variance: f64 },

    /// [`LinalgError`].
    #[error("linalg error: {0}")]
    Linalg(#[from] LinalgError),
}

/// Returned from functions in [`interp`][crate::interp].
#[derive(Debug, Error)]
pub enum InterpError {
    /// [`ConfigError`]
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// [`NumericalError`]
    #[error("{0}")]
    Numerical(#[from] NumericalError),
}

impl From<LengthError> for InterpError {
    fn from(err: LengthError) -> Self { Self::Config(err.into()) }
}

impl From<LinalgError> for InterpError {
    fn from(err: LinalgError) -> Self { Self::Numerical(err.into()) }
}

/// Returned from the full solution pipeline in [`solve`][crate::solve].
#[derive(Debug, Error)]
pub enum SolveError {
    /// [`ConfigError`]
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// [`GridError`]
    #[error("invalid grid: {0}")]
    InvalidGrid(#[from] GridError),

    /// [`NumericalError`]
    #[error("numerical failure: {0}")]
    NumericalFailure(#[from] NumericalError),
}

impl SolveError {
    /// Return the coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
            Self::InvalidGrid(_) => ErrorKind::InvalidGrid,
            Self::NumericalFailure(_) => ErrorKind::NumericalFailure,
        }
    }
}

impl From<InterpError> for SolveError {
    fn from(err: InterpError) -> Self {
        match err {
            InterpError::Config(e) => Self::InvalidConfiguration(e),
            InterpError::Numerical(e) => Self::NumericalFailure(e),
        }
    }
}

impl ConfigError {
    pub(crate) fn check_mass(mass: f64) -> Result<(), Self> {
        (mass.is_finite() && mass > 0.0).then_some(()).ok_or(Self::BadMass(mass))
    }

    pub(crate) fn check_domain(xmin: f64, xmax: f64) -> Result<(), Self> {
        (xmin.is_finite() && xmax.is_finite() && xmin < xmax)
            .then_some(())
            .ok_or(Self::BadDomain(xmin, xmax))
    }

    pub(crate) fn check_npoint(npoint: usize) -> Result<(), Self> {
        (npoint >= 2).then_some(()).ok_or(Self::BadNpoint(npoint))
    }

    pub(crate) fn check_states(first: usize, last: usize, npoint: usize)
        -> Result<(), Self>
    {
        (1 <= first && first <= last && last <= npoint)
            .then_some(())
            .ok_or(Self::BadStateRange { first, last, npoint })
    }

    pub(crate) fn check_samples<S, T>(
        x: &nd::ArrayBase<S, nd::Ix1>,
        v: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = f64>,
        T: nd::Data<Elem = f64>,
    {
        LengthError::check(x, v)?;
        if x.len() < 2 { return Err(Self::TooFewSamples(x.len())); }
        let nonfinite
            = x.iter().zip(v.iter())
            .position(|(xk, vk)| !(xk.is_finite() && vk.is_finite()));
        if let Some(k) = nonfinite { return Err(Self::NonFiniteSample(k)); }
        match x.iter().zip(x.iter().skip(1)).position(|(xk, xkp1)| !(xkp1 > xk)) {
            Some(k) => Err(Self::UnsortedSamples(k + 1)),
            None => Ok(()),
        }
    }
}

/// Returned from the input reader in [`io`][crate::io].
#[derive(Debug, Error)]
pub enum InputError {
    /// Returned when the input file cannot be opened or read.
    #[error("could not read input file {path:?}: {source}")]
    Open { path: std::path::PathBuf, source: std::io::Error },

    /// Returned when reading from an input stream fails.
    #[error("read error: {0}")]
    Read(#[from] std::io::Error),

    /// Returned when a required line or field is absent.
    #[error("line {line}: missing {what}")]
    Missing { line: usize, what: &'static str },

    /// Returned when a field cannot be parsed as a number.
    #[error("line {line}: could not parse {what} from '{token}'")]
    Parse { line: usize, what: &'static str, token: String },

    /// [`ConfigError`]
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Returned from the output writer in [`io`][crate::io].
#[derive(Debug, Error)]
#[error("could not write output file {path:?}: {source}")]
pub struct OutputError {
    pub path: std::path::PathBuf,
    pub source: std::io::Error,
}
