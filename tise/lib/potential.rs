//! Potential energy sampled on a uniform coordinate grid.

use ndarray as nd;
use crate::{
    Arr1,
    error::{ GridError, LengthError, SolveError },
    interp::{ self, Method },
    utils::array_diff,
    DEF_GRID_RTOL,
};

pub type GridResult<T> = Result<T, GridError>;

/// Check that a coordinate array describes a usable finite-difference grid and
/// return its spacing.
///
/// The grid must have at least two points, a positive and finite spacing, and
/// every step must agree with the first to within a relative tolerance of
/// `DEF_GRID_RTOL`, widened by the rounding error of the coordinates
/// themselves for grids far from the origin.
pub fn check_grid<S>(x: &Arr1<S>) -> GridResult<f64>
where S: nd::Data<Elem = f64>
{
    let n = x.len();
    if n < 2 { return Err(GridError::TooFewPoints(n)); }
    let dx = x[1] - x[0];
    if !(dx.is_finite() && dx > 0.0) { return Err(GridError::BadSpacing(dx)); }
    let xmax_abs = x.iter().fold(0.0_f64, |m, xk| m.max(xk.abs()));
    let tol = DEF_GRID_RTOL * dx + 4.0 * f64::EPSILON * xmax_abs;
    match array_diff(x).iter().position(|step| (step - dx).abs() > tol) {
        Some(index) => {
            let step = x[index + 1] - x[index];
            Err(GridError::NonUniform { index, step, dx })
        },
        None => Ok(dx),
    }
}

// every potential value must be finite
fn check_potential<S>(V: &Arr1<S>) -> GridResult<()>
where S: nd::Data<Elem = f64>
{
    match V.iter().position(|Vk| !Vk.is_finite()) {
        Some(index) => {
            Err(GridError::NonFinitePotential { index, value: V[index] })
        },
        None => Ok(()),
    }
}

/// Simple record to keep track of coordinate and potential arrays.
///
/// Arrays borrowed from this type are guaranteed to have the same length, to
/// be sampled (or generated) for a coordinate grid with uniform spacing, and to
/// hold only finite potential values.
/// The record is read-only after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Potential {
    // coordinate array
    x: nd::Array1<f64>,
    // coordinate array grid spacing
    dx: f64,
    // potential array
    V: nd::Array1<f64>,
    // array sizes
    n: usize,
}

impl Potential {
    /// Create a new `Potential`, generating the coordinate array from
    /// "linspace-style" arguments (start, inclusive end, and an array length)
    /// and evaluating a function on it.
    pub fn new_linspace<F>(xargs: (f64, f64, usize), V: F) -> GridResult<Self>
    where F: FnMut(f64) -> f64
    {
        let x: nd::Array1<f64>
            = nd::Array1::linspace(xargs.0, xargs.1, xargs.2);
        let dx = check_grid(&x)?;
        let V: nd::Array1<f64> = x.mapv(V);
        check_potential(&V)?;
        let n = xargs.2;
        Ok(Self { x, dx, V, n })
    }

    /// Create a new `Potential` from bare coordinate and potential arrays.
    pub fn new_arrays(x: nd::Array1<f64>, V: nd::Array1<f64>)
        -> GridResult<Self>
    {
        LengthError::check(&x, &V)?;
        let dx = check_grid(&x)?;
        check_potential(&V)?;
        let n = x.len();
        Ok(Self { x, dx, V, n })
    }

    /// Create a new `Potential` by resampling sparse data points onto a
    /// uniform grid described by "linspace-style" arguments.
    pub fn from_samples<S, T>(
        data_x: &Arr1<S>,
        data_y: &Arr1<T>,
        method: Method,
        xargs: (f64, f64, usize),
    ) -> Result<Self, SolveError>
    where
        S: nd::Data<Elem = f64>,
        T: nd::Data<Elem = f64>,
    {
        let x: nd::Array1<f64>
            = nd::Array1::linspace(xargs.0, xargs.1, xargs.2);
        let dx = check_grid(&x)?;
        let V = interp::interpolate(data_x, data_y, method, &x)?;
        check_potential(&V)?;
        let n = xargs.2;
        Ok(Self { x, dx, V, n })
    }

    /// Get a reference to the coordinate array.
    pub fn get_x(&self) -> &nd::Array1<f64> { &self.x }

    /// Get a reference to the potential array.
    pub fn get_V(&self) -> &nd::Array1<f64> { &self.V }

    /// Get the coordinate array grid spacing.
    pub fn get_dx(&self) -> f64 { self.dx }

    /// Get the length of the coordinate and potential arrays.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.n }

    /// Iterate over `(x, V)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.V.iter().copied())
    }
}
