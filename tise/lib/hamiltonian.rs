//! Finite-difference discretization of the Hamiltonian operator.
//!
//! With the three-point approximation to the second derivative on a uniform
//! grid of spacing `δx`, the Hamiltonian `-(1/2m) ∂²/∂x² + V(x)` (in units
//! where ħ = 1) becomes the real symmetric tridiagonal matrix
//! ```text
//! H[i, i]     = a + V[i]
//! H[i, i ± 1] = -a / 2
//!
//! a = 1 / (m δx²)
//! ```
//! with the wavefunction implicitly pinned to zero just outside of the grid.

use ndarray as nd;
use crate::{
    Arr1,
    error::{ ConfigError, LengthError, SolveError },
    potential::{ Potential, check_grid },
};

/// A real symmetric tridiagonal matrix, stored by diagonals.
#[derive(Clone, Debug, PartialEq)]
pub struct Tridiagonal {
    // main diagonal; length n
    d: nd::Array1<f64>,
    // first off-diagonal; length n - 1
    e: nd::Array1<f64>,
}

impl Tridiagonal {
    /// Create a new `Tridiagonal` from its main diagonal and off-diagonal.
    ///
    /// The off-diagonal must be exactly one element shorter than the main
    /// diagonal, and the main diagonal must be non-empty.
    pub fn new(d: nd::Array1<f64>, e: nd::Array1<f64>)
        -> Result<Self, LengthError>
    {
        let n = d.len();
        if n == 0 || e.len() + 1 != n {
            return Err(LengthError(n, e.len()));
        }
        Ok(Self { d, e })
    }

    /// Get a reference to the main diagonal.
    pub fn get_diag(&self) -> &nd::Array1<f64> { &self.d }

    /// Get a reference to the off-diagonal.
    pub fn get_offdiag(&self) -> &nd::Array1<f64> { &self.e }

    /// Get the size of the (square) matrix.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.d.len() }

    /// Compute the matrix-vector product `H q` in O(n).
    ///
    /// *Panics if `q` does not have the same size as the matrix*.
    pub fn apply<S>(&self, q: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        let n = self.len();
        assert_eq!(q.len(), n, "Tridiagonal::apply: size mismatch");
        nd::Array1::from_shape_fn(n, |i| {
            let mut acc = self.d[i] * q[i];
            if i > 0 { acc += self.e[i - 1] * q[i - 1]; }
            if i + 1 < n { acc += self.e[i] * q[i + 1]; }
            acc
        })
    }

    /// Expand into a dense matrix.
    pub fn to_dense(&self) -> nd::Array2<f64> {
        let n = self.len();
        let mut H: nd::Array2<f64> = nd::Array2::from_diag(&self.d);
        H.slice_mut(nd::s![1..n, 0..n - 1]).diag_mut().assign(&self.e);
        H.slice_mut(nd::s![0..n - 1, 1..n]).diag_mut().assign(&self.e);
        H
    }
}

/// Discretize the Hamiltonian for a particle of mass `mass` in a potential
/// sampled on a uniform grid.
///
/// The grid spacing is taken from the coordinate array, which is re-checked
/// for uniformity.
pub fn discretize(potential: &Potential, mass: f64)
    -> Result<Tridiagonal, SolveError>
{
    ConfigError::check_mass(mass)?;
    let dx = check_grid(potential.get_x())?;
    let n = potential.len();
    let a = (mass * dx.powi(2)).recip();
    log::debug!(
        "hamiltonian::discretize: n = {}, dx = {:e}, kinetic scale = {:e}",
        n, dx, a,
    );
    let d: nd::Array1<f64> = potential.get_V().mapv(|Vk| a + Vk);
    let e: nd::Array1<f64> = nd::Array1::from_elem(n - 1, -a / 2.0);
    Ok(Tridiagonal { d, e })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::error::GridError;

    #[test]
    fn free_particle_matrix() {
        let pot = Potential::new_linspace((0.0, 1.0, 11), |_| 0.0).unwrap();
        let H = discretize(&pot, 2.0).unwrap();
        assert_eq!(H.len(), 11);
        assert_eq!(H.get_offdiag().len(), 10);
        // a = 1 / (2 * 0.01) = 50
        H.get_diag().iter()
            .for_each(|d| assert_abs_diff_eq!(*d, 50.0, epsilon = 1e-9));
        H.get_offdiag().iter()
            .for_each(|e| assert_abs_diff_eq!(*e, -25.0, epsilon = 1e-9));
    }

    #[test]
    fn potential_lands_on_the_diagonal() {
        let pot = Potential::new_linspace((-1.0, 1.0, 3), |x| 3.0 * x).unwrap();
        let H = discretize(&pot, 1.0).unwrap();
        let expected = [-2.0, 1.0, 4.0];
        H.get_diag().iter().zip(expected)
            .for_each(|(d, e)| assert_abs_diff_eq!(*d, e, epsilon = 1e-12));
    }

    #[test]
    fn dense_form_is_symmetric_and_matches_apply() {
        let pot = Potential::new_linspace((0.0, 2.0, 6), |x| x.powi(2)).unwrap();
        let H = discretize(&pot, 0.5).unwrap();
        let dense = H.to_dense();
        assert_eq!(dense, dense.t());
        let q: nd::Array1<f64> = nd::Array1::linspace(1.0, -1.0, 6);
        let Hq = H.apply(&q);
        let Hq_dense = dense.dot(&q);
        Hq.iter().zip(&Hq_dense)
            .for_each(|(a, b)| assert_abs_diff_eq!(*a, *b, epsilon = 1e-10));
    }

    #[test]
    fn bad_mass_is_rejected() {
        let pot = Potential::new_linspace((0.0, 1.0, 4), |_| 0.0).unwrap();
        assert!(matches!(
            discretize(&pot, 0.0),
            Err(SolveError::InvalidConfiguration(ConfigError::BadMass(_))),
        ));
        assert!(matches!(
            discretize(&pot, f64::NAN),
            Err(SolveError::InvalidConfiguration(ConfigError::BadMass(_))),
        ));
    }

    #[test]
    fn grid_is_checked() {
        assert!(matches!(
            check_grid(&nd::array![0.0]),
            Err(GridError::TooFewPoints(1)),
        ));
    }

    #[test]
    fn bad_shapes_are_rejected() {
        assert!(Tridiagonal::new(nd::array![1.0, 2.0], nd::array![0.5]).is_ok());
        assert!(Tridiagonal::new(nd::array![1.0, 2.0], nd::array![]).is_err());
        assert!(Tridiagonal::new(nd::array![], nd::array![]).is_err());
    }
}
