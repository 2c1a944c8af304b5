//! Position expectation values and uncertainties of discretized eigenstates.
//!
//! For an eigenvector `v` with unit discrete norm on grid `x`,
//! ```text
//! ⟨x⟩  = Σ x[j] v[j]²
//! ⟨x²⟩ = Σ x[j]² v[j]²
//! σₓ   = √(⟨x²⟩ - ⟨x⟩²)
//! ```
//! Only squares of eigenvector elements enter, so results do not depend on the
//! (arbitrary) sign of an eigenvector.

use ndarray as nd;
use crate::{
    Arr1,
    Arr2,
    error::{ LengthError, NumericalError, SolveError },
    utils::moment,
    DEF_VARIANCE_TOL,
};

/// Position statistics of a single state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Observables {
    /// Expectation value of position, ⟨x⟩.
    pub mean: f64,
    /// Standard deviation of position, σₓ ≥ 0.
    pub sigma: f64,
}

/// Compute position statistics for the state `state` with eigenvector `v` on
/// the grid `x`.
///
/// `state` is used only for error reporting. A negative variance smaller in
/// magnitude than `DEF_VARIANCE_TOL * max(1, ⟨x²⟩)` is attributed to rounding
/// and clamped to zero; anything below that (or NaN) is returned as
/// [`NumericalError::NegativeVariance`].
pub fn position_stats<S, T>(x: &Arr1<S>, v: &Arr1<T>, state: usize)
    -> Result<Observables, SolveError>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    LengthError::check(x, v)
        .map_err(|err| SolveError::InvalidConfiguration(err.into()))?;
    let mean = moment(x, v, 1);
    let second = moment(x, v, 2);
    let variance = second - mean.powi(2);
    let tol = DEF_VARIANCE_TOL * second.abs().max(1.0);
    if variance.is_nan() || variance < -tol {
        return Err(NumericalError::NegativeVariance { state, variance }.into());
    }
    if variance < 0.0 {
        log::warn!(
            "observables::position_stats: clamping variance {:e} of state {} \
            to zero",
            variance, state,
        );
    }
    Ok(Observables { mean, sigma: variance.max(0.0).sqrt() })
}

/// Compute position statistics for every column of `evecs`.
///
/// States are labeled `first_state`, `first_state + 1`, ... for error
/// reporting.
pub fn position_stats_all<S, T>(
    x: &Arr1<S>,
    evecs: &Arr2<T>,
    first_state: usize,
) -> Result<Vec<Observables>, SolveError>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    evecs.columns().into_iter()
        .enumerate()
        .map(|(k, v)| position_stats(x, &v, first_state + k))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn symmetric_two_point_state() {
        let x = nd::array![-1.0, 0.0, 1.0];
        let v = nd::array![0.5_f64.sqrt(), 0.0, -(0.5_f64.sqrt())];
        let obs = position_stats(&x, &v, 1).unwrap();
        assert_abs_diff_eq!(obs.mean, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(obs.sigma, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn sign_invariance() {
        let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 3.0, 4);
        let v: nd::Array1<f64> = nd::array![0.1, 0.7, 0.5, 0.5];
        let v = &v / v.dot(&v).sqrt();
        let a = position_stats(&x, &v, 1).unwrap();
        let b = position_stats(&x, &(-&v), 1).unwrap();
        let c = position_stats(&x, &(&v * nd::array![1.0, -1.0, 1.0, -1.0]), 1)
            .unwrap();
        assert_eq!(a, b);
        assert_abs_diff_eq!(a.mean, c.mean, epsilon = 1e-14);
        assert_abs_diff_eq!(a.sigma, c.sigma, epsilon = 1e-14);
        assert!(a.sigma >= 0.0);
    }

    #[test]
    fn localized_state_has_zero_width() {
        let x = nd::array![1.0e3, 2.0e3, 3.0e3];
        let v = nd::array![0.0, 1.0, 0.0];
        let obs = position_stats(&x, &v, 2).unwrap();
        assert_abs_diff_eq!(obs.mean, 2.0e3);
        assert_eq!(obs.sigma, 0.0);
    }

    #[test]
    fn unnormalized_state_is_an_error() {
        // ⟨x²⟩ - ⟨x⟩² = 4 * 4 - (4 * 2)² < 0 for a norm-4 vector at x = 2
        let x = nd::array![2.0, 3.0];
        let v = nd::array![2.0, 0.0];
        assert!(matches!(
            position_stats(&x, &v, 7),
            Err(SolveError::NumericalFailure(
                NumericalError::NegativeVariance { state: 7, .. }
            )),
        ));
        let v = nd::array![f64::NAN, 0.0];
        assert!(matches!(
            position_stats(&x, &v, 1),
            Err(SolveError::NumericalFailure(_)),
        ));
    }

    #[test]
    fn all_columns() {
        let x = nd::array![-1.0, 1.0];
        let s = 0.5_f64.sqrt();
        let evecs = nd::array![[1.0, s], [0.0, s]];
        let obs = position_stats_all(&x, &evecs, 3).unwrap();
        assert_eq!(obs.len(), 2);
        assert_abs_diff_eq!(obs[0].mean, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(obs[0].sigma, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(obs[1].mean, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(obs[1].sigma, 1.0, epsilon = 1e-12);
    }
}
