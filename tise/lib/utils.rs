//! Miscellaneous tools.

use ndarray::{ self as nd, Ix1 };
use ndarray_linalg::Scalar;
use num_traits::Zero;

/// Return an array of differences between adjacent elements of a source array.
///
/// The returned array has length `a.len() - 1` (or 0 for an empty array).
pub fn array_diff<S, A>(a: &nd::ArrayBase<S, Ix1>) -> nd::Array1<A>
where
    S: nd::Data<Elem = A>,
    A: std::ops::Sub<A, Output = A> + Copy,
{
    a.iter().zip(a.iter().skip(1))
        .map(|(ak, akp1)| *akp1 - *ak)
        .collect()
}

/// Calculate the discrete squared norm `Σ |q_k|²` of a grid vector.
///
/// This is the norm in which eigenvectors of a discretized Hamiltonian are
/// returned; it differs from the continuum norm by a factor of the grid
/// spacing.
pub fn vec_norm_sq<S, A>(q: &nd::ArrayBase<S, Ix1>)
    -> <A as Scalar>::Real
where
    S: nd::Data<Elem = A>,
    A: Scalar,
{
    q.iter()
        .map(|qk| qk.square())
        .fold(<A as Scalar>::Real::zero(), |acc, qk2| acc + qk2)
}

/// Calculate the discrete inner product `Σ conj(q_k) p_k` of two grid vectors.
///
/// Only the overlapping leading elements are used if the arrays differ in
/// length.
pub fn vec_dot<S, T, A>(q: &nd::ArrayBase<S, Ix1>, p: &nd::ArrayBase<T, Ix1>)
    -> A
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    A: Scalar,
{
    q.iter().zip(p)
        .fold(A::zero(), |acc, (qk, pk)| acc + qk.conj() * *pk)
}

/// Compute the weighted moment `Σ x_k^p |q_k|²` of a grid vector.
pub fn moment<S, T>(x: &nd::ArrayBase<S, Ix1>, q: &nd::ArrayBase<T, Ix1>, p: i32)
    -> f64
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    x.iter().zip(q)
        .map(|(xk, qk)| xk.powi(p) * qk.powi(2))
        .sum()
}
