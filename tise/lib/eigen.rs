//! Eigenvalues and eigenvectors of real symmetric tridiagonal matrices.
//!
//! Two routines are provided:
//! - [`eigh_tridiagonal`] computes the full eigendecomposition by the implicit
//!   QL algorithm with Wilkinson shifts, accumulating plane rotations into the
//!   eigenvector matrix. The banded structure is used throughout; no dense
//!   eigensolver is involved.
//! - [`eigvalsh_tridiagonal`] computes selected eigenvalues only, by bisection
//!   on Sturm sequence counts within Gershgorin bounds.
//!
//! Returned eigenvalues are always in ascending order. Eigenvectors have unit
//! (discrete) norm and an arbitrary overall sign.
//!
//! ```
//! use ndarray as nd;
//! use tise::{ eigen::{ Select, eigh_tridiagonal }, hamiltonian::Tridiagonal };
//!
//! // eigenvalues of the second-difference matrix are 2 - 2 cos(kπ / (n + 1))
//! let n = 8;
//! let t = Tridiagonal::new(
//!     nd::Array1::from_elem(n, 2.0),
//!     nd::Array1::from_elem(n - 1, -1.0),
//! ).unwrap();
//! let spec = eigh_tridiagonal(&t, Select::All).unwrap();
//! assert!(
//!     spec.get_evals().iter().enumerate()
//!         .all(|(k, ek)| {
//!             let theta = (k + 1) as f64 * std::f64::consts::PI / (n + 1) as f64;
//!             (ek - (2.0 - 2.0 * theta.cos())).abs() < 1e-12
//!         })
//! )
//! ```

use ndarray as nd;
use crate::{
    error::{ ConfigError, NumericalError, SolveError },
    hamiltonian::Tridiagonal,
    DEF_MAXITERS_QL,
};

pub type EigenResult<T> = Result<T, SolveError>;

/// Selects a contiguous range of eigenpairs by index.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Select {
    /// All eigenpairs.
    All,
    /// Eigenpairs with (zero-based) indices `lo` through `hi`, inclusive, in
    /// ascending order of eigenvalue.
    Index(usize, usize),
}

impl Select {
    // resolve into an inclusive index range for a matrix of size `n`
    fn range(self, n: usize) -> Result<(usize, usize), ConfigError> {
        match self {
            Self::All => Ok((0, n - 1)),
            Self::Index(lo, hi) if lo <= hi && hi < n => Ok((lo, hi)),
            Self::Index(lo, hi) => Err(ConfigError::BadSelection { lo, hi, n }),
        }
    }
}

/// Eigenvalues and eigenvectors of a symmetric matrix.
///
/// Column `i` of the eigenvector matrix belongs to eigenvalue `i`.
#[derive(Clone, Debug)]
pub struct Spectrum {
    // eigenvalues, ascending
    evals: nd::Array1<f64>,
    // eigenvectors as columns
    evecs: nd::Array2<f64>,
}

impl Spectrum {
    /// Get a reference to the eigenvalues.
    pub fn get_evals(&self) -> &nd::Array1<f64> { &self.evals }

    /// Get a reference to the eigenvector matrix.
    pub fn get_evecs(&self) -> &nd::Array2<f64> { &self.evecs }

    /// Get a view of the `i`-th eigenvector.
    ///
    /// *Panics if `i` is out of bounds*.
    pub fn evec(&self, i: usize) -> nd::ArrayView1<'_, f64> {
        self.evecs.column(i)
    }

    /// Get the number of eigenpairs.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.evals.len() }

    /// Decompose into eigenvalues and eigenvectors.
    pub fn into_parts(self) -> (nd::Array1<f64>, nd::Array2<f64>) {
        (self.evals, self.evecs)
    }
}

/// Compute eigenvalues and eigenvectors of a symmetric tridiagonal matrix.
///
/// Each eigenvalue is allowed up to `DEF_MAXITERS_QL` QL sweeps; see
/// [`eigh_tridiagonal_maxiters`].
pub fn eigh_tridiagonal(t: &Tridiagonal, select: Select)
    -> EigenResult<Spectrum>
{
    eigh_tridiagonal_maxiters(t, select, DEF_MAXITERS_QL)
}

/// Like [`eigh_tridiagonal`], but with an explicit limit on the number of QL
/// sweeps per eigenvalue.
///
/// Returns [`NumericalError::NoConvergence`] if the limit is exceeded for any
/// eigenvalue. The computation is not retried.
pub fn eigh_tridiagonal_maxiters(
    t: &Tridiagonal,
    select: Select,
    maxiters: usize,
) -> EigenResult<Spectrum>
{
    let n = t.len();
    let (lo, hi) = select.range(n)?;
    let mut d: nd::Array1<f64> = t.get_diag().clone();
    // shifted so that e[i] couples rows i and i + 1; e[n - 1] is scratch space
    let mut e: nd::Array1<f64> = nd::Array1::zeros(n);
    e.slice_mut(nd::s![..n - 1]).assign(t.get_offdiag());
    // accumulated rotations; row k holds the k-th eigenvector
    let mut z: nd::Array2<f64> = nd::Array2::eye(n);

    for l in 0..n {
        let mut iter: usize = 0;
        loop {
            let mut m = l;
            while m < n - 1 {
                let dd = d[m].abs() + d[m + 1].abs();
                if e[m].abs() + dd == dd { break; }
                m += 1;
            }
            if m == l { break; }
            if iter >= maxiters {
                let err = NumericalError::NoConvergence { index: l, maxiters };
                return Err(err.into());
            }
            iter += 1;

            // Wilkinson shift from the leading 2×2 block
            let mut g = (d[l + 1] - d[l]) / (2.0 * e[l]);
            let mut r = g.hypot(1.0);
            let r_signed = if g >= 0.0 { r.abs() } else { -r.abs() };
            g = d[m] - d[l] + e[l] / (g + r_signed);
            let (mut s, mut c, mut p) = (1.0, 1.0, 0.0);
            let mut underflow = false;
            for i in (l..m).rev() {
                let f = s * e[i];
                let b = c * e[i];
                r = f.hypot(g);
                e[i + 1] = r;
                if r == 0.0 {
                    d[i + 1] -= p;
                    e[m] = 0.0;
                    underflow = true;
                    break;
                }
                s = f / r;
                c = g / r;
                g = d[i + 1] - p;
                r = (d[i] - g) * s + 2.0 * c * b;
                p = s * r;
                d[i + 1] = g + p;
                g = c * r - b;
                let (mut zi, mut zi1)
                    = z.multi_slice_mut((nd::s![i, ..], nd::s![i + 1, ..]));
                nd::Zip::from(&mut zi).and(&mut zi1)
                    .for_each(|zik, zi1k| {
                        let f = *zi1k;
                        *zi1k = s * *zik + c * f;
                        *zik = c * *zik - s * f;
                    });
            }
            if underflow { continue; }
            d[l] -= p;
            e[l] = g;
            e[m] = 0.0;
        }
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| d[a].total_cmp(&d[b]));
    let order: Vec<usize> = order[lo..=hi].to_vec();
    let evals: nd::Array1<f64> = d.select(nd::Axis(0), &order);
    let evecs: nd::Array2<f64>
        = z.select(nd::Axis(0), &order).reversed_axes();
    Ok(Spectrum { evals, evecs })
}

/// Count eigenvalues of a symmetric tridiagonal matrix strictly less than
/// `lambda`.
///
/// This is the number of negative pivots in the LDLᵀ factorization of
/// `T - lambda I` (the Sturm sequence count).
pub fn sturm_count(t: &Tridiagonal, lambda: f64) -> usize {
    let d = t.get_diag();
    let e = t.get_offdiag();
    let mut count: usize = 0;
    let mut q = d[0] - lambda;
    if q < 0.0 { count += 1; }
    for (dk, ekm1) in d.iter().skip(1).zip(e) {
        let q_safe
            = if q.abs() < f64::MIN_POSITIVE {
                if q >= 0.0 { f64::MIN_POSITIVE } else { -f64::MIN_POSITIVE }
            } else {
                q
            };
        q = (dk - lambda) - ekm1.powi(2) / q_safe;
        if q < 0.0 { count += 1; }
    }
    count
}

// Gershgorin interval containing all eigenvalues, padded slightly
fn gershgorin(t: &Tridiagonal) -> (f64, f64) {
    let d = t.get_diag();
    let e = t.get_offdiag();
    let n = d.len();
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for (i, di) in d.iter().enumerate() {
        let left = if i > 0 { e[i - 1].abs() } else { 0.0 };
        let right = if i + 1 < n { e[i].abs() } else { 0.0 };
        lo = lo.min(di - left - right);
        hi = hi.max(di + left + right);
    }
    let pad = f64::EPSILON * (lo.abs().max(hi.abs())).max(1.0);
    (lo - pad, hi + pad)
}

/// Compute selected eigenvalues of a symmetric tridiagonal matrix by Sturm
/// bisection, without eigenvectors.
///
/// Each eigenvalue is located to within a few ulps of its magnitude.
pub fn eigvalsh_tridiagonal(t: &Tridiagonal, select: Select)
    -> EigenResult<nd::Array1<f64>>
{
    let n = t.len();
    let (lo, hi) = select.range(n)?;
    let (glo, ghi) = gershgorin(t);
    let evals: nd::Array1<f64>
        = (lo..=hi)
        .map(|k| {
            let mut a = glo;
            let mut b = ghi;
            for _ in 0..200 {
                let mid = 0.5 * (a + b);
                if b - a < 2.0 * f64::EPSILON * mid.abs().max(1.0) { break; }
                if sturm_count(t, mid) <= k { a = mid; } else { b = mid; }
            }
            0.5 * (a + b)
        })
        .collect();
    Ok(evals)
}
