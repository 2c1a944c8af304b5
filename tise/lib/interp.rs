//! Resampling of sparse, irregularly spaced potential data onto a uniform
//! coordinate grid.
//!
//! Three methods are provided (see [`Method`]): piecewise-linear
//! interpolation, a natural cubic spline, and a single global polynomial
//! through all data points.
//!
//! ```
//! use ndarray as nd;
//! use tise::interp::{ Method, interpolate };
//!
//! let data_x = nd::array![-2.0, -1.0, 0.0, 1.0, 2.0];
//! let data_y = data_x.mapv(|xk: f64| 0.5 * xk.powi(2));
//! let x: nd::Array1<f64> = nd::Array1::linspace(-2.0, 2.0, 9);
//! let y = interpolate(&data_x, &data_y, Method::Polynomial, &x).unwrap();
//! assert!(
//!     x.iter().zip(&y)
//!         .all(|(xk, yk)| (yk - 0.5 * xk.powi(2)).abs() < 1e-9)
//! )
//! ```

use std::{ fmt, str::FromStr };
use ndarray as nd;
use ndarray_linalg::{ LeastSquaresSvd, SolveTridiagonal };
use crate::{
    Arr1,
    error::{ ConfigError, InterpError },
};

pub type InterpResult<T> = Result<T, InterpError>;

/// Interpolation method selector.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    /// Piecewise-linear interpolation; boundary values are held constant
    /// outside of the data range.
    Linear,
    /// Natural cubic spline (zero second derivative at both ends of the data
    /// range); the boundary cubic pieces are used outside of the data range.
    CubicSpline,
    /// A single polynomial of degree `n - 1` through all `n` data points.
    ///
    /// This is subject to Runge's phenomenon for more than a handful of
    /// points.
    Polynomial,
}

impl Method {
    /// Return the name of the method as used in input files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::CubicSpline => "cspline",
            Self::Polynomial => "polynomial",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "cspline" | "cubicspline" | "spline" => Ok(Self::CubicSpline),
            "polynomial" => Ok(Self::Polynomial),
            _ => Err(ConfigError::UnknownMethod(s.to_string())),
        }
    }
}

// index `k` of the interval `[x[k], x[k + 1]]` containing `x0`, clamped to the
// first and last intervals
//
// assumes `x` is strictly increasing with at least two elements
fn bracket<S>(x: &Arr1<S>, x0: f64) -> usize
where S: nd::Data<Elem = f64>
{
    let mut lo: usize = 0;
    let mut hi: usize = x.len() - 1;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if x[mid] > x0 { hi = mid; } else { lo = mid; }
    }
    lo
}

/// Compute the value of a sampled function at `x0` by linear interpolation.
///
/// Outside of the data range, the nearest boundary value is returned.
pub fn linear<S, T>(data_x: &Arr1<S>, data_y: &Arr1<T>, x0: f64)
    -> InterpResult<f64>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    ConfigError::check_samples(data_x, data_y)?;
    Ok(linear_unchecked(data_x, data_y, x0))
}

fn linear_unchecked<S, T>(data_x: &Arr1<S>, data_y: &Arr1<T>, x0: f64) -> f64
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let n = data_x.len();
    if x0 <= data_x[0] { return data_y[0]; }
    if x0 >= data_x[n - 1] { return data_y[n - 1]; }
    let k = bracket(data_x, x0);
    let w = (x0 - data_x[k]) / (data_x[k + 1] - data_x[k]);
    (1.0 - w) * data_y[k] + w * data_y[k + 1]
}

/// A natural cubic spline through a set of data points.
#[derive(Clone, Debug)]
pub struct CubicSpline {
    // knots
    x: nd::Array1<f64>,
    // function values at the knots
    y: nd::Array1<f64>,
    // second derivatives at the knots
    y2: nd::Array1<f64>,
}

impl CubicSpline {
    /// Fit a natural cubic spline to data points.
    ///
    /// `data_x` must be strictly increasing and at least two elements long.
    pub fn new<S, T>(data_x: &Arr1<S>, data_y: &Arr1<T>) -> InterpResult<Self>
    where
        S: nd::Data<Elem = f64>,
        T: nd::Data<Elem = f64>,
    {
        ConfigError::check_samples(data_x, data_y)?;
        let n = data_x.len();
        let mut y2: nd::Array1<f64> = nd::Array1::zeros(n);
        // second derivatives at the interior knots follow from continuity of
        // the first derivative; the end values are pinned to zero
        let m = n - 2;
        if m > 0 {
            let h: nd::Array1<f64> = crate::utils::array_diff(data_x);
            let mut A: nd::Array2<f64> = nd::Array2::zeros((m, m));
            let mut b: nd::Array1<f64> = nd::Array1::zeros(m);
            for i in 0..m {
                A[[i, i]] = 2.0 * (h[i] + h[i + 1]);
                if i > 0 { A[[i, i - 1]] = h[i]; }
                if i + 1 < m { A[[i, i + 1]] = h[i + 1]; }
                b[i] = 6.0 * (
                    (data_y[i + 2] - data_y[i + 1]) / h[i + 1]
                    - (data_y[i + 1] - data_y[i]) / h[i]
                );
            }
            // LAPACK's tridiagonal factorization needs at least a 2×2 system
            let interior: nd::Array1<f64>
                = if m == 1 { &b / A[[0, 0]] } else { A.solve_tridiagonal(&b)? };
            y2.slice_mut(nd::s![1..n - 1]).assign(&interior);
        }
        Ok(Self { x: data_x.to_owned(), y: data_y.to_owned(), y2 })
    }

    /// Get a reference to the second derivatives at the knots.
    pub fn get_y2(&self) -> &nd::Array1<f64> { &self.y2 }

    /// Evaluate the spline at a single point.
    pub fn eval(&self, x0: f64) -> f64 {
        let k = bracket(&self.x, x0);
        let h = self.x[k + 1] - self.x[k];
        let a = (self.x[k + 1] - x0) / h;
        let b = (x0 - self.x[k]) / h;
        a * self.y[k] + b * self.y[k + 1]
            + (
                (a.powi(3) - a) * self.y2[k]
                + (b.powi(3) - b) * self.y2[k + 1]
            ) * h.powi(2) / 6.0
    }

    /// Evaluate the spline over an array of points.
    pub fn eval_arr<S>(&self, x: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        x.mapv(|xk| self.eval(xk))
    }
}

/// A single polynomial fitted to data points by linear least squares.
#[derive(Clone, Debug)]
pub struct Polynomial {
    // coefficients, highest degree first
    c: nd::Array1<f64>,
}

impl Polynomial {
    /// Fit a polynomial of degree `deg` to data points by least squares.
    ///
    /// With `deg = n - 1` for `n` points, the fit is exact (up to rounding)
    /// and the result is the interpolating polynomial. Columns of the
    /// Vandermonde matrix are scaled to unit norm before the fit.
    pub fn fit<S, T>(data_x: &Arr1<S>, data_y: &Arr1<T>, deg: usize)
        -> InterpResult<Self>
    where
        S: nd::Data<Elem = f64>,
        T: nd::Data<Elem = f64>,
    {
        ConfigError::check_samples(data_x, data_y)?;
        let n = data_x.len();
        let mut V: nd::Array2<f64>
            = nd::Array2::from_shape_fn(
                (n, deg + 1),
                |(i, j)| data_x[i].powi((deg - j) as i32),
            );
        let scale: nd::Array1<f64>
            = V.columns().into_iter()
            .map(|col| {
                let norm = col.dot(&col).sqrt();
                if norm == 0.0 { 1.0 } else { norm }
            })
            .collect();
        V /= &scale;
        let lsq = V.least_squares(data_y)?;
        let c = lsq.solution / &scale;
        Ok(Self { c })
    }

    /// Get a reference to the coefficients, ordered from highest degree to
    /// lowest.
    pub fn get_coeffs(&self) -> &nd::Array1<f64> { &self.c }

    /// Get the degree of the polynomial.
    pub fn degree(&self) -> usize { self.c.len().saturating_sub(1) }

    /// Evaluate the polynomial at a single point via Horner's rule.
    pub fn eval(&self, x0: f64) -> f64 {
        self.c.iter().fold(0.0, |acc, ck| acc * x0 + ck)
    }

    /// Evaluate the polynomial over an array of points.
    pub fn eval_arr<S>(&self, x: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        x.mapv(|xk| self.eval(xk))
    }
}

/// Resample data points onto the coordinates `x` with a given method.
///
/// Coordinates outside of the data range are extrapolated according to the
/// method (see [`Method`]); a warning is logged when this happens.
pub fn interpolate<S, T, U>(
    data_x: &Arr1<S>,
    data_y: &Arr1<T>,
    method: Method,
    x: &Arr1<U>,
) -> InterpResult<nd::Array1<f64>>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
    U: nd::Data<Elem = f64>,
{
    ConfigError::check_samples(data_x, data_y)?;
    let n = data_x.len();
    let outside
        = x.iter().filter(|xk| **xk < data_x[0] || **xk > data_x[n - 1]).count();
    if outside > 0 {
        log::warn!(
            "interp::interpolate: {} of {} points lie outside of the data \
            range [{}, {}]; values there are extrapolated ({})",
            outside, x.len(), data_x[0], data_x[n - 1], method,
        );
    }
    log::debug!(
        "interp::interpolate: {} data points -> {} grid points ({})",
        n, x.len(), method,
    );
    let y: nd::Array1<f64>
        = match method {
            Method::Linear => {
                x.mapv(|xk| linear_unchecked(data_x, data_y, xk))
            },
            Method::CubicSpline => {
                CubicSpline::new(data_x, data_y)?.eval_arr(x)
            },
            Method::Polynomial => {
                Polynomial::fit(data_x, data_y, n - 1)?.eval_arr(x)
            },
        };
    Ok(y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn samples() -> (nd::Array1<f64>, nd::Array1<f64>) {
        let x = nd::array![-3.0, -1.5, -0.5, 0.0, 1.0, 2.5, 3.0];
        let y = x.mapv(|xk: f64| 2.0 * xk - 1.0);
        (x, y)
    }

    #[test]
    fn method_names() {
        assert_eq!("linear".parse::<Method>().unwrap(), Method::Linear);
        assert_eq!("cspline".parse::<Method>().unwrap(), Method::CubicSpline);
        assert_eq!("Polynomial".parse::<Method>().unwrap(), Method::Polynomial);
        assert!(matches!(
            "quadratic".parse::<Method>(),
            Err(ConfigError::UnknownMethod(name)) if name == "quadratic"
        ));
        for method in [Method::Linear, Method::CubicSpline, Method::Polynomial] {
            assert_eq!(method.name().parse::<Method>().unwrap(), method);
        }
    }

    #[test]
    fn linear_blends_and_clamps() {
        let x = nd::array![0.0, 1.0, 3.0];
        let y = nd::array![1.0, 3.0, -1.0];
        assert_abs_diff_eq!(linear(&x, &y, 0.5).unwrap(), 2.0);
        assert_abs_diff_eq!(linear(&x, &y, 2.0).unwrap(), 1.0);
        assert_abs_diff_eq!(linear(&x, &y, 1.0).unwrap(), 3.0);
        assert_abs_diff_eq!(linear(&x, &y, -5.0).unwrap(), 1.0);
        assert_abs_diff_eq!(linear(&x, &y, 10.0).unwrap(), -1.0);
    }

    #[test]
    fn all_methods_reproduce_a_line() {
        let (data_x, data_y) = samples();
        let x: nd::Array1<f64> = nd::Array1::linspace(-3.0, 3.0, 25);
        for method in [Method::Linear, Method::CubicSpline, Method::Polynomial] {
            let y = interpolate(&data_x, &data_y, method, &x).unwrap();
            x.iter().zip(&y).for_each(|(xk, yk)| {
                assert_abs_diff_eq!(*yk, 2.0 * xk - 1.0, epsilon = 1e-8);
            });
            let y = interpolate(&data_x, &data_y, method, &data_x).unwrap();
            data_y.iter().zip(&y).for_each(|(dk, yk)| {
                assert_abs_diff_eq!(*yk, *dk, epsilon = 1e-8);
            });
        }
    }

    #[test]
    fn spline_passes_through_data_with_natural_ends() {
        let x = nd::array![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = nd::array![2.0, 3.0, 5.0, 4.0, 1.0];
        let spline = CubicSpline::new(&x, &y).unwrap();
        x.iter().zip(&y).for_each(|(xk, yk)| {
            assert_abs_diff_eq!(spline.eval(*xk), *yk, epsilon = 1e-10);
        });
        assert_eq!(spline.get_y2()[0], 0.0);
        assert_eq!(spline.get_y2()[4], 0.0);
        assert!(spline.get_y2()[2] < 0.0);
    }

    #[test]
    fn spline_with_one_interior_knot() {
        // y = |x| sampled at three points; symmetric curvature at 0
        let x = nd::array![-1.0, 0.0, 1.0];
        let y = nd::array![1.0, 0.0, 1.0];
        let spline = CubicSpline::new(&x, &y).unwrap();
        // 2 (h0 + h1) M1 = 6 (1 + 1) with h0 = h1 = 1
        assert_abs_diff_eq!(spline.get_y2()[1], 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(spline.eval(0.5), spline.eval(-0.5), epsilon = 1e-12);
    }

    #[test]
    fn spline_with_two_points_is_linear() {
        let x = nd::array![0.0, 2.0];
        let y = nd::array![1.0, 5.0];
        let spline = CubicSpline::new(&x, &y).unwrap();
        assert_abs_diff_eq!(spline.eval(0.5), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(spline.eval(3.0), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn polynomial_recovers_coefficients() {
        let x = nd::array![-2.0, -1.0, 0.5, 1.0];
        let y = x.mapv(|xk: f64| xk.powi(3) - 2.0 * xk + 0.25);
        let poly = Polynomial::fit(&x, &y, 3).unwrap();
        assert_eq!(poly.degree(), 3);
        let expected = [1.0, 0.0, -2.0, 0.25];
        poly.get_coeffs().iter().zip(expected).for_each(|(c, e)| {
            assert_abs_diff_eq!(*c, e, epsilon = 1e-9);
        });
        assert_abs_diff_eq!(poly.eval(3.0), 21.25, epsilon = 1e-8);
    }

    #[test]
    fn linear_resampling_is_idempotent() {
        let data_x = nd::array![-2.0, -0.7, 0.1, 1.3, 2.0];
        let data_y = nd::array![4.0, 0.2, -1.0, 1.5, 3.0];
        let x: nd::Array1<f64> = nd::Array1::linspace(-2.0, 2.0, 41);
        for method in [Method::Linear, Method::CubicSpline, Method::Polynomial] {
            let y = interpolate(&data_x, &data_y, method, &x).unwrap();
            let y2 = interpolate(&x, &y, Method::Linear, &x).unwrap();
            assert_eq!(y, y2);
        }
    }

    #[test]
    fn bad_samples_are_rejected() {
        let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, 5);
        let err = interpolate(&nd::array![0.0], &nd::array![1.0], Method::Linear, &x);
        assert!(matches!(
            err, Err(InterpError::Config(ConfigError::TooFewSamples(1)))));
        let err = interpolate(
            &nd::array![0.0, 1.0, 1.0],
            &nd::array![1.0, 2.0, 3.0],
            Method::CubicSpline,
            &x,
        );
        assert!(matches!(
            err, Err(InterpError::Config(ConfigError::UnsortedSamples(2)))));
        let err = interpolate(
            &nd::array![0.0, 1.0, 2.0],
            &nd::array![1.0, 2.0],
            Method::Polynomial,
            &x,
        );
        assert!(matches!(
            err, Err(InterpError::Config(ConfigError::Length(_)))));
        let err = interpolate(
            &nd::array![0.0, 1.0, 2.0],
            &nd::array![1.0, f64::NAN, 3.0],
            Method::Linear,
            &x,
        );
        assert!(matches!(
            err, Err(InterpError::Config(ConfigError::NonFiniteSample(1)))));
    }
}
