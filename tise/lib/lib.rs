#![allow(dead_code, non_snake_case)]

//! Provides functions and higher-level constructs for automated solution of the
//! one-dimensional, time-independent Schrödinger equation for bound states in
//! arbitrary, sampled potentials.
//!
//! The solution proceeds in four stages:
//! - Resampling of sparse potential data onto a uniform grid via linear,
//!   natural cubic spline, or polynomial interpolation ([`interp`],
//!   [`potential`])
//! - Discretization of the Hamiltonian by three-point finite differences into
//!   a symmetric tridiagonal matrix ([`hamiltonian`])
//! - Diagonalization of the tridiagonal matrix by the implicit QL algorithm or
//!   Sturm bisection ([`eigen`])
//! - Computation of position expectation values and uncertainties
//!   ([`observables`])
//!
//! These are tied together by [`solve::solve`]. Plain-text input and output
//! are handled by [`io`].
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod interp;
pub mod potential;
pub mod hamiltonian;
pub mod eigen;
pub mod observables;
pub mod solve;
pub mod io;
pub mod utils;

pub mod docs;

pub(crate) const DEF_MAXITERS_QL: usize = 30;
pub(crate) const DEF_GRID_RTOL: f64 = 1e-6;
pub(crate) const DEF_VARIANCE_TOL: f64 = 1e-10;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;
