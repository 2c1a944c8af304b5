//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Finite differences](#finite-differences)
//! - [Tridiagonal eigenproblems](#tridiagonal-eigenproblems)
//! - [Observables](#observables)
//! - [Interpolation](#interpolation)
//! - [Units](#units)
//!
//! # Background
//! Bound states of a particle of mass *m* in a one-dimensional potential
//! *V*(*x*) are solutions of the time-independent Schrödinger equation (TISE),
//! ```text
//!    ħ² ∂²
//! - --- --- ψ(x) + V(x) ψ(x) = E ψ(x)
//!   2 m ∂x²
//! ```
//! i.e. eigenpairs of the Hamiltonian operator. Since the Hamiltonian is
//! Hermitian and real in position space, its eigenvalues are real and its
//! eigenfunctions can be chosen real-valued as well. Confining the problem to a
//! finite domain \[*x*<sub>min</sub>, *x*<sub>max</sub>\] with *ψ* = 0 outside
//! of it (hard walls) makes the whole spectrum discrete.
//!
//! # Finite differences
//! Assuming a uniform discretization
//! ```text
//! x[i] = xmin + i δx, i ∊ {0, ..., N - 1}
//! δx = (xmax - xmin) / (N - 1)
//! ψ[i] = ψ(x[i])
//! ```
//! the second derivative is replaced by the three-point central difference
//! ```text
//! ∂²ψ       ψ[i + 1] - 2 ψ[i] + ψ[i - 1]
//! --- [i] ≈ ----------------------------
//! ∂x²                   δx²
//! ```
//! which has an error term of *O*(*δx*²). Taking *ψ*\[-1\] = *ψ*\[*N*\] = 0,
//! the TISE becomes the matrix eigenvalue problem *H* *ψ* = *E* *ψ* with
//! ```text
//! H[i, i]     = a + V[i]
//! H[i, i ± 1] = -a / 2
//! a = 1 / (m δx²)
//! ```
//! in units where *ħ* = 1 (see [below](#units)). *H* is real, symmetric, and
//! tridiagonal, so only 2 *N* - 1 numbers need to be stored, and the
//! eigenvectors returned by any orthogonal method have unit discrete norm,
//! Σ *ψ*\[*i*\]² = 1. Note that this is *not* the continuum normalization
//! ∫ |*ψ*|² d*x* = 1; the two differ by a factor of *δx*.
//!
//! The spectrum of *H* approximates the spectrum of the continuum operator
//! from below for low-lying states; states with energies comparable to *a*
//! are dominated by the lattice and should not be trusted.
//!
//! # Tridiagonal eigenproblems
//! A symmetric tridiagonal matrix is diagonalized here by the implicit QL
//! algorithm[^1]. Each iteration applies a sequence of Givens rotations that
//! is equivalent to a QL decomposition of *H* - *σ* *I* followed by
//! recombination in reverse order,
//! ```text
//! H - σ I = Q L
//! H'      = L Q + σ I = Qᵀ H Q
//! ```
//! which preserves both the spectrum and the tridiagonal structure while
//! driving the off-diagonal elements to zero. The shift *σ* is chosen as the
//! eigenvalue of the leading 2×2 block closest to its first diagonal element
//! (the Wilkinson shift), which gives cubic convergence in practice. Once an
//! off-diagonal element is negligible relative to its neighboring diagonal
//! elements, the matrix splits and the leading eigenvalue is deflated. The
//! product of all rotations gives the eigenvectors. The total cost is
//! *O*(*N*²) for eigenvalues and *O*(*N*³) when eigenvectors are accumulated,
//! with only *O*(*N*) extra storage beyond the eigenvector matrix.
//!
//! When only eigenvalues are required, Sturm sequence bisection is an
//! alternative. For a trial value *λ*, the recurrence
//! ```text
//! q[0] = d[0] - λ
//! q[i] = d[i] - λ - e[i - 1]² / q[i - 1]
//! ```
//! produces a sequence whose number of negative elements equals the number of
//! eigenvalues less than *λ*. All eigenvalues lie within the union of the
//! Gershgorin intervals \[*d*\[*i*\] - *r*\[*i*\], *d*\[*i*\] + *r*\[*i*\]\]
//! (with *r*\[*i*\] = |*e*\[*i* - 1\]| + |*e*\[*i*\]|), so each one can be
//! isolated by bisection on the count to machine precision in roughly 50
//! steps, independently of all others.
//!
//! # Observables
//! For an eigenvector with unit discrete norm, the position expectation value
//! and uncertainty are
//! ```text
//! ⟨x⟩  = Σ x[i] ψ[i]²
//! ⟨x²⟩ = Σ x[i]² ψ[i]²
//! σₓ   = √(⟨x²⟩ - ⟨x⟩²)
//! ```
//! Both depend only on *ψ*², and hence are insensitive to the overall sign
//! of the eigenvector. Mathematically the variance is non-negative, but it is
//! computed as a difference of two nearly equal numbers for strongly localized
//! states and can come out slightly negative through rounding.
//!
//! # Interpolation
//! Potentials are usually known only at a handful of points, and must be
//! resampled onto the solution grid. Three schemes are available:
//! - Piecewise linear: continuous, but with kinks at every sample.
//! - Natural cubic spline: a piecewise cubic with continuous first and second
//!   derivatives, with second derivative equal to zero at both ends. The
//!   second derivatives at interior samples solve a diagonally dominant
//!   tridiagonal system.
//! - Polynomial: the least-squares polynomial of degree *n* - 1 through all *n*
//!   samples, which interpolates exactly in exact arithmetic. High degrees
//!   are liable to oscillate wildly between samples (Runge's phenomenon), so
//!   this should only be used with few samples.
//!
//! # Units
//! All functions in this crate work with the TISE in natural (dimensionless)
//! units with *ħ* = 1. Starting from the expression above, choose a
//! characteristic length scale *L* and change variables using *x'* ≡ *x* /
//! *L*, so that
//! ```text
//! dx = L dx' ⇒ (∂²/∂x²) = (1/L²) (∂²/∂(x')²)
//! ```
//! The kinetic coefficient becomes *ħ*²/2 *m* *L*², which has units of energy.
//! Measuring energies in units of *ħ*²/*m*<sub>0</sub> *L*² for some reference
//! mass *m*<sub>0</sub>, and masses in units of *m*<sub>0</sub>, gives
//! ```text
//!    1  ∂²
//! - --- ---- ψ(x') + V'(x') ψ(x') = E' ψ(x')
//!   2 m ∂x'²
//! ```
//! which is the form solved here. For example, with *V*(*x*) = *x*²/2 and
//! *m* = 1, the energies are *E*<sub>*n*</sub> = *n* + 1/2.
//!
//! [^1]: W. H. Press, S. A. Teukolsky, W. T. Vetterling, and B. P. Flannery,
//! *Numerical Recipes: The Art of Scientific Computing*, 3rd ed., §11.4.
//! Cambridge University Press (2007).
