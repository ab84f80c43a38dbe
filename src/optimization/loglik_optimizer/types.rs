//! loglik_optimizer::types — numeric aliases and pre-wired solver types.
//!
//! Purpose
//! -------
//! Name the handful of concrete types the optimizer works with so that the
//! adapter, builders, runner and model code agree on shapes without
//! repeating `ndarray` or argmin generics.
//!
//! Key behaviors
//! -------------
//! - `Theta`, `Grad`, `Hessian`, `Cost`: the vector, matrix and scalar
//!   shapes of every objective evaluation.
//! - `FnEvalMap`: argmin's evaluation counters as surfaced in
//!   `OptimOutcome::fn_evals`.
//! - Solver aliases fixing L-BFGS to either line search over those shapes.
//!
//! Invariants & assumptions
//! ------------------------
//! - Everything is `f64`. `Cost` lives in minimization space (`−ℓ`); the
//!   sign flip happens in the adapter and the runner, never here.
//! - For the GJR-GARCH-t model `Theta` has length 7 and `Hessian` is 7 × 7.
//!
//! Testing notes
//! -------------
//! - Aliases only; exercised by the builder, runner and API tests.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Unconstrained parameter vector `θ`.
pub type Theta = Array1<f64>;

/// Gradient with respect to `θ`, same length as [`Theta`].
pub type Grad = Array1<f64>;

/// Dense `k × k` Hessian.
pub type Hessian = Array2<f64>;

/// Scalar objective value.
pub type Cost = f64;

/// argmin function-evaluation counters (`"cost_count"`, `"gradient_count"`).
pub type FnEvalMap = HashMap<String, u64>;

/// Default L-BFGS history size.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Hager–Zhang line search over the optimizer shapes.
pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;
/// More–Thuente line search over the optimizer shapes.
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;
/// L-BFGS with a Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;
/// L-BFGS with a More–Thuente line search (the default).
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
