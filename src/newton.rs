// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

//! Newton-Raphson iteration for a system of two equations in two unknowns.
//!
//! Each step solves `J * (h, k) = -(f, g)` in closed form, where `J` is the
//! Jacobian `[[fx, fy], [gx, gy]]` evaluated at the current point.

use crate::polynomial::Polynomial2D;
use crate::traits::{PartialDerivative, PolynomialEval2D};
use crate::util::Tolerance;
use tracing::{debug, trace};

/// Parameters of the 2D Newton iteration
#[derive(Clone, Debug, PartialEq)]
pub struct NewtonParams {
    /// Tolerance for the singular Jacobian test and the stopping test
    pub tolerance: Tolerance,
    /// Maximum number of steps, at least one step is always taken
    pub max_steps: usize,
    /// Record every iterate in [`NewtonResult::history`]
    pub return_history: bool,
}

impl NewtonParams {
    /// Creates a new [`NewtonParams`] struct with default parameter values.
    pub fn new() -> Self {
        NewtonParams {
            tolerance: Tolerance::DEFAULT,
            max_steps: usize::MAX,
            return_history: false,
        }
    }
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }
    pub fn with_history(mut self, return_history: bool) -> Self {
        self.return_history = return_history;
        self
    }
}

impl Default for NewtonParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Why the iteration stopped
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NewtonStatus {
    /// The step error stopped changing (up to the tolerance)
    Converged,
    /// The Jacobian determinant was zero (up to the tolerance), the root is `(inf, inf)`
    SingularJacobian,
    /// The step error became infinite or NaN
    NonFinite,
    /// [`NewtonParams::max_steps`] steps were taken
    MaxSteps,
}

/// One iterate: the point after a step and the length of that step
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub x: f64,
    pub y: f64,
    /// Euclidean length of the step, `inf` for the initial guess
    pub error: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewtonResult {
    /// Number of steps taken, not counting the initial guess
    pub iterations: usize,
    pub root: (f64, f64),
    /// The initial guess followed by one entry per step, empty unless requested
    pub history: Vec<HistoryEntry>,
    pub status: NewtonStatus,
}

impl NewtonResult {
    pub fn is_converged(&self) -> bool {
        self.status == NewtonStatus::Converged
    }
    /// the root if the iteration converged to a finite point
    pub fn converged_root(&self) -> Option<(f64, f64)> {
        let (x, y) = self.root;
        if self.is_converged() && x.is_finite() && y.is_finite() {
            Some(self.root)
        } else {
            None
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn iterate<P: PolynomialEval2D + ?Sized>(
    f: &P,
    fx: &P,
    fy: &P,
    g: &P,
    gx: &P,
    gy: &P,
    x0: f64,
    y0: f64,
    params: &NewtonParams,
) -> NewtonResult {
    let tolerance = params.tolerance;
    let (mut x, mut y) = (x0, y0);
    let mut error = 0.0;
    let mut iterations = 0;
    let mut history = Vec::new();
    if params.return_history {
        history.push(HistoryEntry {
            x: x0,
            y: y0,
            error: f64::INFINITY,
        });
    }
    let status = loop {
        // J = [[a, b], [c, d]]
        let a = fx.eval(x, y);
        let b = fy.eval(x, y);
        let c = gx.eval(x, y);
        let d = gy.eval(x, y);
        let zf = f.eval(x, y);
        let zg = g.eval(x, y);
        let det = a * d - b * c;
        if tolerance.is_less_than_or_equal(det.abs(), tolerance.epsilon()) {
            x = f64::INFINITY;
            y = f64::INFINITY;
            break NewtonStatus::SingularJacobian;
        }
        let h = (-d * zf + b * zg) / det;
        let k = (c * zf - a * zg) / det;
        let previous_error = error;
        error = (h * h + k * k).sqrt();
        x += h;
        y += k;
        if params.return_history {
            history.push(HistoryEntry { x, y, error });
        }
        iterations += 1;
        trace!(iteration = iterations, x, y, error, delta = error - previous_error, "newton step");
        if !error.is_finite() {
            break NewtonStatus::NonFinite;
        }
        if !tolerance.is_greater_than((error - previous_error).abs(), tolerance.epsilon()) {
            break NewtonStatus::Converged;
        }
        if iterations >= params.max_steps {
            break NewtonStatus::MaxSteps;
        }
    };
    debug!(?status, iterations, x, y, x0, y0, "newton solve finished");
    NewtonResult {
        iterations,
        root: (x, y),
        history,
        status,
    }
}

/// Runs the iteration with already computed partial derivatives.
///
/// Prefer this over [`newton_method_2d_from`] when solving the same system
/// from many initial guesses.
#[allow(clippy::too_many_arguments)]
pub fn newton_method_2d<P: PolynomialEval2D + ?Sized>(
    f: &P,
    fx: &P,
    fy: &P,
    g: &P,
    gx: &P,
    gy: &P,
    x0: f64,
    y0: f64,
    return_history: bool,
) -> NewtonResult {
    let params = NewtonParams::new().with_history(return_history);
    iterate(f, fx, fy, g, gx, gy, x0, y0, &params)
}

/// Differentiates `f` and `g`, then runs [`newton_method_2d`].
pub fn newton_method_2d_from<P>(
    f: &P,
    g: &P,
    x0: f64,
    y0: f64,
    return_history: bool,
) -> NewtonResult
where
    P: PolynomialEval2D,
    for<'a> &'a P: PartialDerivative<P>,
{
    let fx = PartialDerivative::diff_x(f);
    let fy = PartialDerivative::diff_y(f);
    let gx = PartialDerivative::diff_x(g);
    let gy = PartialDerivative::diff_y(g);
    newton_method_2d(f, &fx, &fy, g, &gx, &gy, x0, y0, return_history)
}

/// The pair `f(x, y) = 0`, `g(x, y) = 0` together with its four partial derivatives.
#[derive(Clone, Debug, PartialEq)]
pub struct NewtonSystem<P = Polynomial2D> {
    f: P,
    fx: P,
    fy: P,
    g: P,
    gx: P,
    gy: P,
}

impl<P: PolynomialEval2D> NewtonSystem<P> {
    pub fn new(f: P, g: P) -> Self
    where
        for<'a> &'a P: PartialDerivative<P>,
    {
        let fx = PartialDerivative::diff_x(&f);
        let fy = PartialDerivative::diff_y(&f);
        let gx = PartialDerivative::diff_x(&g);
        let gy = PartialDerivative::diff_y(&g);
        Self::from_derivatives(f, fx, fy, g, gx, gy)
    }
    pub fn from_derivatives(f: P, fx: P, fy: P, g: P, gx: P, gy: P) -> Self {
        NewtonSystem {
            f,
            fx,
            fy,
            g,
            gx,
            gy,
        }
    }
    pub fn f(&self) -> &P {
        &self.f
    }
    pub fn g(&self) -> &P {
        &self.g
    }
    /// `(f(x, y), g(x, y))`
    pub fn residual(&self, x: f64, y: f64) -> (f64, f64) {
        (self.f.eval(x, y), self.g.eval(x, y))
    }
    /// `det [[fx, fy], [gx, gy]]` at `(x, y)`
    pub fn jacobian_determinant(&self, x: f64, y: f64) -> f64 {
        self.fx.eval(x, y) * self.gy.eval(x, y) - self.fy.eval(x, y) * self.gx.eval(x, y)
    }
    pub fn solve(&self, x0: f64, y0: f64, params: &NewtonParams) -> NewtonResult {
        iterate(
            &self.f, &self.fx, &self.fy, &self.g, &self.gx, &self.gy, x0, y0, params,
        )
    }
}
