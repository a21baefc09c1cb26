// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

//! Running the solver from many initial guesses.

use crate::newton::{NewtonParams, NewtonResult, NewtonSystem};
use crate::traits::PolynomialEval2D;
use crate::util::Tolerance;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use std::error::Error;
use std::fmt;
use tracing::{debug, trace};

/// the largest number of initial guesses a single [`Grid`] may hold
pub const MAX_GRID_SAMPLES: usize = 1 << 26;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InvalidGrid {
    /// the step is zero, negative, not finite, or too small to move off a bound
    Step(f64),
    /// a bound is infinite or NaN
    Bound(f64),
    /// the grid holds more than [`MAX_GRID_SAMPLES`] points
    TooManySamples,
}

impl fmt::Display for InvalidGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            InvalidGrid::Step(step) => {
                write!(f, "invalid grid step: {} (must be finite, positive and resolvable)", step)
            }
            InvalidGrid::Bound(bound) => {
                write!(f, "invalid grid bound: {} (must be finite)", bound)
            }
            InvalidGrid::TooManySamples => {
                write!(f, "grid has more than {} samples", MAX_GRID_SAMPLES)
            }
        }
    }
}

impl Error for InvalidGrid {}

impl From<InvalidGrid> for std::io::Error {
    fn from(err: InvalidGrid) -> Self {
        Self::new(std::io::ErrorKind::InvalidInput, err)
    }
}

/// The rectangle `[x_start, x_end] x [y_start, y_end]` sampled every `step` in both directions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Grid {
    pub x_start: f64,
    pub x_end: f64,
    pub y_start: f64,
    pub y_end: f64,
    pub step: f64,
}

impl Grid {
    pub fn new(
        x_start: f64,
        x_end: f64,
        y_start: f64,
        y_end: f64,
        step: f64,
    ) -> Result<Self, InvalidGrid> {
        let grid = Grid {
            x_start,
            x_end,
            y_start,
            y_end,
            step,
        };
        grid.validate()?;
        Ok(grid)
    }
    pub fn validate(&self) -> Result<(), InvalidGrid> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(InvalidGrid::Step(self.step));
        }
        for &bound in &[self.x_start, self.x_end, self.y_start, self.y_end] {
            if !bound.is_finite() {
                return Err(InvalidGrid::Bound(bound));
            }
        }
        Ok(())
    }
    /// number of sample points along x and along y
    pub fn shape(&self, tolerance: Tolerance) -> Result<(usize, usize), InvalidGrid> {
        self.validate()?;
        let x_len = axis_len(self.x_start, self.x_end, self.step, tolerance)?;
        let y_len = axis_len(self.y_start, self.y_end, self.step, tolerance)?;
        match x_len.checked_mul(y_len) {
            Some(len) if len <= MAX_GRID_SAMPLES => Ok((x_len, y_len)),
            _ => Err(InvalidGrid::TooManySamples),
        }
    }
}

/// the number of `k` where `start + k * step <= end` up to `tolerance`
fn axis_len(start: f64, end: f64, step: f64, tolerance: Tolerance) -> Result<usize, InvalidGrid> {
    let estimate = ((end - start + tolerance.epsilon()) / step).ceil();
    if estimate.is_nan() || estimate > MAX_GRID_SAMPLES as f64 {
        return Err(InvalidGrid::TooManySamples);
    }
    let mut len = estimate.max(0.0) as usize;
    if len > 1 && start + step == start {
        return Err(InvalidGrid::Step(step));
    }
    let point = |k: usize| start + k as f64 * step;
    while len > 0 && !tolerance.is_less_than_or_equal(point(len - 1), end) {
        len -= 1;
    }
    while len < MAX_GRID_SAMPLES && tolerance.is_less_than_or_equal(point(len), end) {
        len += 1;
    }
    Ok(len)
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridSample {
    pub x0: f64,
    pub y0: f64,
    pub result: NewtonResult,
}

/// Iterator over the samples of a grid scan, each guess is solved when it is reached.
#[derive(Debug)]
pub struct GridScan<'a, P> {
    system: &'a NewtonSystem<P>,
    params: &'a NewtonParams,
    grid: Grid,
    y_len: usize,
    next: usize,
    len: usize,
    converged: usize,
}

impl<'a, P: PolynomialEval2D> Iterator for GridScan<'a, P> {
    type Item = GridSample;
    fn next(&mut self) -> Option<GridSample> {
        if self.next >= self.len {
            return None;
        }
        let x0 = self.grid.x_start + (self.next / self.y_len) as f64 * self.grid.step;
        let y0 = self.grid.y_start + (self.next % self.y_len) as f64 * self.grid.step;
        self.next += 1;
        let result = self.system.solve(x0, y0, self.params);
        if result.is_converged() {
            self.converged += 1;
        }
        if self.next == self.len {
            debug!(samples = self.len, converged = self.converged, "grid scan finished");
        }
        Some(GridSample { x0, y0, result })
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl<'a, P: PolynomialEval2D> ExactSizeIterator for GridScan<'a, P> {}

/// Solves `system` from every point of `grid`, x-major, as the returned iterator advances.
///
/// Points are `start + k * step` on each axis, so rounding does not accumulate.
pub fn scan_grid<'a, P: PolynomialEval2D>(
    system: &'a NewtonSystem<P>,
    grid: &Grid,
    params: &'a NewtonParams,
) -> Result<GridScan<'a, P>, InvalidGrid> {
    let (x_len, y_len) = grid.shape(params.tolerance)?;
    debug!(x_len, y_len, step = grid.step, "scanning grid");
    Ok(GridScan {
        system,
        params,
        grid: *grid,
        y_len,
        next: 0,
        len: x_len * y_len,
        converged: 0,
    })
}

/// Solves from `(x0, y0)`, then retries up to `attempts` times from guesses
/// jittered uniformly in `[-radius / 2, radius / 2)` on each axis.
///
/// Returns the first converged result, otherwise the result of the last attempt.
/// The jitter is disabled unless `radius` is finite and `radius / 2` is positive.
#[allow(clippy::too_many_arguments)]
pub fn solve_with_restarts<P: PolynomialEval2D, R: Rng + ?Sized>(
    system: &NewtonSystem<P>,
    x0: f64,
    y0: f64,
    params: &NewtonParams,
    attempts: usize,
    radius: f64,
    rng: &mut R,
) -> NewtonResult {
    let mut result = system.solve(x0, y0, params);
    let half = radius / 2.0;
    let jitter = if radius.is_finite() && half > 0.0 {
        Some(Uniform::new(-half, half))
    } else {
        None
    };
    for attempt in 1..=attempts {
        if result.is_converged() {
            break;
        }
        let (dx, dy) = match &jitter {
            Some(jitter) => (jitter.sample(rng), jitter.sample(rng)),
            None => (0.0, 0.0),
        };
        trace!(
            attempt,
            x = x0 + dx,
            y = y0 + dy,
            previous = ?result.status,
            "restarting"
        );
        result = system.solve(x0 + dx, y0 + dy, params);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newton::NewtonStatus;
    use crate::polynomial::tests::{circle, hyperbola};
    use crate::util::EPSILON;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn system() -> NewtonSystem {
        NewtonSystem::new(circle(), hyperbola())
    }

    #[test]
    fn test_axis_len() {
        let tolerance = Tolerance::DEFAULT;
        assert_eq!(axis_len(-1.0, 1.0, 0.5, tolerance), Ok(5));
        assert_eq!(axis_len(0.0, 0.0, 1.0, tolerance), Ok(1));
        assert_eq!(axis_len(1.0, 0.0, 1.0, tolerance), Ok(0));
        assert_eq!(axis_len(0.0, 1.0, 0.1, tolerance), Ok(11));
        assert_eq!(axis_len(0.0, 1.0 - 5e-7, 0.5, tolerance), Ok(3));
        assert_eq!(axis_len(0.0, 1.0 - 2e-6, 0.5, tolerance), Ok(2));
    }

    #[test]
    fn test_invalid_grid() {
        assert_eq!(Grid::new(0.0, 1.0, 0.0, 1.0, 0.0), Err(InvalidGrid::Step(0.0)));
        assert_eq!(Grid::new(0.0, 1.0, 0.0, 1.0, -0.5), Err(InvalidGrid::Step(-0.5)));
        assert!(matches!(
            Grid::new(0.0, 1.0, 0.0, 1.0, f64::NAN),
            Err(InvalidGrid::Step(_))
        ));
        assert_eq!(
            Grid::new(0.0, f64::INFINITY, 0.0, 1.0, 0.5),
            Err(InvalidGrid::Bound(f64::INFINITY))
        );
        let grid = Grid {
            x_start: 0.0,
            x_end: 1.0,
            y_start: 0.0,
            y_end: 1.0,
            step: 0.0,
        };
        let params = NewtonParams::new();
        assert_eq!(
            scan_grid(&system(), &grid, &params).err(),
            Some(InvalidGrid::Step(0.0))
        );
        assert_eq!(
            InvalidGrid::Step(0.0).to_string(),
            "invalid grid step: 0 (must be finite, positive and resolvable)"
        );
    }

    #[test]
    fn test_oversized_grid() {
        let tolerance = Tolerance::DEFAULT;
        let wide = Grid::new(-1e300, 1e300, 0.0, 0.0, 1.0).unwrap();
        assert_eq!(wide.shape(tolerance), Err(InvalidGrid::TooManySamples));
        let system = system();
        let params = NewtonParams::new();
        assert_eq!(
            scan_grid(&system, &wide, &params).err(),
            Some(InvalidGrid::TooManySamples)
        );
        let huge = Grid::new(-1e308, 1e308, 0.0, 0.0, 1e300).unwrap();
        assert_eq!(huge.shape(tolerance), Err(InvalidGrid::TooManySamples));
        // each axis fits, the product does not
        let square = Grid::new(0.0, 8192.0, 0.0, 8192.0, 1.0).unwrap();
        assert_eq!(square.shape(tolerance), Err(InvalidGrid::TooManySamples));
        let unresolvable = Grid::new(1e17, 1e17 + 100.0, 0.0, 0.0, 1.0).unwrap();
        assert_eq!(unresolvable.shape(tolerance), Err(InvalidGrid::Step(1.0)));
    }

    #[test]
    fn test_scan_grid() {
        let system = system();
        let params = NewtonParams::new().with_max_steps(1000);
        let grid = Grid::new(-3.0, 3.0, -3.0, 3.0, 1.0).unwrap();
        let scan = scan_grid(&system, &grid, &params).unwrap();
        assert_eq!(scan.len(), 49);
        let samples: Vec<GridSample> = scan.collect();
        assert_eq!(samples.len(), 49);
        assert_eq!((samples[0].x0, samples[0].y0), (-3.0, -3.0));
        assert_eq!((samples[1].x0, samples[1].y0), (-3.0, -2.0));
        assert_eq!((samples[7].x0, samples[7].y0), (-2.0, -3.0));
        assert_eq!((samples[48].x0, samples[48].y0), (3.0, 3.0));
        for sample in &samples {
            assert_eq!(sample.result, system.solve(sample.x0, sample.y0, &params));
            if sample.x0.abs() == sample.y0.abs() {
                assert_eq!(sample.result.status, NewtonStatus::SingularJacobian);
            }
            if let Some((x, y)) = sample.result.converged_root() {
                let (zf, zg) = system.residual(x, y);
                assert!(zf.abs() < EPSILON && zg.abs() < EPSILON);
            }
        }
    }

    #[test]
    fn test_scan_grid_is_lazy() {
        let system = system();
        let params = NewtonParams::new().with_max_steps(1000);
        let grid = Grid::new(0.0, 4095.0, 0.0, 4095.0, 1.0).unwrap();
        let mut scan = scan_grid(&system, &grid, &params).unwrap();
        assert_eq!(scan.len(), 4096 * 4096);
        let first = scan.next().unwrap();
        assert_eq!((first.x0, first.y0), (0.0, 0.0));
        let second = scan.next().unwrap();
        assert_eq!((second.x0, second.y0), (0.0, 1.0));
        assert_eq!(scan.len(), 4096 * 4096 - 2);
    }

    #[test]
    fn test_restarts_leave_singular_diagonal() {
        let system = system();
        let params = NewtonParams::new().with_max_steps(1000);
        let mut rng = Pcg64Mcg::seed_from_u64(0);
        let result = solve_with_restarts(&system, 4.0, 4.0, &params, 10, 1.0, &mut rng);
        assert!(result.is_converged());
        let (x, y) = result.root;
        let (zf, zg) = system.residual(x, y);
        assert!(zf.abs() < EPSILON && zg.abs() < EPSILON);
    }

    #[test]
    fn test_restarts_without_attempts() {
        let system = system();
        let params = NewtonParams::new();
        let mut rng = Pcg64Mcg::seed_from_u64(0);
        let result = solve_with_restarts(&system, 4.0, 4.0, &params, 0, 1.0, &mut rng);
        assert_eq!(result.status, NewtonStatus::SingularJacobian);
        let result = solve_with_restarts(&system, 4.0, 4.0, &params, 5, 0.0, &mut rng);
        assert_eq!(result.status, NewtonStatus::SingularJacobian);
        let result = solve_with_restarts(&system, 2.0, 1.0, &params, 5, 1.0, &mut rng);
        assert_eq!(result, system.solve(2.0, 1.0, &params));
    }

    #[test]
    fn test_restarts_with_subnormal_radius() {
        let system = system();
        let params = NewtonParams::new();
        let mut rng = Pcg64Mcg::seed_from_u64(0);
        for &radius in &[5e-324, f64::MIN_POSITIVE * f64::EPSILON, f64::NAN, -1.0] {
            let result = solve_with_restarts(&system, 4.0, 4.0, &params, 3, radius, &mut rng);
            assert_eq!(result.status, NewtonStatus::SingularJacobian);
        }
    }
}
