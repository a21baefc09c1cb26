// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

/// a real-valued function of two real variables
pub trait PolynomialEval2D {
    fn eval(&self, x: f64, y: f64) -> f64;
}

impl<'a, T: PolynomialEval2D + ?Sized> PolynomialEval2D for &'a T {
    fn eval(&self, x: f64, y: f64) -> f64 {
        (**self).eval(x, y)
    }
}

/// first-order partial derivatives with respect to `x` and `y`
pub trait PartialDerivative<Output = Self> {
    fn diff_x(self) -> Output;
    fn diff_y(self) -> Output;
}
