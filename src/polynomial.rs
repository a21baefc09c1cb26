// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information
use crate::array2d::Array2D;
use crate::traits::{PartialDerivative, PolynomialEval2D};
use crate::util::{is_equal, is_zero, Sign, Tolerance};
use std::convert::TryFrom;
use std::error::Error;
use std::fmt;

mod add_sub;
mod mul;
mod parse;

pub use self::parse::{ParseErrorKind, ParsePolynomialError};

/// exponents in either variable must be less than this
pub const MAX_DEGREE: usize = 256;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DegreeOutOfRange {
    pub exp_x: usize,
    pub exp_y: usize,
}

impl fmt::Display for DegreeOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "exponent pair ({}, {}) is out of range, the max degree is {}",
            self.exp_x, self.exp_y, MAX_DEGREE
        )
    }
}

impl Error for DegreeOutOfRange {}

impl From<DegreeOutOfRange> for std::io::Error {
    fn from(err: DegreeOutOfRange) -> Self {
        Self::new(std::io::ErrorKind::InvalidInput, err)
    }
}

fn check_range(exp_x: usize, exp_y: usize) -> Result<(), DegreeOutOfRange> {
    if exp_x >= MAX_DEGREE || exp_y >= MAX_DEGREE {
        Err(DegreeOutOfRange { exp_x, exp_y })
    } else {
        Ok(())
    }
}

/// A dense polynomial in two variables with `f64` coefficients.
///
/// the term at `(i, j)` is `self.get(i, j) * pow(x, i) * pow(y, j)`
///
/// # Invariants
///
/// `live_x[i]` is the number of coefficients `(i, _)` where `!is_zero(c)`,
/// likewise `live_y[j]` for `(_, j)`. `degree_x` and `degree_y` are the
/// largest exponents with a live term, or 0 when there are none.
#[derive(Clone, Debug, Default)]
pub struct Polynomial2D {
    coefficients: Array2D<f64>,
    live_x: Vec<usize>,
    live_y: Vec<usize>,
    degree_x: usize,
    degree_y: usize,
}

impl Polynomial2D {
    /// the zero polynomial
    pub fn new() -> Self {
        Self::default()
    }
    /// builds a polynomial from a nested sequence of coefficients,
    /// the outer index is the exponent of `x`, the inner index the exponent of `y`
    ///
    /// ```
    /// # use newton2d::polynomial::Polynomial2D;
    /// // x^2 + y^2 - 9
    /// let f = Polynomial2D::from_rows(vec![
    ///     vec![-9.0, 0.0, 1.0],
    ///     vec![0.0, 0.0, 0.0],
    ///     vec![1.0, 0.0, 0.0],
    /// ])
    /// .unwrap();
    /// assert_eq!(f.eval(3.0, 0.0), 0.0);
    /// assert_eq!(f.to_string(), "x^2 + y^2 - 9");
    /// ```
    pub fn from_rows<I, R>(rows: I) -> Result<Self, DegreeOutOfRange>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = f64>,
    {
        let mut retval = Self::default();
        for (exp_x, row) in rows.into_iter().enumerate() {
            for (exp_y, value) in row.into_iter().enumerate() {
                retval.set(exp_x, exp_y, value)?;
            }
        }
        Ok(retval)
    }
    /// `coefficient * pow(x, exp_x) * pow(y, exp_y)`
    pub fn monomial(
        coefficient: f64,
        exp_x: usize,
        exp_y: usize,
    ) -> Result<Self, DegreeOutOfRange> {
        let mut retval = Self::default();
        retval.set(exp_x, exp_y, coefficient)?;
        Ok(retval)
    }
    pub fn degree_x(&self) -> usize {
        self.degree_x
    }
    pub fn degree_y(&self) -> usize {
        self.degree_y
    }
    /// the raw coefficient table, which may extend past the effective degrees
    pub fn coefficients(&self) -> &Array2D<f64> {
        &self.coefficients
    }
    pub fn get(&self, exp_x: usize, exp_y: usize) -> Result<f64, DegreeOutOfRange> {
        check_range(exp_x, exp_y)?;
        Ok(self.coefficient(exp_x, exp_y))
    }
    pub fn set(&mut self, exp_x: usize, exp_y: usize, value: f64) -> Result<(), DegreeOutOfRange> {
        check_range(exp_x, exp_y)?;
        self.update(exp_x, exp_y, value);
        Ok(())
    }
    /// iterates over the terms that are non-zero within tolerance,
    /// yielding `((exp_x, exp_y), coefficient)` in ascending order
    pub fn terms(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        let degree_y = self.degree_y;
        (0..=self.degree_x).flat_map(move |exp_x| {
            (0..=degree_y).filter_map(move |exp_y| {
                let value = self.coefficient(exp_x, exp_y);
                if is_zero(value) {
                    None
                } else {
                    Some(((exp_x, exp_y), value))
                }
            })
        })
    }
    /// compares every coefficient up to the larger of the two degrees within `tolerance`
    pub fn approx_eq(&self, rhs: &Self, tolerance: Tolerance) -> bool {
        let degree_x = self.degree_x.max(rhs.degree_x);
        let degree_y = self.degree_y.max(rhs.degree_y);
        (0..=degree_x).all(|i| {
            (0..=degree_y)
                .all(|j| tolerance.is_equal(self.coefficient(i, j), rhs.coefficient(i, j)))
        })
    }
    pub fn diff_x(&self) -> Self {
        let mut retval = Self::default();
        // x^0 terms vanish
        for i in 1..=self.degree_x {
            for j in 0..=self.degree_y {
                retval.update(i - 1, j, self.coefficient(i, j) * i as f64);
            }
        }
        retval
    }
    pub fn diff_y(&self) -> Self {
        let mut retval = Self::default();
        // y^0 terms vanish
        for i in 0..=self.degree_x {
            for j in 1..=self.degree_y {
                retval.update(i, j - 1, self.coefficient(i, j) * j as f64);
            }
        }
        retval
    }
    pub fn eval(&self, x: f64, y: f64) -> f64 {
        let powers_x = powers(x, self.degree_x);
        let powers_y = powers(y, self.degree_y);
        let mut retval = 0.0;
        for (i, &power_x) in powers_x.iter().enumerate() {
            let row = self.coefficients.row(i);
            for (&coefficient, &power_y) in row.iter().zip(&powers_y) {
                retval += coefficient * power_x * power_y;
            }
        }
        retval
    }
    /// coefficient without range checking, zero outside the allocated table
    fn coefficient(&self, exp_x: usize, exp_y: usize) -> f64 {
        self.coefficients
            .get(exp_x, exp_y)
            .copied()
            .unwrap_or(0.0)
    }
    /// stores `value` and keeps the degree tracking consistent,
    /// the caller must have checked the range
    fn update(&mut self, exp_x: usize, exp_y: usize, value: f64) {
        debug_assert!(check_range(exp_x, exp_y).is_ok());
        if self.coefficients.get(exp_x, exp_y).is_none() {
            if value == 0.0 {
                return;
            }
            self.reserve(exp_x, exp_y);
        }
        let old_value = self.coefficients[(exp_x, exp_y)];
        match (is_zero(old_value), is_zero(value)) {
            (true, false) => self.insert_live(exp_x, exp_y),
            (false, true) => self.remove_live(exp_x, exp_y),
            _ => {}
        }
        self.coefficients[(exp_x, exp_y)] = value;
    }
    fn reserve(&mut self, exp_x: usize, exp_y: usize) {
        let x_size = self.coefficients.x_size().max(exp_x + 1);
        let y_size = self.coefficients.y_size().max(exp_y + 1);
        self.coefficients.resize(x_size, y_size, 0.0);
        self.live_x.resize(x_size, 0);
        self.live_y.resize(y_size, 0);
    }
    fn insert_live(&mut self, exp_x: usize, exp_y: usize) {
        self.live_x[exp_x] += 1;
        self.live_y[exp_y] += 1;
        self.degree_x = self.degree_x.max(exp_x);
        self.degree_y = self.degree_y.max(exp_y);
    }
    fn remove_live(&mut self, exp_x: usize, exp_y: usize) {
        self.live_x[exp_x] -= 1;
        self.live_y[exp_y] -= 1;
        while self.degree_x > 0 && self.live_x[self.degree_x] == 0 {
            self.degree_x -= 1;
        }
        while self.degree_y > 0 && self.live_y[self.degree_y] == 0 {
            self.degree_y -= 1;
        }
    }
    fn has_live_terms(&self) -> bool {
        self.live_x.iter().any(|&count| count != 0)
    }
}

/// `[1, base, base^2, ..., base^degree]`, even powers are squares of half powers
fn powers(base: f64, degree: usize) -> Vec<f64> {
    let mut retval = Vec::with_capacity(degree + 1);
    retval.push(1.0);
    for n in 1..=degree {
        let next = if n & 1 != 0 {
            retval[n - 1] * base
        } else {
            retval[n >> 1] * retval[n >> 1]
        };
        retval.push(next);
    }
    retval
}

impl TryFrom<Vec<Vec<f64>>> for Polynomial2D {
    type Error = DegreeOutOfRange;
    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, DegreeOutOfRange> {
        Self::from_rows(rows)
    }
}

/// exact comparison: equal degrees and every coefficient equal under `f64::eq`
impl PartialEq for Polynomial2D {
    fn eq(&self, rhs: &Self) -> bool {
        if self.degree_x != rhs.degree_x || self.degree_y != rhs.degree_y {
            return false;
        }
        let x_size = self.coefficients.x_size().max(rhs.coefficients.x_size());
        let y_size = self.coefficients.y_size().max(rhs.coefficients.y_size());
        (0..x_size).all(|i| (0..y_size).all(|j| self.coefficient(i, j) == rhs.coefficient(i, j)))
    }
}

impl num_traits::Zero for Polynomial2D {
    fn zero() -> Self {
        Default::default()
    }
    fn set_zero(&mut self) {
        *self = Default::default();
    }
    fn is_zero(&self) -> bool {
        !self.has_live_terms()
    }
}

impl PolynomialEval2D for Polynomial2D {
    fn eval(&self, x: f64, y: f64) -> f64 {
        Polynomial2D::eval(self, x, y)
    }
}

impl<'a> PartialDerivative<Polynomial2D> for &'a Polynomial2D {
    fn diff_x(self) -> Polynomial2D {
        Polynomial2D::diff_x(self)
    }
    fn diff_y(self) -> Polynomial2D {
        Polynomial2D::diff_y(self)
    }
}

fn write_coefficient(f: &mut fmt::Formatter, value: f64) -> fmt::Result {
    match f.precision() {
        Some(precision) => write!(f, "{:.*}", precision, value),
        None => write!(f, "{}", value),
    }
}

/// Writes the terms in descending order, e.g. `x^2 - 3*x*y + y^2 - 9`.
///
/// The alternate format (`"{:#}"`) writes the raw coefficient table instead.
impl fmt::Display for Polynomial2D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            return fmt::Display::fmt(&self.coefficients, f);
        }
        if self.degree_x == 0 && self.degree_y == 0 {
            return write_coefficient(f, self.coefficient(0, 0));
        }
        let mut is_first_term = true;
        for i in (0..=self.degree_x).rev() {
            for j in (0..=self.degree_y).rev() {
                let coefficient = self.coefficient(i, j);
                if is_zero(coefficient) {
                    continue;
                }
                let sign = Sign::of(coefficient);
                if is_first_term {
                    if sign == Sign::Negative {
                        write!(f, "-")?;
                    }
                } else {
                    write!(f, " {} ", sign.symbol())?;
                }
                is_first_term = false;
                let is_constant = i == 0 && j == 0;
                if is_constant || !is_equal(coefficient.abs(), 1.0) {
                    write_coefficient(f, coefficient.abs())?;
                    if !is_constant {
                        write!(f, "*")?;
                    }
                }
                if i > 0 {
                    write!(f, "x")?;
                    if i > 1 {
                        write!(f, "^{}", i)?;
                    }
                    if j > 0 {
                        write!(f, "*")?;
                    }
                }
                if j > 0 {
                    write!(f, "y")?;
                    if j > 1 {
                        write!(f, "^{}", j)?;
                    }
                }
            }
        }
        Ok(())
    }
}
