// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information
use std::ops::Mul;

/// absolute tolerance used by every approximate comparison in this crate
pub const EPSILON: f64 = 1e-6;

/// An absolute tolerance for comparing `f64` values.
///
/// All comparisons are absolute, not relative:
/// `is_less_than(a, b)` means `a - b < -epsilon`,
/// `is_greater_than(a, b)` means `a - b > epsilon`, and so on.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Tolerance(f64);

impl Tolerance {
    pub const DEFAULT: Tolerance = Tolerance(EPSILON);

    /// `epsilon` must be finite and non-negative
    pub fn new(epsilon: f64) -> Option<Tolerance> {
        if epsilon.is_finite() && epsilon >= 0.0 {
            Some(Tolerance(epsilon))
        } else {
            None
        }
    }
    pub fn epsilon(self) -> f64 {
        self.0
    }
    pub fn is_zero(self, a: f64) -> bool {
        a.abs() < self.0
    }
    pub fn is_equal(self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.0
    }
    pub fn is_not_equal(self, a: f64, b: f64) -> bool {
        (a - b).abs() > self.0
    }
    pub fn is_less_than(self, a: f64, b: f64) -> bool {
        a - b < -self.0
    }
    pub fn is_less_than_or_equal(self, a: f64, b: f64) -> bool {
        a - b < self.0
    }
    pub fn is_greater_than(self, a: f64, b: f64) -> bool {
        a - b > self.0
    }
    pub fn is_greater_than_or_equal(self, a: f64, b: f64) -> bool {
        a - b > -self.0
    }
}

impl Default for Tolerance {
    fn default() -> Tolerance {
        Tolerance::DEFAULT
    }
}

pub fn is_zero(a: f64) -> bool {
    Tolerance::DEFAULT.is_zero(a)
}

/// true for `-0.0` and every other value with the sign bit set
pub fn is_negative(a: f64) -> bool {
    a.is_sign_negative()
}

pub fn is_equal(a: f64, b: f64) -> bool {
    Tolerance::DEFAULT.is_equal(a, b)
}

pub fn is_not_equal(a: f64, b: f64) -> bool {
    Tolerance::DEFAULT.is_not_equal(a, b)
}

pub fn is_less_than(a: f64, b: f64) -> bool {
    Tolerance::DEFAULT.is_less_than(a, b)
}

pub fn is_less_than_or_equal(a: f64, b: f64) -> bool {
    Tolerance::DEFAULT.is_less_than_or_equal(a, b)
}

pub fn is_greater_than(a: f64, b: f64) -> bool {
    Tolerance::DEFAULT.is_greater_than(a, b)
}

pub fn is_greater_than_or_equal(a: f64, b: f64) -> bool {
    Tolerance::DEFAULT.is_greater_than_or_equal(a, b)
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Sign {
    Negative,
    Positive,
}

impl Sign {
    /// sign of a float, taken from the sign bit so `-0.0` is negative
    pub fn of(v: f64) -> Sign {
        is_negative(v).into()
    }
    pub fn symbol(self) -> char {
        match self {
            Sign::Negative => '-',
            Sign::Positive => '+',
        }
    }
}

impl Mul<f64> for Sign {
    type Output = f64;
    fn mul(self, rhs: f64) -> f64 {
        match self {
            Sign::Negative => -rhs,
            Sign::Positive => rhs,
        }
    }
}

impl From<bool> for Sign {
    fn from(is_negative: bool) -> Sign {
        if is_negative {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fmt;

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn test_op_helper<
        T: Clone + PartialEq + fmt::Debug,
        OpEqMove: Fn(&mut T, T),
        OpEqRef: Fn(&mut T, &T),
        OpRefRef: Fn(&T, &T) -> T,
        OpMoveRef: Fn(T, &T) -> T,
        OpRefMove: Fn(&T, T) -> T,
        OpMoveMove: Fn(T, T) -> T,
    >(
        l: T,
        r: T,
        expected: &T,
        op_eq_move: OpEqMove,
        op_eq_ref: OpEqRef,
        op_ref_ref: OpRefRef,
        op_move_ref: OpMoveRef,
        op_ref_move: OpRefMove,
        op_move_move: OpMoveMove,
    ) {
        let mut eq_move_result = l.clone();
        op_eq_move(&mut eq_move_result, r.clone());
        assert_eq!(eq_move_result, *expected);
        let mut eq_ref_result = l.clone();
        op_eq_ref(&mut eq_ref_result, &r);
        assert_eq!(eq_ref_result, *expected);
        assert_eq!(op_ref_ref(&l, &r), *expected);
        assert_eq!(op_ref_move(&l, r.clone()), *expected);
        assert_eq!(op_move_ref(l.clone(), &r), *expected);
        assert_eq!(op_move_move(l, r), *expected);
    }

    #[test]
    fn test_comparisons() {
        assert!(is_zero(0.0));
        assert!(is_zero(-5e-7));
        assert!(!is_zero(2e-6));
        assert!(is_equal(1.0, 1.0 + 5e-7));
        assert!(!is_equal(1.0, 1.0 + 2e-6));
        assert!(is_not_equal(1.0, 1.0 + 2e-6));
        assert!(!is_not_equal(1.0, 1.0 + 5e-7));
        assert!(is_less_than(1.0, 2.0));
        assert!(!is_less_than(1.0, 1.0 + 5e-7));
        assert!(is_less_than_or_equal(1.0 + 5e-7, 1.0));
        assert!(!is_less_than_or_equal(1.0 + 2e-6, 1.0));
        assert!(is_greater_than(2.0, 1.0));
        assert!(!is_greater_than(1.0 + 5e-7, 1.0));
        assert!(is_greater_than_or_equal(1.0 - 5e-7, 1.0));
        assert!(!is_greater_than_or_equal(1.0 - 2e-6, 1.0));
    }

    #[test]
    fn test_comparisons_with_nan() {
        assert!(!is_zero(f64::NAN));
        assert!(!is_greater_than(f64::NAN, 0.0));
        assert!(!is_less_than_or_equal(f64::NAN, 0.0));
    }

    #[test]
    fn test_tolerance() {
        let tolerance = Tolerance::new(0.5).unwrap();
        assert_eq!(tolerance.epsilon(), 0.5);
        assert!(tolerance.is_zero(0.25));
        assert!(tolerance.is_equal(1.0, 1.25));
        assert!(!tolerance.is_greater_than(1.25, 1.0));
        assert_eq!(Tolerance::new(-1.0), None);
        assert_eq!(Tolerance::new(f64::NAN), None);
        assert_eq!(Tolerance::default().epsilon(), EPSILON);
    }

    #[test]
    fn test_sign() {
        assert_eq!(Sign::of(-0.0), Sign::Negative);
        assert_eq!(Sign::of(0.0), Sign::Positive);
        assert_eq!(Sign::of(-3.0), Sign::Negative);
        assert_eq!(Sign::from(true), Sign::Negative);
        assert_eq!(Sign::Negative * 2.5, -2.5);
        assert_eq!(Sign::Positive * 2.5, 2.5);
        assert_eq!(Sign::Positive.symbol(), '+');
        assert_eq!(Sign::Negative.symbol(), '-');
    }
}
