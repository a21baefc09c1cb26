// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

use crate::polynomial::Polynomial2D;
use std::ops::{Mul, MulAssign};

impl MulAssign<f64> for Polynomial2D {
    fn mul_assign(&mut self, rhs: f64) {
        let degree_x = self.degree_x();
        let degree_y = self.degree_y();
        for i in 0..=degree_x {
            for j in 0..=degree_y {
                let value = self.coefficient(i, j) * rhs;
                self.update(i, j, value);
            }
        }
    }
}

impl<'a> MulAssign<&'a f64> for Polynomial2D {
    fn mul_assign(&mut self, rhs: &f64) {
        *self *= *rhs;
    }
}

impl Mul<f64> for Polynomial2D {
    type Output = Polynomial2D;
    fn mul(mut self, rhs: f64) -> Polynomial2D {
        self *= rhs;
        self
    }
}

impl<'a> Mul<f64> for &'a Polynomial2D {
    type Output = Polynomial2D;
    fn mul(self, rhs: f64) -> Polynomial2D {
        self.clone() * rhs
    }
}

impl Mul<Polynomial2D> for f64 {
    type Output = Polynomial2D;
    fn mul(self, rhs: Polynomial2D) -> Polynomial2D {
        rhs * self
    }
}

impl<'a> Mul<&'a Polynomial2D> for f64 {
    type Output = Polynomial2D;
    fn mul(self, rhs: &Polynomial2D) -> Polynomial2D {
        rhs * self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomial::tests::hyperbola;
    use num_traits::Zero;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn test_mul_scalar() {
        let expected = Polynomial2D::from_rows(vec![
            vec![-18.0, 0.0, 2.0],
            vec![0.0, -6.0, 0.0],
            vec![2.0, 0.0, 0.0],
        ])
        .unwrap();
        assert_eq!(hyperbola() * 2.0, expected);
        assert_eq!(&hyperbola() * 2.0, expected);
        assert_eq!(2.0 * hyperbola(), expected);
        assert_eq!(2.0 * &hyperbola(), expected);
        let mut poly = hyperbola();
        poly *= 2.0;
        assert_eq!(poly, expected);
        poly *= &0.5;
        assert_eq!(poly, hyperbola());
    }

    #[test]
    fn test_mul_zero_clears_degree() {
        let poly = hyperbola() * 0.0;
        assert!(poly.is_zero());
        assert_eq!(poly.degree_x(), 0);
        assert_eq!(poly.degree_y(), 0);
        assert_eq!(poly, Polynomial2D::zero());
    }

    #[test]
    fn test_eval_homogeneous() {
        let mut rng = Pcg64Mcg::seed_from_u64(0);
        for _ in 0..100 {
            let alpha: f64 = rng.gen_range(-5.0..5.0);
            let x = rng.gen_range(-3.0..3.0);
            let y = rng.gen_range(-3.0..3.0);
            let scaled = (alpha * hyperbola()).eval(x, y);
            let expected = alpha * hyperbola().eval(x, y);
            assert!((scaled - expected).abs() < 1e-9 * expected.abs().max(1.0));
        }
    }
}
