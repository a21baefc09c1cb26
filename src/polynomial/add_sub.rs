// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

use crate::polynomial::Polynomial2D;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// applies `op` term-wise over `0..=max(degree)` in each variable
fn add_sub_assign<AddSub: Fn(f64, f64) -> f64>(
    lhs: &mut Polynomial2D,
    rhs: &Polynomial2D,
    op: AddSub,
) {
    let degree_x = lhs.degree_x().max(rhs.degree_x());
    let degree_y = lhs.degree_y().max(rhs.degree_y());
    for i in 0..=degree_x {
        for j in 0..=degree_y {
            let value = op(lhs.coefficient(i, j), rhs.coefficient(i, j));
            lhs.update(i, j, value);
        }
    }
}

macro_rules! impl_add_sub {
    (
        $trait_name:ident,
        $fn_name:ident,
        $assign_trait_name:ident,
        $assign_fn_name:ident,
        $op:tt
    ) => {
        impl<'a> $assign_trait_name<&'a Polynomial2D> for Polynomial2D {
            fn $assign_fn_name(&mut self, rhs: &Polynomial2D) {
                add_sub_assign(self, rhs, |l, r| l $op r);
            }
        }

        impl $assign_trait_name for Polynomial2D {
            fn $assign_fn_name(&mut self, rhs: Polynomial2D) {
                add_sub_assign(self, &rhs, |l, r| l $op r);
            }
        }

        impl $trait_name for Polynomial2D {
            type Output = Polynomial2D;
            fn $fn_name(mut self, rhs: Polynomial2D) -> Polynomial2D {
                self.$assign_fn_name(&rhs);
                self
            }
        }

        impl<'a> $trait_name<&'a Polynomial2D> for Polynomial2D {
            type Output = Polynomial2D;
            fn $fn_name(mut self, rhs: &Polynomial2D) -> Polynomial2D {
                self.$assign_fn_name(rhs);
                self
            }
        }

        impl<'a> $trait_name<Polynomial2D> for &'a Polynomial2D {
            type Output = Polynomial2D;
            fn $fn_name(self, rhs: Polynomial2D) -> Polynomial2D {
                let mut retval = self.clone();
                retval.$assign_fn_name(&rhs);
                retval
            }
        }

        impl<'a, 'b> $trait_name<&'a Polynomial2D> for &'b Polynomial2D {
            type Output = Polynomial2D;
            fn $fn_name(self, rhs: &Polynomial2D) -> Polynomial2D {
                let mut retval = self.clone();
                retval.$assign_fn_name(rhs);
                retval
            }
        }
    };
}

impl_add_sub!(Add, add, AddAssign, add_assign, +);
impl_add_sub!(Sub, sub, SubAssign, sub_assign, -);

impl Neg for &'_ Polynomial2D {
    type Output = Polynomial2D;
    fn neg(self) -> Polynomial2D {
        let mut retval = Polynomial2D::default();
        for i in 0..=self.degree_x() {
            for j in 0..=self.degree_y() {
                retval.update(i, j, -self.coefficient(i, j));
            }
        }
        retval
    }
}

impl Neg for Polynomial2D {
    type Output = Polynomial2D;
    fn neg(self) -> Polynomial2D {
        -&self
    }
}
