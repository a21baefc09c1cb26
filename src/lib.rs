// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

//! Dense bivariate polynomials over `f64` and a Newton-Raphson solver for
//! systems of two of them.
//!
//! ```
//! use newton2d::prelude::*;
//!
//! let f: Polynomial2D = "x^2 + y^2 - 9".parse().unwrap();
//! let g: Polynomial2D = "x^2 - 3*x*y + y^2 - 9".parse().unwrap();
//! let result = newton_method_2d_from(&f, &g, 2.0, 1.0, false);
//! let (x, y) = result.converged_root().unwrap();
//! assert!((x - 3.0).abs() < 1e-6 && y.abs() < 1e-6);
//! ```

pub mod array2d;
pub mod newton;
pub mod polynomial;
pub mod prelude;
pub mod scan;
pub mod traits;
pub mod util;
