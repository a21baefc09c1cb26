// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information
pub use crate::{
    newton::{
        newton_method_2d, newton_method_2d_from, HistoryEntry, NewtonParams, NewtonResult,
        NewtonStatus, NewtonSystem,
    },
    polynomial::{DegreeOutOfRange, ParsePolynomialError, Polynomial2D},
    scan::{scan_grid, solve_with_restarts, Grid, GridSample, GridScan, InvalidGrid},
    traits::{PartialDerivative as _, PolynomialEval2D as _},
    util::Tolerance,
};
pub use num_traits::Zero as _;
