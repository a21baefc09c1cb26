// SPDX-License-Identifier: LGPL-2.1-or-later
// See Notices.txt for copyright information

use std::fmt;
use std::ops::Index;
use std::ops::IndexMut;

/// row-major growable 2D array, row `x` holds the elements `(x, 0..y_size)`
///
/// The alternate display format (using `"{:#}"`) is a reStructuredText table
///
/// ```
/// # use newton2d::array2d::Array2D;
/// // coefficients of x^2 - 3*x*y + y^2 - 9, row `i` holds the terms with `x^i`
/// let array = Array2D::from_array(
///     3,
///     3,
///     vec![-9.0, 0.0, 1.0, 0.0, -3.0, 0.0, 1.0, 0.0, 0.0],
/// );
/// assert_eq!(
///     array.to_string(),
///     "[ -9  0   1 ]\n\
///      [ 0   -3  0 ]\n\
///      [ 1   0   0 ]"
/// );
/// assert_eq!(
///     format!("{:#}", array),
///     "+----+----+---+\n\
///      | -9 | 0  | 1 |\n\
///      +----+----+---+\n\
///      | 0  | -3 | 0 |\n\
///      +----+----+---+\n\
///      | 1  | 0  | 0 |\n\
///      +----+----+---+"
/// );
/// ```
#[derive(Clone, Hash, Eq, PartialEq, Debug, Default)]
pub struct Array2D<T> {
    x_size: usize,
    y_size: usize,
    data: Vec<T>,
}

impl<T: Clone> Array2D<T> {
    pub fn new(x_size: usize, y_size: usize, fill: T) -> Self {
        Self {
            x_size,
            y_size,
            data: vec![fill; x_size * y_size],
        }
    }
    /// data is a row-major 2D array
    pub fn from_array<D: Into<Vec<T>>>(x_size: usize, y_size: usize, data: D) -> Self {
        let data = data.into();
        assert_eq!(x_size * y_size, data.len());
        Self {
            x_size,
            y_size,
            data,
        }
    }
    /// grow or shrink to the new size, keeping every element that is still in range
    pub fn resize(&mut self, x_size: usize, y_size: usize, fill: T) {
        if x_size == self.x_size && y_size == self.y_size {
            return;
        }
        let mut data = Vec::with_capacity(x_size * y_size);
        for x in 0..x_size {
            for y in 0..y_size {
                if x < self.x_size && y < self.y_size {
                    data.push(self.data[self.get_index_unchecked(x, y)].clone());
                } else {
                    data.push(fill.clone());
                }
            }
        }
        self.x_size = x_size;
        self.y_size = y_size;
        self.data = data;
    }
}

impl<T> Array2D<T> {
    pub fn x_size(&self) -> usize {
        self.x_size
    }
    pub fn y_size(&self) -> usize {
        self.y_size
    }
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x < self.x_size && y < self.y_size {
            Some(&self.data[self.get_index_unchecked(x, y)])
        } else {
            None
        }
    }
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x < self.x_size && y < self.y_size {
            let index = self.get_index_unchecked(x, y);
            Some(&mut self.data[index])
        } else {
            None
        }
    }
    /// the elements of row `x`, or an empty slice past the end
    pub fn row(&self, x: usize) -> &[T] {
        if x < self.x_size {
            let start = self.get_index_unchecked(x, 0);
            &self.data[start..start + self.y_size]
        } else {
            &[]
        }
    }
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        let y_size = self.y_size;
        self.data
            .iter()
            .enumerate()
            .map(move |(index, value)| ((index / y_size, index % y_size), value))
    }
    fn get_index_unchecked(&self, x: usize, y: usize) -> usize {
        x * self.y_size + y
    }
    fn get_index(&self, x: usize, y: usize) -> usize {
        assert!(x < self.x_size);
        assert!(y < self.y_size);
        self.get_index_unchecked(x, y)
    }
}

impl<T> Index<(usize, usize)> for Array2D<T> {
    type Output = T;
    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        let index = self.get_index(x, y);
        &self.data[index]
    }
}

impl<T> IndexMut<(usize, usize)> for Array2D<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        let index = self.get_index(x, y);
        &mut self.data[index]
    }
}

impl<T: fmt::Display> fmt::Display for Array2D<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.x_size() == 0 || self.y_size() == 0 {
            return write!(f, "[x_size={}, y_size={}]", self.x_size(), self.y_size());
        }
        let mut cells: Vec<Vec<String>> = Vec::with_capacity(self.x_size());
        let mut col_widths = vec![1usize; self.y_size()];
        for x in 0..self.x_size() {
            let row: Vec<String> = self
                .row(x)
                .iter()
                .map(|value| match f.precision() {
                    Some(precision) => format!("{:.*}", precision, value),
                    None => format!("{}", value),
                })
                .collect();
            for (col_width, cell) in col_widths.iter_mut().zip(&row) {
                *col_width = (*col_width).max(cell.len());
            }
            cells.push(row);
        }
        let write_separator_line = |f: &mut fmt::Formatter| {
            for &col_width in &col_widths {
                write!(f, "+-{}-", "-".repeat(col_width))?;
            }
            write!(f, "+")
        };
        if f.alternate() {
            write_separator_line(f)?;
            writeln!(f)?;
        }
        for (x, row) in cells.iter().enumerate() {
            if !f.alternate() {
                write!(f, "[")?;
            }
            for (cell, &col_width) in row.iter().zip(&col_widths) {
                if f.alternate() {
                    write!(f, "|")?;
                }
                write!(f, " {:width$} ", cell, width = col_width)?;
            }
            if f.alternate() {
                write!(f, "|")?;
                writeln!(f)?;
                write_separator_line(f)?;
            } else {
                write!(f, "]")?;
            }
            if x != self.x_size() - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
