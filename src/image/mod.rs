//! Scalar grid views.
//!
//! `GridView` is a borrowed, dense, row-major view over `f64` samples. Pixel
//! `(row, col)` lives at flattened index `row * cols + col`; every stage of the
//! merge-tree builder addresses pixels by that index. Zero-sized grids are
//! valid and produce empty results downstream.

use crate::util::{PixHomError, PixHomResult};

mod owned;

#[cfg(feature = "image-io")]
pub mod io;

pub use owned::OwnedGrid;

/// Borrowed dense row-major grid of real values.
#[derive(Copy, Clone, Debug)]
pub struct GridView<'a> {
    data: &'a [f64],
    rows: usize,
    cols: usize,
}

impl<'a> GridView<'a> {
    /// Creates a view over exactly `rows * cols` values.
    ///
    /// NaN values are rejected so that every comparison made by the builder
    /// is a total order.
    pub fn from_slice(data: &'a [f64], rows: usize, cols: usize) -> PixHomResult<Self> {
        let needed = required_len(rows, cols)?;
        if data.len() != needed {
            return Err(PixHomError::BufferLength {
                needed,
                got: data.len(),
            });
        }
        if let Some(index) = data.iter().position(|v| v.is_nan()) {
            return Err(PixHomError::NanValue { index });
        }
        Ok(Self { data, rows, cols })
    }

    /// Creates a view from signed dimensions, rejecting negative counts.
    pub fn from_signed(data: &'a [f64], rows: i64, cols: i64) -> PixHomResult<Self> {
        let invalid = PixHomError::InvalidDimensions { rows, cols };
        let rows_u = usize::try_from(rows).map_err(|_| invalid.clone())?;
        let cols_u = usize::try_from(cols).map_err(|_| invalid)?;
        Self::from_slice(data, rows_u, cols_u)
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the number of pixels.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` when the grid has no pixels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the backing row-major slice.
    pub fn as_slice(&self) -> &'a [f64] {
        self.data
    }

    /// Returns the value at `(row, col)` if it is within bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col).copied()
    }

    /// Returns the value at flattened `index`.
    #[inline]
    pub fn value(&self, index: usize) -> f64 {
        self.data[index]
    }

    /// Returns row `row` as a slice of length `cols`.
    pub fn row(&self, row: usize) -> Option<&'a [f64]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        self.data.get(start..start + self.cols)
    }

    /// Converts a flattened index back into `(row, col)`.
    pub fn coords(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.data.len() {
            return None;
        }
        Some((index / self.cols, index % self.cols))
    }
}

fn required_len(rows: usize, cols: usize) -> PixHomResult<usize> {
    rows.checked_mul(cols)
        .ok_or(PixHomError::InvalidDimensions {
            rows: i64::try_from(rows).unwrap_or(i64::MAX),
            cols: i64::try_from(cols).unwrap_or(i64::MAX),
        })
}
