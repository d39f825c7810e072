//! Owned grid buffers.

use crate::image::GridView;
use crate::util::PixHomResult;

/// Owned dense row-major grid of real values.
#[derive(Clone, Debug)]
pub struct OwnedGrid {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl OwnedGrid {
    /// Takes ownership of `rows * cols` values.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> PixHomResult<Self> {
        GridView::from_slice(&data, rows, cols)?;
        Ok(Self { data, rows, cols })
    }

    /// Widens 8-bit intensities into a real-valued grid.
    pub fn from_u8(data: &[u8], rows: usize, cols: usize) -> PixHomResult<Self> {
        let values = data.iter().copied().map(f64::from).collect();
        Self::new(values, rows, cols)
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the row-major values.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Returns a borrowed view of the grid.
    pub fn view(&self) -> GridView<'_> {
        GridView {
            data: &self.data,
            rows: self.rows,
            cols: self.cols,
        }
    }
}
