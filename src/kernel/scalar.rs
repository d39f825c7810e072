//! Scalar reference kernels.

use crate::candidate::MergeCandidate;
use crate::forest::Forest;
use crate::image::GridView;
use crate::kernel::{ascent_target, saddles_at, Kernel};
use crate::util::PixHomResult;

/// Sequential row-major kernel.
pub struct ScalarKernel;

impl Kernel for ScalarKernel {
    fn steepest_ascent(grid: GridView<'_>, parents: &mut [usize]) {
        steepest_ascent(grid, parents);
    }

    fn detect_saddles(
        grid: GridView<'_>,
        forest: &Forest,
    ) -> PixHomResult<Vec<MergeCandidate>> {
        detect_saddles(grid, forest)
    }
}

/// Points every pixel at the dominating pixel of its 3x3 window.
///
/// `parents` must hold one slot per pixel.
pub fn steepest_ascent(grid: GridView<'_>, parents: &mut [usize]) {
    debug_assert_eq!(parents.len(), grid.len());
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            parents[row * grid.cols() + col] = ascent_target(grid, row, col);
        }
    }
}

/// Scans every pixel's clipped 8-neighbourhood for component boundaries.
///
/// `forest` must already be flattened so that each parent is a root.
pub fn detect_saddles(grid: GridView<'_>, forest: &Forest) -> PixHomResult<Vec<MergeCandidate>> {
    let mut out = Vec::new();
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            saddles_at(grid, forest, row, col, &mut out)?;
        }
    }
    Ok(out)
}
