//! Rayon-parallel kernels (feature-gated).
//!
//! Work is split by rows. Per-row candidate lists are concatenated in row
//! order so the output matches the scalar kernel exactly.

use crate::candidate::MergeCandidate;
use crate::forest::Forest;
use crate::image::GridView;
use crate::kernel::{ascent_target, saddles_at, Kernel};
use crate::util::{PixHomError, PixHomResult};
use rayon::prelude::*;

/// Row-parallel kernel.
pub struct RayonKernel;

impl Kernel for RayonKernel {
    fn steepest_ascent(grid: GridView<'_>, parents: &mut [usize]) {
        steepest_ascent_par(grid, parents);
    }

    fn detect_saddles(
        grid: GridView<'_>,
        forest: &Forest,
    ) -> PixHomResult<Vec<MergeCandidate>> {
        detect_saddles_par(grid, forest)
    }
}

/// Row-parallel steepest-ascent mapping.
pub fn steepest_ascent_par(grid: GridView<'_>, parents: &mut [usize]) {
    let cols = grid.cols();
    if cols == 0 {
        return;
    }
    parents
        .par_chunks_mut(cols)
        .enumerate()
        .for_each(|(row, slots)| {
            for (col, slot) in slots.iter_mut().enumerate() {
                *slot = ascent_target(grid, row, col);
            }
        });
}

/// Row-parallel saddle detection.
pub fn detect_saddles_par(
    grid: GridView<'_>,
    forest: &Forest,
) -> PixHomResult<Vec<MergeCandidate>> {
    let row_results: Vec<PixHomResult<Vec<MergeCandidate>>> = (0..grid.rows())
        .into_par_iter()
        .map(|row| {
            let mut row_candidates = Vec::new();
            for col in 0..grid.cols() {
                saddles_at(grid, forest, row, col, &mut row_candidates)?;
            }
            Ok(row_candidates)
        })
        .collect();

    let mut out = Vec::new();
    for result in row_results {
        let row_candidates = result?;
        out.try_reserve(row_candidates.len())
            .map_err(|_| PixHomError::AllocationFailure {
                what: "merge candidates",
            })?;
        out.extend(row_candidates);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{detect_saddles_par, steepest_ascent_par};
    use crate::forest::{flatten, Forest};
    use crate::image::GridView;
    use crate::kernel::scalar::{detect_saddles, steepest_ascent};

    #[test]
    fn parallel_kernels_match_scalar() {
        let rows = 7;
        let cols = 9;
        let values: Vec<f64> = (0..rows * cols)
            .map(|i| ((i * 37) % 11) as f64 - ((i * 5) % 3) as f64)
            .collect();
        let grid = GridView::from_slice(&values, rows, cols).unwrap();

        let mut seq = Forest::singletons(values.len()).unwrap();
        let mut par = Forest::singletons(values.len()).unwrap();
        steepest_ascent(grid, seq.parents_mut());
        steepest_ascent_par(grid, par.parents_mut());
        assert_eq!(seq.parents(), par.parents());

        flatten(grid, &mut seq);
        flatten(grid, &mut par);
        let seq_candidates = detect_saddles(grid, &seq).unwrap();
        let par_candidates = detect_saddles_par(grid, &par).unwrap();
        assert_eq!(seq_candidates, par_candidates);
    }
}
