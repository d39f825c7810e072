//! Per-pixel kernels for the embarrassingly parallel stages.
//!
//! The steepest-ascent mapper and the saddle detector only read the grid (and,
//! for detection, a finalized forest), so each pixel can be evaluated
//! independently. The scalar kernel walks pixels in row-major order; the rayon
//! kernel splits work by rows and concatenates per-row results in row order,
//! producing identical output.

use crate::candidate::MergeCandidate;
use crate::forest::Forest;
use crate::image::GridView;
use crate::util::reserve::try_push;
use crate::util::PixHomResult;

/// Kernel trait for the independent per-pixel stages.
pub trait Kernel {
    /// Writes the provisional steepest-ascent parent of every pixel.
    fn steepest_ascent(grid: GridView<'_>, parents: &mut [usize]);

    /// Collects merge candidates against a flattened forest.
    fn detect_saddles(grid: GridView<'_>, forest: &Forest)
        -> PixHomResult<Vec<MergeCandidate>>;
}

pub mod scalar;

#[cfg(feature = "rayon")]
pub mod rayon;

/// Returns the dominating pixel of the 3x3 window centred on `(row, col)`.
///
/// Window positions are visited in row-major order and outside pixels read as
/// negative infinity. Only a strictly greater value replaces the running
/// maximum, so the first maximal position wins ties, including ties with the
/// centre.
#[inline]
pub(crate) fn ascent_target(grid: GridView<'_>, row: usize, col: usize) -> usize {
    let cols = grid.cols();
    let mut best = row * cols + col;
    let mut best_val = f64::NEG_INFINITY;
    for dr in 0..3usize {
        for dc in 0..3usize {
            let value = match (row + dr).checked_sub(1).zip((col + dc).checked_sub(1)) {
                Some((r, c)) => grid.get(r, c).unwrap_or(f64::NEG_INFINITY),
                None => f64::NEG_INFINITY,
            };
            if value > best_val {
                best_val = value;
                best = (row + dr - 1) * cols + (col + dc - 1);
            }
        }
    }
    best
}

/// Appends the candidates found by scanning pixel `(row, col)`.
///
/// The clipped 8-neighbourhood is visited in row-major order. A neighbour `t`
/// produces a candidate when its root differs from the centre's and the centre
/// is higher, or equal with a larger index. Each unordered boundary pair is
/// therefore recorded from exactly one side.
pub(crate) fn saddles_at(
    grid: GridView<'_>,
    forest: &Forest,
    row: usize,
    col: usize,
    out: &mut Vec<MergeCandidate>,
) -> PixHomResult<()> {
    let rows = grid.rows();
    let cols = grid.cols();
    let r0 = row.saturating_sub(1);
    let c0 = col.saturating_sub(1);
    let r1 = (row + 1).min(rows - 1);
    let c1 = (col + 1).min(cols - 1);

    let c_point = row * cols + col;
    let c_val = grid.value(c_point);
    let c_obj = forest.parent(c_point);

    for h in r0..=r1 {
        for k in c0..=c1 {
            let t_point = h * cols + k;
            if t_point == c_point || forest.parent(t_point) == c_obj {
                continue;
            }
            let t_val = grid.value(t_point);
            if c_val > t_val || (c_val == t_val && c_point > t_point) {
                try_push(
                    out,
                    MergeCandidate {
                        u_val: t_val,
                        c_val,
                        c_point,
                        u_point: t_point,
                    },
                    "merge candidates",
                )?;
            }
        }
    }
    Ok(())
}
