//! Merge-tree construction and its two outputs.
//!
//! A single builder runs the stages in order: steepest-ascent mapping,
//! flattening, saddle detection, candidate ordering and elder-rule merging.
//! The output policy is a [`MergeSink`]: [`ForestSink`] records merge weights
//! into the forest, [`DiagramSink`] collects persistence pairs.

pub(crate) mod process;
pub(crate) mod sink;

pub use sink::{DiagramSink, ForestSink, MergeEvent, MergeSink};

use crate::candidate::order::sort_candidates;
use crate::diagram::{Diagram, PersistencePair};
use crate::forest::{flatten, Forest};
use crate::image::GridView;
#[cfg(feature = "rayon")]
use crate::kernel::rayon::RayonKernel;
use crate::kernel::scalar::ScalarKernel;
use crate::kernel::Kernel;
use crate::trace::{trace_event, trace_span};
use crate::util::reserve::try_push;
use crate::util::{argmin_argmax, PixHomResult};
use process::process_merges;

/// Configuration for merge-tree construction.
#[derive(Clone, Debug, Default)]
pub struct MergeTreeConfig {
    /// Run the per-pixel stages on the rayon thread pool.
    ///
    /// Ignored unless the `rayon` feature is enabled. Output is identical to
    /// the sequential path.
    pub parallel: bool,
}

/// Builds the merge forest of `grid`, reporting every merge to `sink`.
pub fn build_merge_tree<S: MergeSink>(
    grid: GridView<'_>,
    cfg: &MergeTreeConfig,
    sink: &mut S,
) -> PixHomResult<Forest> {
    #[cfg(feature = "rayon")]
    if cfg.parallel {
        return build_with_kernel::<RayonKernel, S>(grid, cfg, sink);
    }
    build_with_kernel::<ScalarKernel, S>(grid, cfg, sink)
}

fn build_with_kernel<K: Kernel, S: MergeSink>(
    grid: GridView<'_>,
    cfg: &MergeTreeConfig,
    sink: &mut S,
) -> PixHomResult<Forest> {
    let _span = trace_span!(
        "merge_tree",
        rows = grid.rows(),
        cols = grid.cols(),
        parallel = cfg.parallel
    )
    .entered();

    let mut forest = basins_with_kernel::<K>(grid)?;
    let mut candidates = {
        let _span = trace_span!("detect_saddles").entered();
        K::detect_saddles(grid, &forest)?
    };
    trace_event!("saddle_candidates", count = candidates.len());
    sort_candidates(&mut candidates);

    let _span = trace_span!("merge").entered();
    let merges = process_merges(grid, &mut forest, &candidates, sink)?;
    trace_event!("merge_events", count = merges);
    Ok(forest)
}

fn basins_with_kernel<K: Kernel>(grid: GridView<'_>) -> PixHomResult<Forest> {
    let mut forest = Forest::singletons(grid.len())?;
    {
        let _span = trace_span!("steepest_ascent").entered();
        K::steepest_ascent(grid, forest.parents_mut());
    }
    let _span = trace_span!("flatten").entered();
    let sweeps = flatten(grid, &mut forest);
    trace_event!("flatten_sweeps", sweeps = sweeps);
    Ok(forest)
}

/// Computes the catchment basins before any merging.
///
/// Every pixel points directly at the local maximum its steepest-ascent path
/// reaches, so [`Forest::labels`] gives a segmentation into basins and
/// [`Forest::roots`] lists the local maxima.
pub fn compute_basins(grid: GridView<'_>, cfg: &MergeTreeConfig) -> PixHomResult<Forest> {
    let _span = trace_span!(
        "basins",
        rows = grid.rows(),
        cols = grid.cols(),
        parallel = cfg.parallel
    )
    .entered();
    #[cfg(feature = "rayon")]
    if cfg.parallel {
        return basins_with_kernel::<RayonKernel>(grid);
    }
    basins_with_kernel::<ScalarKernel>(grid)
}

/// Computes the merge forest: per-pixel parents and merge weights.
///
/// An empty grid yields an empty forest.
pub fn compute_forest(grid: GridView<'_>, cfg: &MergeTreeConfig) -> PixHomResult<Forest> {
    build_merge_tree(grid, cfg, &mut ForestSink)
}

/// Computes the 0-dimensional persistence diagram.
///
/// Pairs are emitted in merge order and the diagram ends with the essential
/// pair `(global max, global min)`. An empty grid yields an empty diagram.
pub fn compute_diagram(grid: GridView<'_>, cfg: &MergeTreeConfig) -> PixHomResult<Diagram> {
    let Some(extrema) = argmin_argmax(grid.as_slice()) else {
        return Ok(Diagram::default());
    };

    let mut sink = DiagramSink::new();
    build_merge_tree(grid, cfg, &mut sink)?;
    let mut pairs = sink.into_pairs();
    try_push(
        &mut pairs,
        PersistencePair {
            death: grid.value(extrema.argmax),
            birth: grid.value(extrema.argmin),
        },
        "persistence diagram",
    )?;
    trace_event!("diagram_pairs", count = pairs.len());
    Ok(Diagram::from_pairs(pairs))
}
