//! Low-level building blocks for custom merge-tree pipelines.
//!
//! These expose the individual stages and the sink trait. Most users should
//! prefer [`compute_forest`](crate::compute_forest) and
//! [`compute_diagram`](crate::compute_diagram).

pub use crate::candidate::order::sort_candidates;
pub use crate::candidate::MergeCandidate;
pub use crate::forest::flatten;
#[cfg(feature = "rayon")]
pub use crate::kernel::rayon::{detect_saddles_par, steepest_ascent_par, RayonKernel};
pub use crate::kernel::scalar::{detect_saddles, steepest_ascent, ScalarKernel};
pub use crate::kernel::Kernel;
pub use crate::merge::process::process_merges;
pub use crate::merge::{build_merge_tree, DiagramSink, ForestSink, MergeEvent, MergeSink};
