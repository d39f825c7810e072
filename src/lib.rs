//! PixHom computes 0-dimensional persistent homology of scalar fields on 2D
//! grids such as image intensities.
//!
//! Pixels are grouped into basins around local maxima by steepest ascent, and
//! basins merge under the elder rule as the threshold sweeps down from the
//! global maximum. The result is either a merge forest (per-pixel parents and
//! merge weights) or a persistence diagram. Per-pixel stages can run in
//! parallel via the `rayon` feature.

pub mod candidate;
pub mod diagram;
pub mod forest;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod merge;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use diagram::{max_jump_threshold, Diagram, PersistencePair};
pub use forest::Forest;
pub use crate::image::{GridView, OwnedGrid};
pub use merge::{compute_basins, compute_diagram, compute_forest, MergeTreeConfig};
pub use util::{argmin_argmax, Extrema, PixHomError, PixHomResult};
