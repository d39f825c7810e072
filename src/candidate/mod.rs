//! Merge candidates between neighbouring components.
//!
//! A candidate is recorded once per adjacent pixel pair whose roots differ
//! after flattening, and consumed once by the merge processor in the order
//! produced by [`order::sort_candidates`].

pub(crate) mod order;

/// Adjacent pixel pair straddling two components at detection time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MergeCandidate {
    /// Value of the lower (or tie-later) boundary pixel `u_point`.
    pub u_val: f64,
    /// Value of the scanned pixel `c_point`.
    pub c_val: f64,
    /// Scanned pixel index.
    pub c_point: usize,
    /// Neighbour pixel index.
    pub u_point: usize,
}
