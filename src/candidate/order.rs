//! Deterministic ordering of merge candidates.

use crate::candidate::MergeCandidate;
use std::cmp::Ordering;

/// Descending by `u_val`, then descending by `c_val`.
///
/// Candidates equal on both keys compare equal; the stable sort keeps them in
/// detection order.
fn candidate_cmp_desc(a: &MergeCandidate, b: &MergeCandidate) -> Ordering {
    b.u_val
        .partial_cmp(&a.u_val)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.c_val.partial_cmp(&a.c_val).unwrap_or(Ordering::Equal))
}

/// Sorts candidates so the highest boundary is merged first.
pub fn sort_candidates(candidates: &mut [MergeCandidate]) {
    candidates.sort_by(candidate_cmp_desc);
}
