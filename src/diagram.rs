//! Persistence diagrams.

use std::cmp::Ordering;

/// One (death, birth) pair of a persistence diagram.
///
/// `death` is the root value of the component that lost a merge and `birth` is
/// the boundary value that triggered the loss. The essential pair holds the
/// global maximum and minimum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PersistencePair {
    pub death: f64,
    pub birth: f64,
}

impl PersistencePair {
    /// Absolute distance between the two values.
    pub fn lifetime(&self) -> f64 {
        (self.death - self.birth).abs()
    }
}

/// 0-dimensional persistence diagram in merge order.
///
/// Pairs appear in the order their merges were processed. A diagram of a
/// non-empty grid always ends with exactly one essential pair.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagram {
    pairs: Vec<PersistencePair>,
}

impl Diagram {
    pub(crate) fn from_pairs(pairs: Vec<PersistencePair>) -> Self {
        Self { pairs }
    }

    /// Returns all pairs, essential pair last.
    pub fn pairs(&self) -> &[PersistencePair] {
        &self.pairs
    }

    /// Returns the number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` for the diagram of an empty grid.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the essential (global max, global min) pair.
    pub fn essential(&self) -> Option<PersistencePair> {
        self.pairs.last().copied()
    }

    /// Returns the pairs produced by merges, excluding the essential pair.
    pub fn finite_pairs(&self) -> &[PersistencePair] {
        match self.pairs.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }

    /// Flattens the diagram to `[death0, birth0, death1, birth1, ...]`.
    pub fn to_flat(&self) -> Vec<f64> {
        self.pairs
            .iter()
            .flat_map(|pair| [pair.death, pair.birth])
            .collect()
    }

    /// Returns the lifetime of every pair, essential pair last.
    pub fn lifetimes(&self) -> Vec<f64> {
        self.pairs.iter().map(PersistencePair::lifetime).collect()
    }

    /// Applies [`max_jump_threshold`] to [`Diagram::lifetimes`].
    pub fn max_jump_threshold(&self) -> Option<f64> {
        max_jump_threshold(&self.lifetimes())
    }
}

/// Picks a lifetime cutoff at the widest gap between sorted lifetimes.
///
/// With `sorted` ascending and `k` the first index of the largest
/// `sorted[k + 1] - sorted[k]`, returns the midpoint of `sorted[k - 2]` and
/// `sorted[k - 1]`, indices wrapping around the end for `k < 2`. Returns
/// `None` for fewer than two lifetimes.
pub fn max_jump_threshold(lifetimes: &[f64]) -> Option<f64> {
    if lifetimes.len() < 2 {
        return None;
    }
    let mut sorted = lifetimes.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mut widest = 0usize;
    let mut widest_gap = f64::NEG_INFINITY;
    for (k, pair) in sorted.windows(2).enumerate() {
        let gap = pair[1] - pair[0];
        if gap > widest_gap {
            widest = k;
            widest_gap = gap;
        }
    }

    let len = sorted.len();
    let lower = sorted[(widest + len - 2) % len];
    let upper = sorted[(widest + len - 1) % len];
    Some((lower + upper) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::{max_jump_threshold, Diagram, PersistencePair};

    fn sample() -> Diagram {
        Diagram::from_pairs(vec![
            PersistencePair {
                death: 4.0,
                birth: 1.0,
            },
            PersistencePair {
                death: 9.0,
                birth: 0.5,
            },
        ])
    }

    #[test]
    fn flat_layout_interleaves_pairs() {
        assert_eq!(sample().to_flat(), vec![4.0, 1.0, 9.0, 0.5]);
    }

    #[test]
    fn essential_is_last_pair() {
        let dgm = sample();
        assert_eq!(dgm.essential().unwrap().death, 9.0);
        assert_eq!(dgm.finite_pairs().len(), 1);
        assert_eq!(dgm.lifetimes(), vec![3.0, 8.5]);
    }

    #[test]
    fn empty_diagram_has_no_pairs() {
        let dgm = Diagram::default();
        assert!(dgm.is_empty());
        assert!(dgm.essential().is_none());
        assert!(dgm.finite_pairs().is_empty());
        assert!(dgm.to_flat().is_empty());
    }

    #[test]
    fn threshold_sits_below_the_widest_gap() {
        assert_eq!(max_jump_threshold(&[11.0, 2.0, 10.0, 1.0, 3.0]), Some(1.5));
    }

    #[test]
    fn threshold_wraps_for_a_leading_gap() {
        // Widest gap at k = 0 reads the last two sorted lifetimes.
        assert_eq!(max_jump_threshold(&[11.0, 0.0, 10.0]), Some(10.5));
        assert_eq!(max_jump_threshold(&[4.0, 1.0]), Some(2.5));
    }

    #[test]
    fn threshold_needs_two_lifetimes() {
        assert_eq!(max_jump_threshold(&[]), None);
        assert_eq!(max_jump_threshold(&[3.0]), None);
        assert_eq!(Diagram::default().max_jump_threshold(), None);
    }

    #[test]
    fn diagram_threshold_uses_pair_lifetimes() {
        // Lifetimes 3.0 and 8.5.
        assert_eq!(sample().max_jump_threshold(), Some(5.75));
    }
}
