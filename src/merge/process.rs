//! Sequential elder-rule merge processing.

use crate::candidate::MergeCandidate;
use crate::forest::Forest;
use crate::image::GridView;
use crate::merge::sink::{MergeEvent, MergeSink};
use crate::util::PixHomResult;

/// Applies sorted candidates to `forest` and reports each merge to `sink`.
///
/// Both pixels of a candidate are resolved to their current roots, since
/// earlier merges may have moved them. Candidates whose roots already agree
/// are skipped. Otherwise the root with the greater value survives (greater
/// index on equal values) and the losing root is pointed at the candidate
/// pixel on the surviving side. Returns the number of merges applied.
pub fn process_merges<S: MergeSink>(
    grid: GridView<'_>,
    forest: &mut Forest,
    candidates: &[MergeCandidate],
    sink: &mut S,
) -> PixHomResult<usize> {
    let mut merges = 0usize;
    for candidate in candidates {
        let c_obj = forest.find(candidate.c_point);
        let u_obj = forest.find(candidate.u_point);
        if c_obj == u_obj {
            continue;
        }

        let c_root_val = grid.value(c_obj);
        let u_root_val = grid.value(u_obj);
        let c_survives = c_root_val > u_root_val || (c_root_val == u_root_val && c_obj > u_obj);
        let event = if c_survives {
            MergeEvent {
                survivor: c_obj,
                loser: u_obj,
                attach: candidate.c_point,
                candidate: *candidate,
            }
        } else {
            MergeEvent {
                survivor: u_obj,
                loser: c_obj,
                attach: candidate.u_point,
                candidate: *candidate,
            }
        };

        forest.set_parent(event.loser, event.attach);
        sink.on_merge(&event, grid, forest)?;
        merges += 1;
    }
    Ok(merges)
}

#[cfg(test)]
mod tests {
    use super::process_merges;
    use crate::candidate::MergeCandidate;
    use crate::forest::Forest;
    use crate::image::GridView;
    use crate::merge::sink::{DiagramSink, ForestSink};

    fn cand(grid: GridView<'_>, c_point: usize, u_point: usize) -> MergeCandidate {
        MergeCandidate {
            u_val: grid.value(u_point),
            c_val: grid.value(c_point),
            c_point,
            u_point,
        }
    }

    #[test]
    fn higher_root_survives_and_loser_attaches_to_trigger() {
        // Components {0,1} rooted at 0 and {2,3} rooted at 3.
        let values = [5.0, 2.0, 1.0, 4.0];
        let grid = GridView::from_slice(&values, 1, 4).unwrap();
        let mut forest = Forest::singletons(4).unwrap();
        forest.set_parent(1, 0);
        forest.set_parent(2, 3);

        let candidates = [cand(grid, 1, 2)];
        let mut sink = ForestSink;
        let merges = process_merges(grid, &mut forest, &candidates, &mut sink).unwrap();
        assert_eq!(merges, 1);
        assert_eq!(forest.parent(3), 1);
        assert_eq!(forest.weight(3), 1.0);
        assert_eq!(forest.find(2), 0);
    }

    #[test]
    fn equal_roots_prefer_larger_index() {
        let values = [3.0, 1.0, 3.0];
        let grid = GridView::from_slice(&values, 1, 3).unwrap();
        let mut forest = Forest::singletons(3).unwrap();
        forest.set_parent(1, 0);

        // c = 1 (root 0), u = 2 (root 2): roots tie on value, 2 > 0 survives.
        let candidates = [MergeCandidate {
            u_val: 3.0,
            c_val: 1.0,
            c_point: 1,
            u_point: 2,
        }];
        let mut sink = DiagramSink::new();
        process_merges(grid, &mut forest, &candidates, &mut sink).unwrap();
        assert_eq!(forest.parent(0), 2);
        // death == birth, so the bar is suppressed.
        assert!(sink.into_pairs().is_empty());
    }

    #[test]
    fn already_merged_candidates_are_skipped() {
        let values = [5.0, 2.0, 4.0];
        let grid = GridView::from_slice(&values, 1, 3).unwrap();
        let mut forest = Forest::singletons(3).unwrap();
        forest.set_parent(1, 0);

        let candidates = [cand(grid, 2, 1), cand(grid, 2, 1)];
        let mut sink = DiagramSink::new();
        let merges = process_merges(grid, &mut forest, &candidates, &mut sink).unwrap();
        assert_eq!(merges, 1);
        let pairs = sink.into_pairs();
        assert_eq!(pairs.len(), 1);
        assert_eq!((pairs[0].death, pairs[0].birth), (4.0, 2.0));
    }
}
