//! Array-backed merge forest.
//!
//! Every pixel carries a parent index and a weight. Roots point at
//! themselves. Parent pointers always lead to a strictly higher value or to an
//! equal value at a different pixel reachable without cycles, so following
//! them from any pixel terminates at a root.

use crate::image::GridView;
use crate::util::reserve::try_filled;
use crate::util::{PixHomError, PixHomResult};

/// Per-pixel parent pointers and merge weights.
#[derive(Clone, Debug, PartialEq)]
pub struct Forest {
    parent: Vec<usize>,
    weight: Vec<f64>,
}

impl Forest {
    /// Creates a forest where every pixel is its own root with zero weight.
    pub fn singletons(len: usize) -> PixHomResult<Self> {
        let mut parent = try_filled(len, 0usize, "parent array")?;
        for (idx, slot) in parent.iter_mut().enumerate() {
            *slot = idx;
        }
        let weight = try_filled(len, 0.0f64, "weight array")?;
        Ok(Self { parent, weight })
    }

    /// Rebuilds a forest from parent and weight arrays, such as the edges and
    /// weights of an exported graph.
    ///
    /// Every parent must be in range and every chain must end at a root.
    pub fn from_parts(parent: Vec<usize>, weight: Vec<f64>) -> PixHomResult<Self> {
        if weight.len() != parent.len() {
            return Err(PixHomError::BufferLength {
                needed: parent.len(),
                got: weight.len(),
            });
        }
        if let Some(index) = parent.iter().position(|&p| p >= parent.len()) {
            return Err(PixHomError::InvalidParent { index });
        }
        check_acyclic(&parent)?;
        Ok(Self { parent, weight })
    }

    /// Returns the number of pixels.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` for the forest of an empty grid.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns all parent pointers.
    pub fn parents(&self) -> &[usize] {
        &self.parent
    }

    /// Returns all merge weights.
    pub fn weights(&self) -> &[f64] {
        &self.weight
    }

    /// Splits the forest into its parent and weight arrays.
    pub fn into_parts(self) -> (Vec<usize>, Vec<f64>) {
        (self.parent, self.weight)
    }

    /// Returns the parent of pixel `i`.
    #[inline]
    pub fn parent(&self, i: usize) -> usize {
        self.parent[i]
    }

    /// Returns the weight recorded at pixel `i`.
    #[inline]
    pub fn weight(&self, i: usize) -> f64 {
        self.weight[i]
    }

    /// Returns `true` if `i` points at itself.
    #[inline]
    pub fn is_root(&self, i: usize) -> bool {
        self.parent[i] == i
    }

    /// Follows parent pointers from `i` to its root.
    ///
    /// No path compression is applied, so the forest layout is left exactly
    /// as the merge processor built it.
    pub fn find(&self, i: usize) -> usize {
        let mut node = i;
        while self.parent[node] != node {
            node = self.parent[node];
        }
        node
    }

    /// Returns all roots in ascending index order.
    pub fn roots(&self) -> Vec<usize> {
        (0..self.len()).filter(|&i| self.is_root(i)).collect()
    }

    /// Returns the number of components.
    pub fn num_components(&self) -> usize {
        (0..self.len()).filter(|&i| self.is_root(i)).count()
    }

    /// Returns the root index of every pixel, usable as a segmentation map.
    pub fn labels(&self) -> Vec<usize> {
        (0..self.len()).map(|i| self.find(i)).collect()
    }

    /// Like [`Forest::labels`], but shifted by one with `0` marking background.
    ///
    /// Pixels whose grid value is below `background` get label `0`; every
    /// other pixel gets its root index plus one.
    pub fn labels_with_background(
        &self,
        grid: GridView<'_>,
        background: f64,
    ) -> PixHomResult<Vec<usize>> {
        if grid.len() != self.len() {
            return Err(PixHomError::BufferLength {
                needed: self.len(),
                got: grid.len(),
            });
        }
        Ok(grid
            .as_slice()
            .iter()
            .zip(self.labels())
            .map(|(&value, root)| if value < background { 0 } else { root + 1 })
            .collect())
    }

    /// Recovers per-pixel values from parents and weights.
    ///
    /// Solves `x[i] = x[parent[i]] - weight[i]` with `x[root] = -weight[root]`,
    /// then shifts everything so the minimum is zero. On a basin forest this
    /// reproduces the grid up to a constant per basin.
    pub fn reconstruct_values(&self) -> PixHomResult<Vec<f64>> {
        let len = self.len();
        let mut values = try_filled(len, 0.0f64, "reconstructed values")?;
        let mut known = try_filled(len, false, "reconstructed values")?;
        let mut path = Vec::new();
        for start in 0..len {
            let mut node = start;
            while !known[node] {
                if self.is_root(node) {
                    values[node] = -self.weight[node];
                    known[node] = true;
                    break;
                }
                path.push(node);
                node = self.parent[node];
            }
            while let Some(child) = path.pop() {
                values[child] = values[self.parent[child]] - self.weight[child];
                known[child] = true;
            }
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        for value in &mut values {
            *value -= min;
        }
        Ok(values)
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, i: usize, parent: usize) {
        self.parent[i] = parent;
    }

    #[inline]
    pub(crate) fn set_weight(&mut self, i: usize, weight: f64) {
        self.weight[i] = weight;
    }

    /// Returns the parent array for in-place rewiring by custom pipelines.
    ///
    /// Every entry must stay in range and pointers must stay acyclic apart
    /// from root self-loops, or [`Forest::find`] will not terminate.
    pub fn parents_mut(&mut self) -> &mut [usize] {
        &mut self.parent
    }
}

fn check_acyclic(parent: &[usize]) -> PixHomResult<()> {
    const UNSEEN: u8 = 0;
    const ON_PATH: u8 = 1;
    const DONE: u8 = 2;

    let mut state = try_filled(parent.len(), UNSEEN, "parent check")?;
    let mut path = Vec::new();
    for start in 0..parent.len() {
        let mut node = start;
        while state[node] == UNSEEN {
            state[node] = ON_PATH;
            path.push(node);
            let next = parent[node];
            if next == node {
                break;
            }
            if state[next] == ON_PATH {
                return Err(PixHomError::InvalidParent { index: start });
            }
            node = next;
        }
        for &visited in &path {
            state[visited] = DONE;
        }
        path.clear();
    }
    Ok(())
}

/// Halves every parent chain repeatedly until all pixels point at a root.
///
/// Each sweep visits pixels in index order and rewires `i` to its
/// grandparent whenever the two differ, recording the weight
/// `value[parent[new_parent]] - value[i]`. Sweeps repeat until one makes no
/// change. Returns the number of sweeps that changed something.
pub fn flatten(grid: GridView<'_>, forest: &mut Forest) -> usize {
    let values = grid.as_slice();
    let mut sweeps = 0usize;
    loop {
        let mut changed = false;
        for i in 0..forest.len() {
            let grandparent = forest.parent[forest.parent[i]];
            if forest.parent[i] != grandparent {
                forest.parent[i] = grandparent;
                forest.weight[i] = values[forest.parent[grandparent]] - values[i];
                changed = true;
            }
        }
        if !changed {
            break;
        }
        sweeps += 1;
    }
    sweeps
}

#[cfg(test)]
mod tests {
    use super::{flatten, Forest};
    use crate::image::GridView;
    use crate::util::PixHomError;

    fn chain_forest(parents: &[usize]) -> Forest {
        let mut forest = Forest::singletons(parents.len()).unwrap();
        for (i, &p) in parents.iter().enumerate() {
            forest.set_parent(i, p);
        }
        forest
    }

    #[test]
    fn singletons_are_all_roots() {
        let forest = Forest::singletons(4).unwrap();
        assert_eq!(forest.roots(), vec![0, 1, 2, 3]);
        assert_eq!(forest.weights(), &[0.0; 4]);
    }

    #[test]
    fn flatten_points_every_pixel_at_its_root() {
        // 4 -> 3 -> 2 -> 1 -> 0
        let values = [5.0, 4.0, 3.0, 2.0, 1.0];
        let grid = GridView::from_slice(&values, 1, 5).unwrap();
        let mut forest = chain_forest(&[0, 0, 1, 2, 3]);
        let sweeps = flatten(grid, &mut forest);
        assert!(sweeps >= 1);
        assert_eq!(forest.parents(), &[0, 0, 0, 0, 0]);
        for i in 0..values.len() {
            assert_eq!(forest.find(i), 0);
        }
    }

    #[test]
    fn flatten_records_destination_minus_source() {
        let values = [9.0, 4.0, 1.0];
        let grid = GridView::from_slice(&values, 1, 3).unwrap();
        let mut forest = chain_forest(&[0, 0, 1]);
        flatten(grid, &mut forest);
        assert_eq!(forest.parents(), &[0, 0, 0]);
        assert_eq!(forest.weight(0), 0.0);
        // Pixel 1 already pointed at the root and is never rewired.
        assert_eq!(forest.weight(1), 0.0);
        assert_eq!(forest.weight(2), 8.0);
    }

    #[test]
    fn flatten_of_flat_forest_is_a_no_op() {
        let values = [1.0, 2.0];
        let grid = GridView::from_slice(&values, 1, 2).unwrap();
        let mut forest = chain_forest(&[1, 1]);
        assert_eq!(flatten(grid, &mut forest), 0);
        assert_eq!(forest.parents(), &[1, 1]);
    }

    #[test]
    fn labels_follow_roots() {
        let forest = chain_forest(&[0, 0, 2, 2, 3]);
        assert_eq!(forest.labels(), vec![0, 0, 2, 2, 2]);
        assert_eq!(forest.num_components(), 2);
    }

    #[test]
    fn from_parts_rejects_bad_parents() {
        let err = Forest::from_parts(vec![0, 5], vec![0.0; 2]).unwrap_err();
        assert_eq!(err, PixHomError::InvalidParent { index: 1 });

        // 1 -> 2 -> 1
        let err = Forest::from_parts(vec![0, 2, 1], vec![0.0; 3]).unwrap_err();
        assert_eq!(err, PixHomError::InvalidParent { index: 1 });

        let err = Forest::from_parts(vec![0, 0], vec![0.0]).unwrap_err();
        assert_eq!(err, PixHomError::BufferLength { needed: 2, got: 1 });
    }

    #[test]
    fn from_parts_keeps_valid_chains() {
        let forest = Forest::from_parts(vec![0, 0, 1, 3], vec![0.0, 1.0, 2.0, 0.0]).unwrap();
        assert_eq!(forest.roots(), vec![0, 3]);
        assert_eq!(forest.weight(2), 2.0);
    }

    #[test]
    fn reconstruct_inverts_a_flattened_chain() {
        let values = [9.0, 4.0, 1.0];
        let grid = GridView::from_slice(&values, 1, 3).unwrap();
        let mut forest = chain_forest(&[0, 0, 1]);
        flatten(grid, &mut forest);
        // Pixel 1 kept weight 0, so it lands at the root's level.
        assert_eq!(forest.reconstruct_values().unwrap(), vec![8.0, 8.0, 0.0]);
    }

    #[test]
    fn reconstruct_walks_deep_chains_and_shifts_to_zero() {
        // 3 -> 2 -> 1 -> 0, root weight counts against the root itself.
        let forest =
            Forest::from_parts(vec![0, 0, 1, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(forest.reconstruct_values().unwrap(), vec![9.0, 7.0, 4.0, 0.0]);
    }

    #[test]
    fn reconstruct_of_empty_forest_is_empty() {
        let forest = Forest::singletons(0).unwrap();
        assert!(forest.reconstruct_values().unwrap().is_empty());
    }

    #[test]
    fn background_pixels_get_label_zero() {
        let values = [5.0, 0.5, 1.0, 2.0, 3.0];
        let grid = GridView::from_slice(&values, 1, 5).unwrap();
        let forest = chain_forest(&[0, 0, 2, 2, 3]);
        assert_eq!(
            forest.labels_with_background(grid, 1.0).unwrap(),
            vec![1, 0, 3, 3, 3]
        );
    }

    #[test]
    fn background_labels_require_matching_grid() {
        let values = [1.0, 2.0];
        let grid = GridView::from_slice(&values, 1, 2).unwrap();
        let forest = Forest::singletons(3).unwrap();
        let err = forest.labels_with_background(grid, 0.0).unwrap_err();
        assert_eq!(err, PixHomError::BufferLength { needed: 3, got: 2 });
    }
}
