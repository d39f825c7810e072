//! Hand-checked merge forests and diagrams for small grids.

use pixhom::{compute_basins, compute_diagram, compute_forest, GridView, MergeTreeConfig};

fn run(values: &[f64], rows: usize, cols: usize) -> (Vec<usize>, Vec<f64>, Vec<f64>) {
    let grid = GridView::from_slice(values, rows, cols).unwrap();
    let cfg = MergeTreeConfig::default();
    let (parents, weights) = compute_forest(grid, &cfg).unwrap().into_parts();
    let diagram = compute_diagram(grid, &cfg).unwrap().to_flat();
    (parents, weights, diagram)
}

#[test]
fn single_pixel() {
    let (parents, weights, diagram) = run(&[5.0], 1, 1);
    assert_eq!(parents, vec![0]);
    assert_eq!(weights, vec![0.0]);
    assert_eq!(diagram, vec![5.0, 5.0]);
}

#[test]
fn single_row_with_one_peak() {
    let (parents, weights, diagram) = run(&[1.0, 3.0, 2.0], 1, 3);
    assert_eq!(parents, vec![1, 1, 1]);
    assert_eq!(weights, vec![0.0, 0.0, 0.0]);
    assert_eq!(diagram, vec![3.0, 1.0]);
}

#[test]
fn uniform_block_collapses_to_first_pixel() {
    let (parents, _, diagram) = run(&[7.0; 4], 2, 2);
    assert_eq!(parents, vec![0, 0, 0, 0]);
    assert_eq!(diagram, vec![7.0, 7.0]);
}

#[test]
fn plateau_root_is_top_left_of_block() {
    let rows = 5;
    let cols = 5;
    let mut values = vec![1.0; rows * cols];
    for r in 1..4 {
        for c in 1..4 {
            values[r * cols + c] = 9.0;
        }
    }
    let (parents, _, diagram) = run(&values, rows, cols);
    assert!(parents.iter().all(|&p| p == 6));
    assert_eq!(diagram, vec![9.0, 1.0]);
}

#[test]
fn four_corner_peaks() {
    #[rustfmt::skip]
    let values = [
        5.0, 1.0, 4.0,
        1.0, 0.0, 1.0,
        3.0, 1.0, 2.0,
    ];
    let (parents, weights, diagram) = run(&values, 3, 3);
    assert_eq!(parents, vec![0, 0, 1, 0, 0, 2, 3, 6, 5]);
    assert_eq!(weights, vec![0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 2.0, 0.0, 3.0]);
    assert_eq!(diagram, vec![4.0, 1.0, 3.0, 1.0, 2.0, 1.0, 5.0, 0.0]);
}

#[test]
fn basins_label_each_corner_peak() {
    #[rustfmt::skip]
    let values = [
        5.0, 1.0, 4.0,
        1.0, 0.0, 1.0,
        3.0, 1.0, 2.0,
    ];
    let grid = GridView::from_slice(&values, 3, 3).unwrap();
    let basins = compute_basins(grid, &MergeTreeConfig::default()).unwrap();
    assert_eq!(basins.roots(), vec![0, 2, 6, 8]);
    assert_eq!(basins.labels(), vec![0, 0, 2, 0, 0, 2, 6, 6, 8]);
}

#[test]
fn two_basins_in_a_row() {
    let (parents, weights, diagram) = run(&[5.0, 3.0, 1.0, 2.0, 4.0], 1, 5);
    assert_eq!(parents, vec![0, 0, 0, 4, 2]);
    assert_eq!(weights, vec![0.0, 0.0, 4.0, 0.0, 1.0]);
    assert_eq!(diagram, vec![4.0, 1.0, 5.0, 1.0]);
}

#[test]
fn empty_grid_produces_empty_outputs() {
    for (rows, cols) in [(0, 0), (0, 4), (3, 0)] {
        let (parents, weights, diagram) = run(&[], rows, cols);
        assert!(parents.is_empty());
        assert!(weights.is_empty());
        assert!(diagram.is_empty());
    }
}
