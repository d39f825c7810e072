#![cfg(feature = "rayon")]

use pixhom::{compute_diagram, compute_forest, GridView, MergeTreeConfig};

fn make_field(rows: usize, cols: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let value = ((r * 13) ^ (c * 7) ^ (r * c)) & 0x1F;
            data.push(value as f64);
        }
    }
    data
}

#[test]
fn parallel_matches_sequential() {
    let rows = 64;
    let cols = 48;
    let values = make_field(rows, cols);
    let grid = GridView::from_slice(&values, rows, cols).unwrap();

    let seq_cfg = MergeTreeConfig { parallel: false };
    let par_cfg = MergeTreeConfig { parallel: true };

    assert_eq!(
        compute_forest(grid, &seq_cfg).unwrap(),
        compute_forest(grid, &par_cfg).unwrap()
    );
    assert_eq!(
        compute_diagram(grid, &seq_cfg).unwrap(),
        compute_diagram(grid, &par_cfg).unwrap()
    );
}
