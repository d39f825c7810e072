//! Python bindings for the pixhom persistent homology library.
//!
//! Exposes the diagram and forest builders on 2D numpy arrays. Inputs of any
//! numeric dtype and memory layout are cast to float64 row-major order.

use std::borrow::Cow;

use numpy::{
    AllowTypeChange, Element, PyArray1, PyArray2, PyArrayLike1, PyArrayLike2, PyArrayMethods,
    PyReadonlyArray2, PyUntypedArrayMethods,
};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use pixhom::{
    compute_basins, compute_diagram, compute_forest, Forest, GridView, MergeTreeConfig,
    PixHomError,
};

/// Convert a PixHomError to a Python exception.
fn to_py_err(err: PixHomError) -> PyErr {
    match err {
        PixHomError::InvalidDimensions { .. }
        | PixHomError::BufferLength { .. }
        | PixHomError::NanValue { .. }
        | PixHomError::InvalidParent { .. } => PyValueError::new_err(err.to_string()),
        _ => PyRuntimeError::new_err(err.to_string()),
    }
}

/// Borrows the array data when it is C-contiguous, copies it otherwise.
fn row_major<'a, T: Element + Copy>(arr: &'a PyReadonlyArray2<'_, T>) -> Cow<'a, [T]> {
    match arr.as_slice() {
        Ok(data) => Cow::Borrowed(data),
        Err(_) => Cow::Owned(arr.as_array().iter().copied().collect()),
    }
}

fn grid_view<'a>(data: &'a [f64], shape: &[usize]) -> PyResult<GridView<'a>> {
    GridView::from_slice(data, shape[0], shape[1]).map_err(to_py_err)
}

fn to_i64(indices: Vec<usize>) -> Vec<i64> {
    indices.into_iter().map(|idx| idx as i64).collect()
}

/// Compute the 0-dimensional persistence diagram of a 2D array.
///
/// Args:
///     arr: 2D numeric numpy array (rows x cols)
///     parallel: Run per-pixel stages in parallel (default: False)
///
/// Returns:
///     float64 array of shape (n, 2) holding (death, birth) pairs; the last
///     row is (global max, global min)
#[pyfunction]
#[pyo3(signature = (arr, parallel = false))]
fn compute_ph<'py>(
    py: Python<'py>,
    arr: PyArrayLike2<'py, f64, AllowTypeChange>,
    parallel: bool,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let shape = arr.shape().to_vec();
    let data = row_major(&arr);
    let view = grid_view(&data, &shape)?;
    let cfg = MergeTreeConfig { parallel };

    let diagram = compute_diagram(view, &cfg).map_err(to_py_err)?;
    let num_pairs = diagram.len();
    PyArray1::from_vec(py, diagram.to_flat()).reshape([num_pairs, 2])
}

/// Compute the merge forest of a 2D array.
///
/// Args:
///     arr: 2D numeric numpy array (rows x cols)
///     parallel: Run per-pixel stages in parallel (default: False)
///
/// Returns:
///     (edges, weights): int64 parent indices into the flattened array and
///     float64 merge weights, both shaped like the input
#[pyfunction]
#[pyo3(signature = (arr, parallel = false))]
fn image_to_graph<'py>(
    py: Python<'py>,
    arr: PyArrayLike2<'py, f64, AllowTypeChange>,
    parallel: bool,
) -> PyResult<(Bound<'py, PyArray2<i64>>, Bound<'py, PyArray2<f64>>)> {
    let shape = arr.shape().to_vec();
    let data = row_major(&arr);
    let view = grid_view(&data, &shape)?;
    let cfg = MergeTreeConfig { parallel };

    let (parent, weight) = compute_forest(view, &cfg).map_err(to_py_err)?.into_parts();
    let edges = PyArray1::from_vec(py, to_i64(parent)).reshape([shape[0], shape[1]])?;
    let weights = PyArray1::from_vec(py, weight).reshape([shape[0], shape[1]])?;
    Ok((edges, weights))
}

/// Rebuild per-pixel values from the output of `image_to_graph`.
///
/// Args:
///     edges: 2D integer array of parent indices into the flattened array
///     weights: 2D numeric array of merge weights, same shape as `edges`
///
/// Returns:
///     float64 array shaped like `edges`, shifted so its minimum is 0
#[pyfunction]
fn graph_to_image<'py>(
    py: Python<'py>,
    edges: PyArrayLike2<'py, i64, AllowTypeChange>,
    weights: PyArrayLike2<'py, f64, AllowTypeChange>,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let shape = edges.shape().to_vec();
    if weights.shape() != shape.as_slice() {
        return Err(PyValueError::new_err(format!(
            "edges shape {:?} does not match weights shape {:?}",
            shape,
            weights.shape()
        )));
    }

    let parent = row_major(&edges)
        .iter()
        .map(|&edge| {
            usize::try_from(edge)
                .map_err(|_| PyValueError::new_err(format!("negative parent index {edge}")))
        })
        .collect::<PyResult<Vec<usize>>>()?;
    let weight = row_major(&weights).into_owned();

    let forest = Forest::from_parts(parent, weight).map_err(to_py_err)?;
    let values = forest.reconstruct_values().map_err(to_py_err)?;
    PyArray1::from_vec(py, values).reshape([shape[0], shape[1]])
}

/// Label every pixel with the flattened index of its catchment basin peak.
///
/// Args:
///     arr: 2D numeric numpy array (rows x cols)
///     parallel: Run per-pixel stages in parallel (default: False)
///
/// Returns:
///     int64 array shaped like the input
#[pyfunction]
#[pyo3(signature = (arr, parallel = false))]
fn basin_labels<'py>(
    py: Python<'py>,
    arr: PyArrayLike2<'py, f64, AllowTypeChange>,
    parallel: bool,
) -> PyResult<Bound<'py, PyArray2<i64>>> {
    let shape = arr.shape().to_vec();
    let data = row_major(&arr);
    let view = grid_view(&data, &shape)?;
    let cfg = MergeTreeConfig { parallel };

    let basins = compute_basins(view, &cfg).map_err(to_py_err)?;
    PyArray1::from_vec(py, to_i64(basins.labels())).reshape([shape[0], shape[1]])
}

/// Segment a 2D array into basins with a background class.
///
/// Args:
///     arr: 2D numeric numpy array (rows x cols)
///     bg_value: Pixels below this value are background (default: 0.0)
///     parallel: Run per-pixel stages in parallel (default: False)
///
/// Returns:
///     int64 array shaped like the input: 0 for background, basin peak
///     index plus one elsewhere
#[pyfunction]
#[pyo3(signature = (arr, bg_value = 0.0, parallel = false))]
fn segmentation<'py>(
    py: Python<'py>,
    arr: PyArrayLike2<'py, f64, AllowTypeChange>,
    bg_value: f64,
    parallel: bool,
) -> PyResult<Bound<'py, PyArray2<i64>>> {
    let shape = arr.shape().to_vec();
    let data = row_major(&arr);
    let view = grid_view(&data, &shape)?;
    let cfg = MergeTreeConfig { parallel };

    let basins = compute_basins(view, &cfg).map_err(to_py_err)?;
    let labels = basins
        .labels_with_background(view, bg_value)
        .map_err(to_py_err)?;
    PyArray1::from_vec(py, to_i64(labels)).reshape([shape[0], shape[1]])
}

/// Pick a lifetime cutoff at the widest gap between sorted lifetimes.
///
/// Args:
///     lifetimes: 1D numeric array with at least two entries
///
/// Returns:
///     float threshold
#[pyfunction]
fn max_jump_threshold(lifetimes: PyArrayLike1<'_, f64, AllowTypeChange>) -> PyResult<f64> {
    let values: Vec<f64> = lifetimes.as_array().iter().copied().collect();
    pixhom::max_jump_threshold(&values)
        .ok_or_else(|| PyValueError::new_err("need at least two lifetimes"))
}

/// Python module for pixhom persistent homology.
#[pymodule]
fn _pixhom(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(compute_ph, m)?)?;
    m.add_function(wrap_pyfunction!(image_to_graph, m)?)?;
    m.add_function(wrap_pyfunction!(graph_to_image, m)?)?;
    m.add_function(wrap_pyfunction!(basin_labels, m)?)?;
    m.add_function(wrap_pyfunction!(segmentation, m)?)?;
    m.add_function(wrap_pyfunction!(max_jump_threshold, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
