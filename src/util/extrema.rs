//! Single-pass argmin/argmax over a flattened grid.

/// Indices of the global minimum and maximum of a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extrema {
    /// Lowest index holding the minimum value.
    pub argmin: usize,
    /// Highest index holding the maximum value.
    pub argmax: usize,
}

/// Scans `values` once and returns the extremum indices.
///
/// Ties on the minimum keep the lowest index; ties on the maximum keep the
/// highest index. An empty slice yields `None`.
pub fn argmin_argmax(values: &[f64]) -> Option<Extrema> {
    let (&first, rest) = values.split_first()?;
    let mut min_val = first;
    let mut max_val = first;
    let mut argmin = 0usize;
    let mut argmax = 0usize;

    for (offset, &value) in rest.iter().enumerate() {
        let idx = offset + 1;
        if value < min_val {
            min_val = value;
            argmin = idx;
        }
        if value >= max_val {
            max_val = value;
            argmax = idx;
        }
    }

    Some(Extrema { argmin, argmax })
}
