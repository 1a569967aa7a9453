/// Calculates the row-major strides for a given shape.
///
/// Example:
/// shape = [2, 3] -> strides = [3, 1]
/// shape = [2, 2, 2] -> strides = [4, 2, 1]
pub fn calculate_strides(shape: &[usize]) -> Vec<usize> {
    if shape.is_empty() {
        return vec![];
    }
    let rank = shape.len();
    let mut strides = vec![1; rank];
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// Splits a rank-1 or rank-2 shape into `(rows, cols)` for row-wise kernels.
/// A rank-1 tensor is one row.
pub(crate) fn as_rows(shape: &[usize]) -> Option<(usize, usize)> {
    match shape {
        [cols] => Some((1, *cols)),
        [rows, cols] => Some((*rows, *cols)),
        _ => None,
    }
}
