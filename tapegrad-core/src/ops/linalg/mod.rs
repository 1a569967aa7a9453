//! Two-dimensional linear algebra.

pub mod matmul;
pub mod transpose;

pub use matmul::matmul_op;
pub use transpose::transpose_op;

/// Returns `(rows, cols)` of a rank-2 shape or a `RankMismatch` error.
pub(crate) fn matrix_dims(shape: &[usize], operation: &str) -> Result<(usize, usize), crate::error::TapeGradError> {
    match shape {
        [rows, cols] => Ok((*rows, *cols)),
        _ => Err(crate::error::TapeGradError::RankMismatch {
            expected: 2,
            actual: shape.to_vec(),
            operation: operation.to_string(),
        }),
    }
}
