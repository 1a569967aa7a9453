//! # Loss Functions
//!
//! Classification losses over a batch of rows. Inputs are `[N, C]` (one row per
//! example, classes along the last axis) or `[C]` for a single example.
//! Targets are class indices, one per row. Every loss reduces to the mean over
//! the batch and returns a 0-d tensor.
//!
//! - [`log_softmax_op`]: row-wise, numerically stable log-softmax.
//! - [`nll_loss_op`]: negative log-likelihood of log-probabilities.
//! - [`cross_entropy_op`]: fused log-softmax + NLL on raw logits.

use num_traits::Float;

use crate::error::TapeGradError;
use crate::tensor::utils::as_rows;

pub mod cross_entropy;
pub mod log_softmax;
pub mod nll;

pub use cross_entropy::cross_entropy_op;
pub use log_softmax::log_softmax_op;
pub use nll::nll_loss_op;

/// `(rows, cols)` of a loss input, or `RankMismatch` for ranks other than 1 and 2.
pub(crate) fn batch_dims(shape: &[usize], operation: &str) -> Result<(usize, usize), TapeGradError> {
    as_rows(shape).ok_or_else(|| TapeGradError::RankMismatch {
        expected: 2,
        actual: shape.to_vec(),
        operation: operation.to_string(),
    })
}

/// Validates one target class per row, each below `num_classes`.
pub(crate) fn check_targets(targets: &[usize], rows: usize, num_classes: usize) -> Result<(), TapeGradError> {
    if targets.len() != rows {
        return Err(TapeGradError::TargetCountMismatch {
            expected: rows,
            actual: targets.len(),
        });
    }
    match targets.iter().position(|&t| t >= num_classes) {
        Some(row) => Err(TapeGradError::TargetOutOfRange {
            row,
            target: targets[row],
            num_classes,
        }),
        None => Ok(()),
    }
}

/// `log(Σ exp(x))` with the row maximum shifted out, so no `exp` overflows.
pub(crate) fn log_sum_exp<T: Float>(row: &[T]) -> T {
    let max = row.iter().copied().fold(T::neg_infinity(), T::max);
    if !max.is_finite() {
        return max;
    }
    let sum = row.iter().fold(T::zero(), |acc, &x| acc + (x - max).exp());
    max + sum.ln()
}
