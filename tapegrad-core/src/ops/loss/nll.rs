use crate::error::TapeGradError;
use crate::ops::loss::{batch_dims, check_targets};
use crate::ops::{ForwardOutput, InputGrads, Op, Operand};
use crate::tensor::Tensor;

/// Negative log-likelihood: `-mean_i(log_probs[i, targets[i]])`.
///
/// `log_probs` is `[N, C]` (or `[C]` with a single target), typically the
/// output of [`log_softmax_op`](super::log_softmax_op). Returns a 0-d tensor.
///
/// # Errors
/// - `RankMismatch` for inputs that are not 1-D or 2-D.
/// - `TargetCountMismatch` if `targets.len() != N`.
/// - `TargetOutOfRange` if a target is not below `C`.
pub fn nll_loss_op(log_probs: &Tensor, targets: &[usize]) -> Result<Tensor, TapeGradError> {
    log_probs.apply(
        Op::NllLoss {
            targets: targets.to_vec(),
        },
        &[],
    )
}

pub(crate) fn forward(a: &Operand, targets: &[usize]) -> Result<ForwardOutput, TapeGradError> {
    let (rows, cols) = batch_dims(&a.shape, "nll_loss")?;
    check_targets(targets, rows, cols)?;
    let picked: f64 = targets
        .iter()
        .enumerate()
        .map(|(i, &t)| a.data[i * cols + t])
        .sum();
    Ok((vec![-picked / rows as f64], vec![]))
}

// Only the picked entry of each row receives -g/N.
pub(crate) fn backward(
    a: &Operand,
    targets: &[usize],
    grad_output: &[f64],
    needs_grad: &[bool],
) -> Result<InputGrads, TapeGradError> {
    if !needs_grad[0] {
        return Ok(vec![None]);
    }
    let (rows, cols) = batch_dims(&a.shape, "nll_loss")?;
    let scale = -grad_output[0] / rows as f64;
    let mut grad = vec![0.0; a.numel()];
    for (i, &t) in targets.iter().enumerate() {
        grad[i * cols + t] = scale;
    }
    Ok(vec![Some(grad)])
}

#[cfg(test)]
#[path = "nll_test.rs"]
mod tests;
