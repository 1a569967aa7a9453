use crate::error::TapeGradError;
use crate::ops::loss::{batch_dims, check_targets, log_sum_exp};
use crate::ops::{ForwardOutput, InputGrads, Op, Operand};
use crate::tensor::Tensor;

/// Mean cross-entropy of raw `logits [N, C]` against class `targets`.
///
/// Equivalent to `nll_loss_op(log_softmax_op(logits), targets)` but computed
/// as one node: `loss = mean_i(logsumexp(x_i) - x_i[t_i])`, with gradient
/// `(softmax(x_i) - onehot(t_i)) / N`.
///
/// # Errors
/// Same as [`nll_loss_op`](super::nll_loss_op).
pub fn cross_entropy_op(logits: &Tensor, targets: &[usize]) -> Result<Tensor, TapeGradError> {
    logits.apply(
        Op::CrossEntropy {
            targets: targets.to_vec(),
        },
        &[],
    )
}

pub(crate) fn forward(a: &Operand, targets: &[usize]) -> Result<ForwardOutput, TapeGradError> {
    let (rows, cols) = batch_dims(&a.shape, "cross_entropy")?;
    check_targets(targets, rows, cols)?;
    let total: f64 = targets
        .iter()
        .enumerate()
        .map(|(i, &t)| {
            let row = &a.data[i * cols..(i + 1) * cols];
            log_sum_exp(row) - row[t]
        })
        .sum();
    Ok((vec![total / rows as f64], vec![]))
}

pub(crate) fn backward(
    a: &Operand,
    targets: &[usize],
    grad_output: &[f64],
    needs_grad: &[bool],
) -> Result<InputGrads, TapeGradError> {
    if !needs_grad[0] {
        return Ok(vec![None]);
    }
    let (rows, cols) = batch_dims(&a.shape, "cross_entropy")?;
    let scale = grad_output[0] / rows as f64;
    let mut grad = Vec::with_capacity(a.numel());
    for (i, &t) in targets.iter().enumerate() {
        let row = &a.data[i * cols..(i + 1) * cols];
        let lse = log_sum_exp(row);
        grad.extend(row.iter().enumerate().map(|(j, &x)| {
            let onehot = if j == t { 1.0 } else { 0.0 };
            ((x - lse).exp() - onehot) * scale
        }));
    }
    Ok(vec![Some(grad)])
}

#[cfg(test)]
#[path = "cross_entropy_test.rs"]
mod tests;
