use crate::error::TapeGradError;
use crate::ops::loss::{batch_dims, log_sum_exp};
use crate::ops::{ForwardOutput, InputGrads, Op, Operand};
use crate::tensor::Tensor;

/// Row-wise log-softmax over the last axis: `x - log(Σ exp(x))`.
///
/// The row maximum is subtracted before exponentiating, so inputs such as
/// `[1000, 1000]` stay finite.
///
/// # Errors
/// `RankMismatch` unless the input is 1-D or 2-D.
pub fn log_softmax_op(a: &Tensor) -> Result<Tensor, TapeGradError> {
    a.apply(Op::LogSoftmax, &[])
}

pub(crate) fn log_softmax_rows(data: &[f64], cols: usize) -> Vec<f64> {
    if cols == 0 {
        return Vec::new();
    }
    data.chunks(cols)
        .flat_map(|row| {
            let lse = log_sum_exp(row);
            row.iter().map(move |&x| x - lse)
        })
        .collect()
}

pub(crate) fn forward(a: &Operand) -> Result<ForwardOutput, TapeGradError> {
    let (_, cols) = batch_dims(&a.shape, "log_softmax")?;
    Ok((log_softmax_rows(&a.data, cols), a.shape.clone()))
}

// dx_j = g_j - softmax_j * Σ_k g_k, per row
pub(crate) fn backward(a: &Operand, grad_output: &[f64], needs_grad: &[bool]) -> Result<InputGrads, TapeGradError> {
    if !needs_grad[0] {
        return Ok(vec![None]);
    }
    let (_, cols) = batch_dims(&a.shape, "log_softmax")?;
    if cols == 0 {
        return Ok(vec![Some(Vec::new())]);
    }
    let log_probs = log_softmax_rows(&a.data, cols);
    let grad = log_probs
        .chunks(cols)
        .zip(grad_output.chunks(cols))
        .flat_map(|(lp_row, g_row)| {
            let g_sum: f64 = g_row.iter().sum();
            lp_row
                .iter()
                .zip(g_row)
                .map(move |(&lp, &g)| g - lp.exp() * g_sum)
        })
        .collect();
    Ok(vec![Some(grad)])
}
